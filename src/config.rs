//! Application configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{QueryDeskError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Directory containing the running executable, falling back to `.`
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the search API, without trailing slash
    pub api_base_url: String,
    /// `limit` sent with every search
    pub page_limit: usize,
    /// `offset` sent with every search
    pub page_offset: usize,
    /// Minimum input length (in chars) before suggestions are requested
    pub min_suggest_chars: usize,
    /// Maximum number of remembered queries
    pub history_capacity: usize,
    /// Global request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// Durable key-value storage file
    pub state_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            page_limit: 10,
            page_offset: 0,
            min_suggest_chars: 2,
            history_capacity: crate::history::DEFAULT_CAPACITY,
            request_timeout: None,
            state_file: exe_dir().join("querydesk-state.json"),
        }
    }
}

impl AppConfig {
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_base_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_state_file(mut self, path: PathBuf) -> Self {
        self.state_file = path;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(QueryDeskError::InvalidConfig("api url is required".into()));
        }
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(QueryDeskError::InvalidConfig(format!(
                "api url must start with http:// or https://, got '{}'",
                self.api_base_url
            )));
        }
        if self.page_limit == 0 {
            return Err(QueryDeskError::InvalidConfig("page limit must be positive".into()));
        }
        if self.history_capacity == 0 {
            return Err(QueryDeskError::InvalidConfig(
                "history capacity must be positive".into(),
            ));
        }
        if self.min_suggest_chars == 0 {
            return Err(QueryDeskError::InvalidConfig(
                "minimum suggestion length must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_base_url, "http://localhost:8000");
        assert_eq!(cfg.page_limit, 10);
        assert_eq!(cfg.page_offset, 0);
        assert_eq!(cfg.min_suggest_chars, 2);
        assert_eq!(cfg.history_capacity, 5);
        assert!(cfg.request_timeout.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn api_url_is_trimmed() {
        let cfg = AppConfig::default().with_api_url(" http://search.local:9000/ ");
        assert_eq!(cfg.api_base_url, "http://search.local:9000");
    }

    #[test]
    fn rejects_non_http_url() {
        let cfg = AppConfig::default().with_api_url("ftp://example.com");
        assert!(matches!(cfg.validate(), Err(QueryDeskError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_limits() {
        let cfg = AppConfig {
            page_limit: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = AppConfig {
            history_capacity: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
