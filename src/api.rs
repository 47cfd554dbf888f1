//! Search API client
//!
//! Wire types for the external `/suggest` and `/search` endpoints, the body
//! parsers that decide what counts as a well-formed response, and a blocking
//! HTTP implementation of [`SearchApi`].

use std::time::Duration;

use serde_json::{Map, Value};

use crate::config::AppConfig;
use crate::error::{QueryDeskError, Result};

// ============================================================================
// Wire Types
// ============================================================================

/// One hit as returned by `/search`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResult {
    pub doc_id: Option<String>,
    pub title: String,
    pub snippet: String,
    /// Only JSON numbers count; any other value is treated as absent
    pub score: Option<f64>,
    pub doc_type: Option<String>,
    pub date: Option<String>,
    pub url: Option<String>,
}

impl RawResult {
    /// Read one entry object. Fields with an unexpected type count as absent.
    fn from_entry(entry: &Map<String, Value>) -> Self {
        let text = |key: &str| entry.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            doc_id: entry.get("doc_id").and_then(scalar_text),
            title: text("title").unwrap_or_default(),
            snippet: text("snippet").unwrap_or_default(),
            score: entry.get("score").and_then(Value::as_f64),
            doc_type: text("docType").or_else(|| text("doc_type")),
            date: text("date"),
            url: text("url"),
        }
    }
}

/// A parsed `/search` body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub results: Vec<RawResult>,
    /// Corpus size, when the server reports it
    pub total: Option<u64>,
}

/// Fixed pagination sent with every search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
        }
    }
}

/// Strings as-is, numbers in their JSON spelling
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// Body Parsing
// ============================================================================

/// Parse a successful `/suggest` body.
///
/// Only `{ "suggestions": [string, ...] }` is well-formed.
pub fn parse_suggest_body(body: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| QueryDeskError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let list = value
        .get("suggestions")
        .and_then(Value::as_array)
        .ok_or_else(|| QueryDeskError::MalformedResponse("missing suggestions list".into()))?;

    list.iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                QueryDeskError::MalformedResponse(format!("non-string suggestion: {}", item))
            })
        })
        .collect()
}

/// Parse a successful `/search` body.
///
/// A missing or null `results` list is an empty page, not an error.
pub fn parse_search_body(body: &str) -> Result<SearchPage> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| QueryDeskError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    let object = match value.as_object() {
        Some(object) => object,
        None => return Ok(SearchPage::default()),
    };

    let total = object.get("total").and_then(Value::as_u64);

    let results = match object.get("results") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .map(|entry| {
                entry.as_object().map(RawResult::from_entry).ok_or_else(|| {
                    QueryDeskError::MalformedResponse(format!(
                        "result entry is not an object: {}",
                        entry
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?,
        Some(other) => {
            return Err(QueryDeskError::MalformedResponse(format!(
                "results is not a list: {}",
                other
            )))
        }
    };

    Ok(SearchPage { results, total })
}

// ============================================================================
// Client
// ============================================================================

/// The two calls the controller makes against the search service
pub trait SearchApi: Send + Sync {
    fn suggest(&self, text: &str) -> Result<Vec<String>>;

    fn search(&self, query: &str, page: Page) -> Result<SearchPage>;
}

/// Blocking HTTP client for the search service
pub struct HttpSearchApi {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpSearchApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::Agent::new_with_config(config),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str, params: &[(&str, String)]) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.agent.get(&url);
        for (key, value) in params {
            request = request.query(*key, value);
        }

        let mut response = request.call()?;
        response
            .body_mut()
            .read_to_string()
            .map_err(|e| QueryDeskError::Network(format!("failed to read response: {}", e)))
    }
}

impl SearchApi for HttpSearchApi {
    fn suggest(&self, text: &str) -> Result<Vec<String>> {
        let body = self.get("/suggest", &[("q", text.to_string())])?;
        parse_suggest_body(&body)
    }

    fn search(&self, query: &str, page: Page) -> Result<SearchPage> {
        let body = self.get(
            "/search",
            &[
                ("q", query.to_string()),
                ("limit", page.limit.to_string()),
                ("offset", page.offset.to_string()),
            ],
        )?;
        parse_search_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_body_with_list_is_accepted() {
        let parsed = parse_suggest_body(r#"{"suggestions":["rust book","rust lang"]}"#).unwrap();
        assert_eq!(parsed, vec!["rust book", "rust lang"]);
    }

    #[test]
    fn suggest_body_without_list_is_malformed() {
        for body in [r#"{}"#, r#"{"suggestions":null}"#, r#"[]"#, "not json", r#"{"suggestions":[1]}"#] {
            let err = parse_suggest_body(body).unwrap_err();
            assert!(matches!(err, QueryDeskError::MalformedResponse(_)), "{body}");
        }
    }

    #[test]
    fn search_body_maps_entries_in_order() {
        let page = parse_search_body(
            r#"{"results":[
                {"doc_id":"a.txt","title":"A","snippet":"foo bar","score":0.9},
                {"title":"B","snippet":"baz"}
            ],"total":42}"#,
        )
        .unwrap();
        assert_eq!(page.total, Some(42));
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].doc_id.as_deref(), Some("a.txt"));
        assert_eq!(page.results[0].score, Some(0.9));
        assert_eq!(page.results[1].title, "B");
        assert_eq!(page.results[1].score, None);
    }

    #[test]
    fn search_body_without_results_is_empty() {
        for body in [r#"{}"#, r#"{"results":null}"#, r#"{"results":[]}"#, "null", "3"] {
            let page = parse_search_body(body).unwrap();
            assert!(page.results.is_empty(), "{body}");
        }
    }

    #[test]
    fn search_body_with_bad_shapes_is_malformed() {
        for body in ["<html>", r#"{"results":"nope"}"#, r#"{"results":[1,2]}"#] {
            assert!(parse_search_body(body).is_err(), "{body}");
        }
    }

    #[test]
    fn non_numeric_score_is_absent() {
        let page = parse_search_body(r#"{"results":[{"title":"A","score":"high"}]}"#).unwrap();
        assert_eq!(page.results[0].score, None);
    }

    #[test]
    fn oddly_typed_optional_fields_do_not_reject_the_page() {
        let page = parse_search_body(
            r#"{"results":[{"doc_id":7,"title":"A","date":20240101,"url":{"href":"x"}}]}"#,
        )
        .unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].doc_id.as_deref(), Some("7"));
        assert_eq!(page.results[0].date, None);
        assert_eq!(page.results[0].url, None);
        assert_eq!(page.results[0].title, "A");
    }

    #[test]
    fn both_doc_type_spellings_are_accepted() {
        let page =
            parse_search_body(r#"{"results":[{"title":"A","doc_type":"memo","docType":"memo"}]}"#)
                .unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].doc_type.as_deref(), Some("memo"));

        let page = parse_search_body(r#"{"results":[{"doc_type":"letter"}]}"#).unwrap();
        assert_eq!(page.results[0].doc_type.as_deref(), Some("letter"));
    }

    #[test]
    fn backend_supplied_doc_type_is_kept() {
        let page =
            parse_search_body(r#"{"results":[{"title":"A","docType":"memo","date":"2023-12-01"}]}"#)
                .unwrap();
        assert_eq!(page.results[0].doc_type.as_deref(), Some("memo"));
        assert_eq!(page.results[0].date.as_deref(), Some("2023-12-01"));
    }

    #[test]
    fn http_client_trims_trailing_slash() {
        let api = HttpSearchApi::new("http://localhost:8000/", None);
        assert_eq!(api.base_url(), "http://localhost:8000");
    }
}
