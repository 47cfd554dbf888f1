//! QueryDesk - terminal client for a document search service
//!
//! Drives an external search API (`/suggest`, `/search`) from an interactive
//! terminal front-end.
//!
//! # Features
//!
//! - **Live Suggestions**: requested once the query reaches two characters, with a
//!   local fallback when the service cannot answer
//! - **Keyboard Navigation**: arrow keys walk the suggestion panel, Enter commits
//! - **Search History**: the five most recent distinct queries, persisted across runs
//! - **Result Filters**: rank, type and date selectors derived from the current results
//! - **Highlighting**: literal, case-insensitive query matches marked in snippets
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use querydesk::{Action, AppConfig, Controller, HttpSearchApi, JsonFileStore, RequestMode};
//!
//! fn main() -> querydesk::Result<()> {
//!     let config = AppConfig::default().with_api_url("http://localhost:8000");
//!     config.validate()?;
//!
//!     let api = Arc::new(HttpSearchApi::from_config(&config));
//!     let store = Box::new(JsonFileStore::open(&config.state_file));
//!     let mut controller = Controller::new(&config, api, store).with_mode(RequestMode::Inline);
//!
//!     controller.dispatch(Action::QueryCommitted("quick fox".into()));
//!     controller.dispatch(Action::Submit);
//!     controller.process_messages();
//!
//!     for item in controller.filtered_results() {
//!         println!("#{} {} ({})", item.rank, item.title, item.score_label());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod highlight;
pub mod history;
pub mod logging;
pub mod results;
pub mod state;
pub mod storage;
pub mod tui;

// Re-export main types
pub use api::{HttpSearchApi, Page, RawResult, SearchApi, SearchPage};
pub use config::AppConfig;
pub use controller::{Controller, RequestMode};
pub use error::{QueryDeskError, Result};
pub use highlight::{highlight_snippet, Segment};
pub use history::SearchHistory;
pub use results::{
    filter_options, filter_results, FilterKind, FilterSelector, ResultFilters, ResultItem,
};
pub use state::{Action, Effect, NavKey, QueryState, Transition};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
