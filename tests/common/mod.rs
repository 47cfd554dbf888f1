//! Shared helpers for the integration suites.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use querydesk::{
    AppConfig, Controller, MemoryStore, Page, QueryDeskError, RawResult, RequestMode, SearchApi,
    SearchPage,
};

/// What a scripted endpoint answers with
#[derive(Clone)]
pub enum Reply<T> {
    Ok(T),
    Status(u16),
    Malformed,
}

/// In-process `SearchApi` with canned replies and a call log
#[derive(Default)]
pub struct ScriptedApi {
    suggestions: Mutex<HashMap<String, Reply<Vec<String>>>>,
    searches: Mutex<HashMap<String, Reply<SearchPage>>>,
    pub suggest_calls: Mutex<Vec<String>>,
    pub search_calls: Mutex<Vec<(String, Page)>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_suggest(self, text: &str, reply: Reply<Vec<String>>) -> Self {
        self.suggestions.lock().insert(text.to_string(), reply);
        self
    }

    pub fn on_search(self, query: &str, reply: Reply<SearchPage>) -> Self {
        self.searches.lock().insert(query.to_string(), reply);
        self
    }

    pub fn suggest_count(&self) -> usize {
        self.suggest_calls.lock().len()
    }

    pub fn search_count(&self) -> usize {
        self.search_calls.lock().len()
    }
}

fn answer<T: Clone>(reply: Option<Reply<T>>, empty: T) -> querydesk::Result<T> {
    match reply {
        Some(Reply::Ok(value)) => Ok(value),
        Some(Reply::Status(code)) => Err(QueryDeskError::Status(code)),
        Some(Reply::Malformed) => Err(QueryDeskError::MalformedResponse("scripted".into())),
        None => Ok(empty),
    }
}

impl SearchApi for ScriptedApi {
    fn suggest(&self, text: &str) -> querydesk::Result<Vec<String>> {
        self.suggest_calls.lock().push(text.to_string());
        let reply = self.suggestions.lock().get(text).cloned();
        answer(reply, Vec::new())
    }

    fn search(&self, query: &str, page: Page) -> querydesk::Result<SearchPage> {
        self.search_calls.lock().push((query.to_string(), page));
        let reply = self.searches.lock().get(query).cloned();
        answer(reply, SearchPage::default())
    }
}

pub fn hit(title: &str, snippet: &str, score: Option<f64>) -> RawResult {
    RawResult {
        title: title.to_string(),
        snippet: snippet.to_string(),
        score,
        ..Default::default()
    }
}

pub fn page(results: Vec<RawResult>) -> SearchPage {
    SearchPage {
        results,
        total: None,
    }
}

/// Inline controller over a scripted API and an in-memory store
pub fn inline_controller(api: Arc<ScriptedApi>, store: MemoryStore) -> Controller {
    Controller::new(&AppConfig::default(), api, Box::new(store)).with_mode(RequestMode::Inline)
}

/// Commit `query`, submit it and apply the completion
pub fn search(controller: &mut Controller, query: &str) {
    controller.dispatch(querydesk::Action::QueryCommitted(query.to_string()));
    controller.dispatch(querydesk::Action::Submit);
    controller.process_messages();
}
