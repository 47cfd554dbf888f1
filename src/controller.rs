//! Query interaction controller
//!
//! Owns the [`QueryState`] and carries out the effects the reducer asks for.
//! Network calls run off the UI thread and report back through a channel;
//! their completions are applied only when the owner drains the queue with
//! [`Controller::process_messages`], so every state write happens on the
//! thread that owns the controller.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::api::{Page, SearchApi};
use crate::config::AppConfig;
use crate::error::QueryDeskError;
use crate::results::ResultItem;
use crate::state::{Action, Effect, QueryState};
use crate::storage::{self, KeyValueStore};

/// Where request effects are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// One worker thread per request
    Background,
    /// On the calling thread; the completion is still queued
    Inline,
}

/// Delivers a search completion exactly once.
///
/// Dropping an unfinished guard (worker panic, failed spawn) reports a failure,
/// so the loading state always ends.
struct CompletionGuard {
    tx: Sender<Action>,
    seq: u64,
    done: bool,
}

impl CompletionGuard {
    fn new(tx: Sender<Action>, seq: u64) -> Self {
        Self {
            tx,
            seq,
            done: false,
        }
    }

    fn finish(mut self, action: Action) {
        self.done = true;
        let _ = self.tx.send(action);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if !self.done {
            let _ = self.tx.send(Action::SearchFailed {
                seq: self.seq,
                reason: "search worker ended without a response".to_string(),
            });
        }
    }
}

pub struct Controller {
    state: QueryState,
    api: Arc<dyn SearchApi>,
    store: Box<dyn KeyValueStore>,
    mode: RequestMode,
    tx: Sender<Action>,
    rx: Receiver<Action>,
    focus_requested: bool,
}

impl Controller {
    /// Build a controller, reading history and the dark mode flag from `store`
    pub fn new(
        config: &AppConfig,
        api: Arc<dyn SearchApi>,
        store: Box<dyn KeyValueStore>,
    ) -> Self {
        let history = storage::load_history(store.as_ref(), config.history_capacity);
        let dark_mode = storage::load_dark_mode(store.as_ref());
        tracing::info!(
            history = history.len(),
            dark_mode,
            api = %config.api_base_url,
            "controller ready"
        );

        let page = Page {
            limit: config.page_limit,
            offset: config.page_offset,
        };
        let state = QueryState::new(config.min_suggest_chars, page)
            .with_history(history)
            .with_dark_mode(dark_mode);

        let (tx, rx) = unbounded();
        Self {
            state,
            api,
            store,
            mode: RequestMode::Background,
            tx,
            rx,
            focus_requested: false,
        }
    }

    pub fn with_mode(mut self, mode: RequestMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn filtered_results(&self) -> Vec<&ResultItem> {
        self.state.filtered_results()
    }

    /// True once after a transition asked for the query input to take focus
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn dispatch(&mut self, action: Action) {
        if self.state.is_stale(&action) {
            tracing::debug!(?action, "dropping superseded response");
            return;
        }

        let state = std::mem::take(&mut self.state);
        let transition = state.reduce(action);
        self.state = transition.state;

        for effect in transition.effects {
            self.run_effect(effect);
        }
    }

    /// Apply every queued completion. Returns how many were handled.
    pub fn process_messages(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
            handled += 1;
        }
        handled
    }

    /// Block until at least one completion arrives or `timeout` passes, then drain
    pub fn wait_for_messages(&mut self, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(action) => {
                self.dispatch(action);
                1 + self.process_messages()
            }
            Err(_) => 0,
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchSuggestions { seq, text } => self.fetch_suggestions(seq, text),
            Effect::RunSearch { seq, query, page } => self.run_search(seq, query, page),
            Effect::PersistHistory(entries) => {
                let saved = if entries.is_empty() {
                    storage::clear_history(self.store.as_ref())
                } else {
                    storage::save_history(self.store.as_ref(), &entries)
                };
                if let Err(e) = saved {
                    tracing::warn!(error = %e, "failed to persist search history");
                }
            }
            Effect::PersistDarkMode(enabled) => {
                if let Err(e) = storage::save_dark_mode(self.store.as_ref(), enabled) {
                    tracing::warn!(error = %e, "failed to persist dark mode flag");
                }
            }
            Effect::FocusInput => self.focus_requested = true,
        }
    }

    fn fetch_suggestions(&self, seq: u64, text: String) {
        tracing::debug!(seq, text = %text, "requesting suggestions");
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        let job = move || {
            let action = match api.suggest(text.trim()) {
                Ok(suggestions) => Action::SuggestionsLoaded { seq, suggestions },
                Err(e) => {
                    log_failure("suggest", seq, &e);
                    Action::SuggestionsFailed { seq, text }
                }
            };
            let _ = tx.send(action);
        };

        self.spawn("querydesk-suggest", job);
    }

    fn run_search(&self, seq: u64, query: String, page: Page) {
        tracing::info!(seq, query = %query, limit = page.limit, offset = page.offset, "search started");
        let api = Arc::clone(&self.api);
        let guard = CompletionGuard::new(self.tx.clone(), seq);

        let job = move || {
            let action = match api.search(&query, page) {
                Ok(page) => {
                    tracing::info!(seq, results = page.results.len(), "search completed");
                    Action::SearchSucceeded { seq, page }
                }
                Err(e) => {
                    log_failure("search", seq, &e);
                    Action::SearchFailed {
                        seq,
                        reason: e.to_string(),
                    }
                }
            };
            guard.finish(action);
        };

        self.spawn("querydesk-search", job);
    }

    fn spawn<F>(&self, name: &str, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match self.mode {
            RequestMode::Inline => job(),
            RequestMode::Background => {
                if let Err(e) = thread::Builder::new().name(name.to_string()).spawn(job) {
                    tracing::error!(error = %e, worker = name, "could not start request worker");
                }
            }
        }
    }
}

/// Service failures are expected and only warned about; anything else is a bug
fn log_failure(flow: &str, seq: u64, err: &QueryDeskError) {
    if err.is_request_failure() {
        tracing::warn!(flow, seq, error = %err, "request failed");
    } else {
        tracing::error!(flow, seq, error = %err, "request failed unexpectedly");
    }
}
