//! Query interaction state
//!
//! [`QueryState`] is a plain value. [`QueryState::reduce`] consumes it together
//! with one [`Action`] and returns the next state plus the [`Effect`]s the
//! caller has to carry out (network calls, persistence, focus). Nothing in here
//! touches the network, the disk or the terminal.
//!
//! Each request flow carries a sequence number. A completion is applied only
//! when its number is still the latest one issued for that flow, which makes
//! "last write wins" deterministic instead of depending on thread timing.

use crate::api::{Page, SearchPage};
use crate::history::SearchHistory;
use crate::results::{
    enrich_all, filter_options, filter_results, FilterKind, FilterSelector, ResultFilters,
    ResultItem,
};

pub const SEARCH_ERROR_MESSAGE: &str = "An error occurred while searching.";

/// Local suggestions shown when `/suggest` cannot be used
pub fn fallback_suggestions(text: &str) -> Vec<String> {
    vec![format!("{} example", text), format!("{} test", text)]
}

/// Keys with special meaning while the suggestion panel is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowDown,
    ArrowUp,
    Enter,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The query text was edited
    InputChanged(String),
    SuggestionsLoaded { seq: u64, suggestions: Vec<String> },
    SuggestionsFailed { seq: u64, text: String },
    Key(NavKey),
    /// Replace the query without asking for suggestions (pointer pick)
    QueryCommitted(String),
    HistoryPicked(String),
    DismissSuggestions,
    /// Search started
    Submit,
    SearchSucceeded { seq: u64, page: SearchPage },
    SearchFailed { seq: u64, reason: String },
    FilterChanged(FilterKind, FilterSelector),
    ClearFilters,
    ToggleDarkMode,
    ClearHistory,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchSuggestions { seq: u64, text: String },
    RunSearch { seq: u64, query: String, page: Page },
    PersistHistory(Vec<String>),
    PersistDarkMode(bool),
    FocusInput,
}

#[derive(Debug)]
pub struct Transition {
    pub state: QueryState,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    query: String,
    suggestions: Vec<String>,
    show_suggestions: bool,
    selected: Option<usize>,
    history: SearchHistory,
    results: Vec<ResultItem>,
    total: Option<u64>,
    filters: ResultFilters,
    loading: bool,
    error: Option<String>,
    searched: bool,
    dark_mode: bool,
    suggest_seq: u64,
    search_seq: u64,
    min_suggest_chars: usize,
    page: Page,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            show_suggestions: false,
            selected: None,
            history: SearchHistory::default(),
            results: Vec::new(),
            total: None,
            filters: ResultFilters::default(),
            loading: false,
            error: None,
            searched: false,
            dark_mode: false,
            suggest_seq: 0,
            search_seq: 0,
            min_suggest_chars: 2,
            page: Page::default(),
        }
    }
}

impl QueryState {
    pub fn new(min_suggest_chars: usize, page: Page) -> Self {
        Self {
            min_suggest_chars,
            page,
            ..Default::default()
        }
    }

    pub fn with_history(mut self, history: SearchHistory) -> Self {
        self.history = history;
        self
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    // --- Queries ---

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Panel is open and has something to show
    pub fn suggestions_visible(&self) -> bool {
        self.show_suggestions && !self.suggestions.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selection as a signed index, `-1` meaning none
    pub fn selected_index(&self) -> isize {
        self.selected.map_or(-1, |i| i as isize)
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn filters(&self) -> &ResultFilters {
        &self.filters
    }

    /// Filtered view, derived fresh on every call
    pub fn filtered_results(&self) -> Vec<&ResultItem> {
        filter_results(&self.results, &self.filters)
    }

    pub fn filter_options(&self, kind: FilterKind) -> Vec<FilterSelector> {
        filter_options(&self.results, kind)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_searched(&self) -> bool {
        self.searched
    }

    /// Search finished and the raw result list is empty
    pub fn shows_no_results(&self) -> bool {
        self.searched && !self.loading && self.results.is_empty()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Submission is disabled while loading or for a blank query
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.query.trim().is_empty()
    }

    pub fn latest_suggest_seq(&self) -> u64 {
        self.suggest_seq
    }

    pub fn latest_search_seq(&self) -> u64 {
        self.search_seq
    }

    /// A completion whose sequence number has been superseded
    pub fn is_stale(&self, action: &Action) -> bool {
        match action {
            Action::SuggestionsLoaded { seq, .. } | Action::SuggestionsFailed { seq, .. } => {
                *seq != self.suggest_seq
            }
            Action::SearchSucceeded { seq, .. } | Action::SearchFailed { seq, .. } => {
                *seq != self.search_seq
            }
            _ => false,
        }
    }

    // --- Transitions ---

    pub fn reduce(mut self, action: Action) -> Transition {
        let mut effects = Vec::new();

        if self.is_stale(&action) {
            return Transition {
                state: self,
                effects,
            };
        }

        match action {
            Action::InputChanged(text) => {
                self.selected = None;
                self.suggest_seq += 1;
                if text.chars().count() < self.min_suggest_chars {
                    self.suggestions.clear();
                    self.show_suggestions = false;
                } else {
                    effects.push(Effect::FetchSuggestions {
                        seq: self.suggest_seq,
                        text: text.clone(),
                    });
                }
                self.query = text;
            }
            Action::SuggestionsLoaded { suggestions, .. } => {
                self.suggestions = suggestions;
                self.show_suggestions = true;
                self.selected = None;
            }
            Action::SuggestionsFailed { text, .. } => {
                self.suggestions = fallback_suggestions(&text);
                self.show_suggestions = true;
                self.selected = None;
            }
            Action::Key(key) => self.navigate(key),
            Action::QueryCommitted(text) => {
                self.commit_query(text);
            }
            Action::HistoryPicked(term) => {
                self.commit_query(term);
                effects.push(Effect::FocusInput);
            }
            Action::DismissSuggestions => {
                self.close_suggestions();
            }
            Action::Submit => {
                if self.can_submit() {
                    self.loading = true;
                    self.error = None;
                    self.results.clear();
                    self.total = None;
                    self.searched = false;
                    self.filters = ResultFilters::default();
                    self.close_suggestions();

                    self.history.record(&self.query);
                    effects.push(Effect::PersistHistory(self.history.entries().to_vec()));

                    self.search_seq += 1;
                    effects.push(Effect::RunSearch {
                        seq: self.search_seq,
                        query: self.query.clone(),
                        page: self.page,
                    });
                }
            }
            Action::SearchSucceeded { page, .. } => {
                self.results = enrich_all(page.results);
                self.total = page.total;
                self.error = None;
                self.searched = true;
                self.loading = false;
            }
            Action::SearchFailed { .. } => {
                self.results.clear();
                self.total = None;
                self.error = Some(SEARCH_ERROR_MESSAGE.to_string());
                self.searched = true;
                self.loading = false;
            }
            Action::FilterChanged(kind, selector) => {
                self.filters.set(kind, selector);
            }
            Action::ClearFilters => {
                self.filters = ResultFilters::default();
            }
            Action::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                effects.push(Effect::PersistDarkMode(self.dark_mode));
            }
            Action::ClearHistory => {
                self.history.clear();
                effects.push(Effect::PersistHistory(Vec::new()));
            }
        }

        Transition {
            state: self,
            effects,
        }
    }

    fn navigate(&mut self, key: NavKey) {
        if !self.suggestions_visible() {
            return;
        }
        let last = self.suggestions.len() - 1;
        match key {
            NavKey::ArrowDown => {
                self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
            }
            NavKey::ArrowUp => {
                self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
            }
            NavKey::Enter => {
                if let Some(index) = self.selected {
                    let chosen = self.suggestions[index].clone();
                    self.commit_query(chosen);
                }
            }
            NavKey::Other => {}
        }
    }

    fn commit_query(&mut self, text: String) {
        self.query = text;
        self.close_suggestions();
    }

    /// Hide the panel and invalidate any suggestion request still in flight
    fn close_suggestions(&mut self) {
        self.show_suggestions = false;
        self.selected = None;
        self.suggest_seq += 1;
    }
}
