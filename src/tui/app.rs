use crate::controller::Controller;
use crate::results::{FilterKind, FilterSelector};
use crate::state::{Action, NavKey};
use crate::tui::search::InputLine;
use crate::tui::table::ResultListState;
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::time::{Duration, Instant};

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    History,
    Results,
}

pub struct App {
    pub controller: Controller,

    // Sub-states
    pub input: InputLine,
    pub list: ResultListState,
    pub focus: Focus,
    pub history_cursor: usize,

    /// Query text the cursor was last positioned for
    synced_query: String,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let synced_query = controller.state().query().to_string();
        let mut input = InputLine::default();
        input.end(&synced_query);

        Self {
            controller,
            input,
            list: ResultListState::default(),
            focus: Focus::Input,
            history_cursor: 0,
            synced_query,
            should_quit: false,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal
                .draw(|frame| ui::draw(frame, self))
                .map_err(|e| crate::QueryDeskError::Terminal(e.to_string()))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if self.controller.process_messages() > 0 {
                    self.after_update();
                }
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn dispatch(&mut self, action: Action) {
        self.controller.dispatch(action);
        self.after_update();
    }

    /// Reconcile view-only state with the controller after any transition
    fn after_update(&mut self) {
        let query = self.controller.state().query();
        if query != self.synced_query {
            self.synced_query = query.to_string();
            self.input.end(query);
        }

        if self.controller.take_focus_request() {
            self.focus = Focus::Input;
        }

        let history_len = self.controller.state().history().len();
        if self.history_cursor >= history_len {
            self.history_cursor = history_len.saturating_sub(1);
        }
        if self.focus == Focus::History && history_len == 0 {
            self.focus = Focus::Input;
        }

        let total = self.controller.filtered_results().len();
        self.list.clamp(total);
    }

    /// Dispatch a typed edit without moving the cursor to the end
    fn edit_query(&mut self, text: String) {
        self.synced_query = text.clone();
        self.dispatch(Action::InputChanged(text));
    }

    fn cycle_filter(&mut self, kind: FilterKind) {
        let state = self.controller.state();
        if state.results().is_empty() {
            return;
        }
        let options = state.filter_options(kind);
        let current = state.filters().get(kind);
        let position = options.iter().position(|o| o == current).unwrap_or(0);
        let next = options
            .get((position + 1) % options.len())
            .cloned()
            .unwrap_or(FilterSelector::All);

        self.dispatch(Action::FilterChanged(kind, next));
        self.list.reset();
    }

    fn cycle_focus(&mut self) {
        let has_history = !self.controller.state().history().is_empty();
        let has_results = !self.controller.filtered_results().is_empty();
        self.focus = match self.focus {
            Focus::Input if has_history => Focus::History,
            Focus::Input | Focus::History if has_results => Focus::Results,
            _ => Focus::Input,
        };
        if self.focus != Focus::Input {
            self.dispatch(Action::DismissSuggestions);
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global keys
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('d') if ctrl => {
                self.dispatch(Action::ToggleDarkMode);
                return;
            }
            KeyCode::Esc => {
                self.handle_escape();
                return;
            }
            KeyCode::Tab => {
                self.cycle_focus();
                return;
            }
            KeyCode::F(2) => {
                self.cycle_filter(FilterKind::Rank);
                return;
            }
            KeyCode::F(3) => {
                self.cycle_filter(FilterKind::DocType);
                return;
            }
            KeyCode::F(4) => {
                self.cycle_filter(FilterKind::Date);
                return;
            }
            KeyCode::F(5) => {
                self.dispatch(Action::ClearFilters);
                self.list.reset();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::History => self.handle_history_key(key),
            Focus::Results => self.handle_results_key(key),
        }
    }

    fn handle_escape(&mut self) {
        if self.controller.state().suggestions_visible() {
            self.dispatch(Action::DismissSuggestions);
        } else if self.focus != Focus::Input {
            self.focus = Focus::Input;
        } else if !self.controller.state().query().is_empty() {
            self.input.home();
            self.edit_query(String::new());
        } else {
            self.should_quit = true;
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let query = self.controller.state().query().to_string();
        let panel_open = self.controller.state().suggestions_visible();

        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let next = self.input.insert(&query, c);
                self.edit_query(next);
            }
            KeyCode::Backspace => {
                if let Some(next) = self.input.backspace(&query) {
                    self.edit_query(next);
                }
            }
            KeyCode::Delete => {
                if let Some(next) = self.input.delete(&query) {
                    self.edit_query(next);
                }
            }
            KeyCode::Left => self.input.move_left(&query),
            KeyCode::Right => self.input.move_right(&query),
            KeyCode::Home => self.input.home(),
            KeyCode::End => self.input.end(&query),
            KeyCode::Down if panel_open => self.dispatch(Action::Key(NavKey::ArrowDown)),
            KeyCode::Up if panel_open => self.dispatch(Action::Key(NavKey::ArrowUp)),
            KeyCode::Down => {
                if !self.controller.filtered_results().is_empty() {
                    self.focus = Focus::Results;
                }
            }
            KeyCode::Enter => {
                if panel_open && self.controller.state().selected().is_some() {
                    self.dispatch(Action::Key(NavKey::Enter));
                } else {
                    self.list.reset();
                    self.dispatch(Action::Submit);
                }
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        let history_len = self.controller.state().history().len();
        match key.code {
            KeyCode::Left => {
                self.history_cursor = self.history_cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.history_cursor + 1 < history_len {
                    self.history_cursor += 1;
                }
            }
            KeyCode::Home => self.history_cursor = 0,
            KeyCode::End => self.history_cursor = history_len.saturating_sub(1),
            KeyCode::Enter => {
                let term = self
                    .controller
                    .state()
                    .history()
                    .entries()
                    .get(self.history_cursor)
                    .cloned();
                if let Some(term) = term {
                    self.dispatch(Action::HistoryPicked(term));
                }
            }
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        let total = self.controller.filtered_results().len();
        match key.code {
            KeyCode::Up => {
                if self.list.selected == Some(0) {
                    self.focus = Focus::Input;
                } else {
                    self.list.move_by(-1, total);
                }
            }
            KeyCode::Down => self.list.move_by(1, total),
            KeyCode::PageUp => self.list.move_by(-self.list.page(), total),
            KeyCode::PageDown => self.list.move_by(self.list.page(), total),
            KeyCode::Home => self.list.select(0, total),
            KeyCode::End => self.list.select(total.saturating_sub(1), total),

            KeyCode::Char('/') => self.focus = Focus::Input,

            // Any other printable char focuses search and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focus = Focus::Input;
                let query = self.controller.state().query().to_string();
                self.input.end(&query);
                let next = self.input.insert(&query, c);
                self.edit_query(next);
            }

            _ => {}
        }
    }
}
