//! Interactive terminal front-end

pub mod app;
pub mod colors;
pub mod search;
pub mod table;
pub mod ui;

use std::io;

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;

use crate::controller::Controller;
use crate::error::QueryDeskError;

pub use app::{App, Focus};

/// Take over the terminal and run the search screen until the user quits
pub fn run(controller: Controller) -> crate::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(terminal_error)?;
    execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(terminal_error)?;

    let mut app = App::new(controller);
    let result = app.run(&mut terminal);

    // Restore the terminal even when the loop failed
    let teardown = teardown(&mut terminal);
    result.and(teardown)
}

fn teardown<B: Backend + io::Write>(terminal: &mut Terminal<B>) -> crate::Result<()> {
    disable_raw_mode().map_err(terminal_error)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(terminal_error)?;
    terminal.show_cursor().map_err(terminal_error)?;
    Ok(())
}

fn terminal_error(e: impl std::fmt::Display) -> QueryDeskError {
    QueryDeskError::Terminal(e.to_string())
}
