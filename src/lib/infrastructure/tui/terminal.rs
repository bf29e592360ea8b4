//! Terminal setup and teardown

use std::io::{self, stdout, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// The terminal the form is drawn on
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Restores the terminal when dropped, including on error paths.
#[derive(Debug)]
pub struct TerminalGuard;

impl Drop for TerminalGuard {
    #[mutants::skip]
    fn drop(&mut self) {
        let _ = restore();
    }
}

/// Switch to raw mode on the alternate screen.
#[mutants::skip]
pub fn init() -> io::Result<(Tui, TerminalGuard)> {
    enable_raw_mode()?;
    let guard = TerminalGuard;

    execute!(stdout(), EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    Ok((terminal, guard))
}

#[mutants::skip]
fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    Ok(())
}
