//! Masked password modal

use std::{cell::RefCell, fmt};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use crate::domain::compose::CredentialPrompt;

use super::{
    terminal::Tui,
    widgets::{self, Screen},
};

/// Result of one key press inside the modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptStep {
    Editing,
    Confirmed,
    Dismissed,
}

fn apply_key(input: &mut String, key: KeyEvent) -> PromptStep {
    if key.kind != KeyEventKind::Press {
        return PromptStep::Editing;
    }

    match key.code {
        KeyCode::Enter => PromptStep::Confirmed,
        KeyCode::Esc => PromptStep::Dismissed,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            PromptStep::Dismissed
        }
        KeyCode::Char(c) => {
            input.push(c);
            PromptStep::Editing
        }
        KeyCode::Backspace => {
            input.pop();
            PromptStep::Editing
        }
        _ => PromptStep::Editing,
    }
}

/// Password prompt drawn over the form until Enter or Esc.
pub struct PasswordPrompt<'a> {
    terminal: &'a RefCell<Tui>,
    screen: &'a Screen,
}

impl<'a> PasswordPrompt<'a> {
    /// Create a prompt drawing `screen` underneath the modal
    pub fn new(terminal: &'a RefCell<Tui>, screen: &'a Screen) -> Self {
        Self { terminal, screen }
    }
}

impl fmt::Debug for PasswordPrompt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordPrompt").finish_non_exhaustive()
    }
}

impl CredentialPrompt for PasswordPrompt<'_> {
    #[mutants::skip]
    fn ask(&mut self) -> Option<String> {
        let mut input = String::new();

        loop {
            let typed = input.chars().count();
            let drawn = self
                .terminal
                .borrow_mut()
                .draw(|frame| {
                    widgets::render(frame, self.screen);
                    widgets::render_password(frame, typed);
                })
                .map(|_| ());

            if let Err(err) = drawn {
                warn!(error = %err, "could not draw password prompt");
                return None;
            }

            let key = match event::read() {
                Ok(Event::Key(key)) => key,
                Ok(_) => continue,
                Err(err) => {
                    warn!(error = %err, "could not read password prompt input");
                    return None;
                }
            };

            match apply_key(&mut input, key) {
                PromptStep::Editing => {}
                PromptStep::Confirmed => return Some(input),
                PromptStep::Dismissed => return None,
            }
        }
    }
}
