//! Terminal user interface for the compose form

use std::cell::RefCell;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tracing::debug;

use crate::domain::{
    communication::mailer::Mailer,
    compose::{ComposeForm, Field, Notice},
};

use input::{Action, Focus};
use prompt::PasswordPrompt;
use terminal::Tui;
use widgets::Screen;

pub mod input;
pub mod prompt;
pub mod terminal;
pub mod widgets;

/// The compose window: draws the form and feeds key presses to it.
#[derive(Debug)]
pub struct ComposeApp<M>
where
    M: Mailer,
{
    form: ComposeForm<M>,
    focus: Focus,
}

impl<M> ComposeApp<M>
where
    M: Mailer,
{
    /// Create the application around a form
    pub fn new(form: ComposeForm<M>) -> Self {
        Self {
            form,
            focus: Focus::default(),
        }
    }

    fn screen(&self) -> Screen {
        Screen {
            fields: self.form.fields().clone(),
            focus: self.focus,
            status: self.form.status().to_string(),
        }
    }

    /// Run until the user quits.
    #[mutants::skip]
    pub async fn run(mut self) -> Result<()> {
        let (terminal, _guard) = terminal::init()?;
        let terminal = RefCell::new(terminal);

        loop {
            let screen = self.screen();
            terminal
                .borrow_mut()
                .draw(|frame| widgets::render(frame, &screen))?;

            let Event::Key(key) = event::read()? else {
                continue;
            };

            match input::handle_key(&mut self.form, &mut self.focus, key) {
                Action::Continue => {}
                Action::Send => self.send(&terminal).await?,
                Action::Quit => break,
            }
        }

        debug!("compose window closed");

        Ok(())
    }

    /// One send attempt. The form is redrawn whenever the status changes
    /// while the attempt is in flight; keys are not read until it finishes.
    #[mutants::skip]
    async fn send(&mut self, terminal: &RefCell<Tui>) -> Result<()> {
        let mut status = self.form.subscribe();
        let screen = self.screen();

        let outcome = {
            let mut prompt = PasswordPrompt::new(terminal, &screen);
            let attempt = self.form.try_send(&mut prompt);
            tokio::pin!(attempt);

            loop {
                tokio::select! {
                    outcome = &mut attempt => break outcome,
                    Ok(()) = status.changed() => {
                        let current = Screen {
                            status: status.borrow_and_update().to_string(),
                            ..screen.clone()
                        };
                        terminal
                            .borrow_mut()
                            .draw(|frame| widgets::render(frame, &current))?;
                    }
                }
            }
        };

        let notice = match &outcome {
            Ok(()) => {
                self.focus = Focus::Field(Field::Recipient);
                Some(Notice::sent())
            }
            Err(err) => err.notice(),
        };

        if let Some(notice) = notice {
            self.show_notice(terminal, &notice)?;
        }

        Ok(())
    }

    #[mutants::skip]
    fn show_notice(&self, terminal: &RefCell<Tui>, notice: &Notice) -> Result<()> {
        let screen = self.screen();

        loop {
            terminal.borrow_mut().draw(|frame| {
                widgets::render(frame, &screen);
                widgets::render_notice(frame, notice);
            })?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
                {
                    return Ok(());
                }
            }
        }
    }
}
