//! Key handling for the compose form

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::{
    communication::mailer::Mailer,
    compose::{ComposeForm, Field},
};

/// Which control has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// One of the text inputs
    Field(Field),

    /// The send button
    SendButton,
}

impl Default for Focus {
    fn default() -> Self {
        Focus::Field(Field::Sender)
    }
}

impl Focus {
    /// The next control in tab order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Focus::Field(Field::Sender) => Focus::Field(Field::Recipient),
            Focus::Field(Field::Recipient) => Focus::Field(Field::Subject),
            Focus::Field(Field::Subject) => Focus::Field(Field::Body),
            Focus::Field(Field::Body) => Focus::SendButton,
            Focus::SendButton => Focus::Field(Field::Sender),
        }
    }

    /// The previous control in tab order, wrapping around
    pub fn previous(self) -> Self {
        match self {
            Focus::Field(Field::Sender) => Focus::SendButton,
            Focus::Field(Field::Recipient) => Focus::Field(Field::Sender),
            Focus::Field(Field::Subject) => Focus::Field(Field::Recipient),
            Focus::Field(Field::Body) => Focus::Field(Field::Subject),
            Focus::SendButton => Focus::Field(Field::Body),
        }
    }
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep reading keys
    Continue,

    /// Run a send attempt
    Send,

    /// Leave the application
    Quit,
}

/// Apply one key press to the form.
pub fn handle_key<M>(form: &mut ComposeForm<M>, focus: &mut Focus, key: KeyEvent) -> Action
where
    M: Mailer,
{
    if key.kind != KeyEventKind::Press {
        return Action::Continue;
    }

    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if control => Action::Quit,
        KeyCode::Char('s') if control => Action::Send,
        KeyCode::Tab => {
            *focus = focus.next();
            Action::Continue
        }
        KeyCode::BackTab => {
            *focus = focus.previous();
            Action::Continue
        }
        KeyCode::Enter => match *focus {
            Focus::SendButton => Action::Send,
            Focus::Field(Field::Body) => {
                form.push_char(Field::Body, '\n');
                Action::Continue
            }
            Focus::Field(_) => {
                *focus = focus.next();
                Action::Continue
            }
        },
        KeyCode::Char(' ') if *focus == Focus::SendButton => Action::Send,
        KeyCode::Char(c) if !control => {
            if let Focus::Field(field) = *focus {
                form.push_char(field, c);
            }
            Action::Continue
        }
        KeyCode::Backspace => {
            if let Focus::Field(field) = *focus {
                form.pop_char(field);
            }
            Action::Continue
        }
        _ => Action::Continue,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::domain::communication::mailer::MockMailer;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn form() -> ComposeForm<MockMailer> {
        ComposeForm::new(Arc::new(MockMailer::new()))
    }

    #[test]
    fn test_tab_cycles_through_every_control() {
        let mut focus = Focus::default();
        let mut seen = vec![focus];

        for _ in 0..5 {
            focus = focus.next();
            seen.push(focus);
        }

        assert_eq!(
            seen,
            vec![
                Focus::Field(Field::Sender),
                Focus::Field(Field::Recipient),
                Focus::Field(Field::Subject),
                Focus::Field(Field::Body),
                Focus::SendButton,
                Focus::Field(Field::Sender),
            ]
        );
    }

    #[test]
    fn test_previous_undoes_next() {
        let mut focus = Focus::default();

        for _ in 0..5 {
            assert_eq!(focus.next().previous(), focus);
            focus = focus.next();
        }
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut form = form();
        let mut focus = Focus::Field(Field::Subject);

        for c in "Hix".chars() {
            handle_key(&mut form, &mut focus, key(KeyCode::Char(c)));
        }
        handle_key(&mut form, &mut focus, key(KeyCode::Backspace));

        assert_eq!(form.fields().subject, "Hi");
        assert!(form.fields().sender.is_empty());
    }

    #[test]
    fn test_enter_in_body_inserts_newline() {
        let mut form = form();
        let mut focus = Focus::Field(Field::Body);

        handle_key(&mut form, &mut focus, key(KeyCode::Char('a')));
        handle_key(&mut form, &mut focus, key(KeyCode::Enter));
        handle_key(&mut form, &mut focus, key(KeyCode::Char('b')));

        assert_eq!(form.fields().body, "a\nb");
        assert_eq!(focus, Focus::Field(Field::Body));
    }

    #[test]
    fn test_enter_in_single_line_field_moves_focus() {
        let mut form = form();
        let mut focus = Focus::Field(Field::Sender);

        let action = handle_key(&mut form, &mut focus, key(KeyCode::Enter));

        assert_eq!(action, Action::Continue);
        assert_eq!(focus, Focus::Field(Field::Recipient));
        assert!(form.fields().sender.is_empty());
    }

    #[test]
    fn test_send_triggers() {
        let mut form = form();

        let mut focus = Focus::SendButton;
        assert_eq!(
            handle_key(&mut form, &mut focus, key(KeyCode::Enter)),
            Action::Send
        );
        assert_eq!(
            handle_key(&mut form, &mut focus, key(KeyCode::Char(' '))),
            Action::Send
        );

        let mut focus = Focus::Field(Field::Subject);
        assert_eq!(handle_key(&mut form, &mut focus, ctrl('s')), Action::Send);
        assert!(form.fields().subject.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut form = form();
        let mut focus = Focus::default();

        assert_eq!(
            handle_key(&mut form, &mut focus, key(KeyCode::Esc)),
            Action::Quit
        );
        assert_eq!(handle_key(&mut form, &mut focus, ctrl('c')), Action::Quit);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut form = form();
        let mut focus = Focus::Field(Field::Sender);
        let mut release = key(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;

        assert_eq!(
            handle_key(&mut form, &mut focus, release),
            Action::Continue
        );
        assert!(form.fields().sender.is_empty());
    }
}
