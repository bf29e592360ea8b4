//! Compose form controller

use std::{fmt, sync::Arc};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::communication::{credentials::Credential, mailer::Mailer};

use super::{
    errors::ComposeError,
    fields::{ComposeFields, Field},
    prompt::CredentialPrompt,
};

/// The single status line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status(String);

impl Status {
    /// Borrow the status text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Holds what the user typed and turns a send request into one dispatch.
///
/// Views read [`fields`](Self::fields), write through the setters and
/// subscribe to the status line; they never touch the mailer directly.
#[derive(Debug)]
pub struct ComposeForm<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
    fields: ComposeFields,
    status: watch::Sender<Status>,
}

impl<M> ComposeForm<M>
where
    M: Mailer,
{
    /// Create an empty form
    pub fn new(mailer: Arc<M>) -> Self {
        let (status, _) = watch::channel(Status::default());

        Self {
            mailer,
            fields: ComposeFields::default(),
            status,
        }
    }

    /// Current field values
    pub fn fields(&self) -> &ComposeFields {
        &self.fields
    }

    /// Replace a field's value
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.fields.get_mut(field) = value.into();
    }

    /// Append a character to a field
    pub fn push_char(&mut self, field: Field, c: char) {
        self.fields.get_mut(field).push(c);
    }

    /// Remove the last character of a field
    pub fn pop_char(&mut self, field: Field) {
        self.fields.get_mut(field).pop();
    }

    /// Current status line
    pub fn status(&self) -> Status {
        self.status.borrow().clone()
    }

    /// Watch the status line for changes
    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.status.subscribe()
    }

    fn set_status(&self, text: impl Into<String>) {
        self.status.send_replace(Status(text.into()));
    }

    /// Validate the form, ask for the password and send the message.
    ///
    /// On success the recipient, subject and body are cleared; the sender is
    /// kept. On any failure every field keeps its value so the user can retry.
    /// The status line is updated in both cases.
    pub async fn try_send<P>(&mut self, prompt: &mut P) -> Result<(), ComposeError>
    where
        P: CredentialPrompt + ?Sized,
    {
        let outcome = self.dispatch(prompt).await;

        match &outcome {
            Ok(()) => {
                self.fields.clear_message();
                self.set_status("Email sent successfully!");
            }
            Err(err) => {
                warn!(error = %err, "email not sent");
                self.set_status(err.status());
            }
        }

        outcome
    }

    async fn dispatch<P>(&self, prompt: &mut P) -> Result<(), ComposeError>
    where
        P: CredentialPrompt + ?Sized,
    {
        let message = self.fields.to_message().map_err(ComposeError::Validation)?;

        let credential = prompt
            .ask()
            .and_then(|raw| Credential::new(&raw).ok())
            .ok_or(ComposeError::Cancelled)?;

        self.set_status("Attempting to send email...");
        debug!(sender = %message.sender, recipient = %message.recipient, "dispatching");

        self.mailer.send(&message, &credential).await?;

        info!(recipient = %message.recipient, "email sent");

        Ok(())
    }
}
