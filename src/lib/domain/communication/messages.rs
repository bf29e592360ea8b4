//! Outgoing message

use lettre::{
    message::{Mailbox, MultiPart, SinglePart},
    Message,
};

use super::{email_addresses::EmailAddress, errors::SendError};

/// A validated message, alive for the duration of one send attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// The sender, also used as the login name
    pub sender: EmailAddress,

    /// The single recipient
    pub recipient: EmailAddress,

    /// The subject line
    pub subject: String,

    /// The plain text body
    pub body: String,
}

impl OutgoingMessage {
    /// Build the MIME message: From, To and Subject headers over a
    /// `multipart/mixed` body with a single `text/plain` part.
    pub fn to_mime(&self) -> Result<Message, SendError> {
        let from: Mailbox = self.sender.as_str().parse()?;
        let to: Mailbox = self.recipient.as_str().parse()?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(self.subject.clone())
            .multipart(MultiPart::mixed().singlepart(SinglePart::plain(self.body.clone())))?;

        Ok(message)
    }
}
