//! Form fields

use std::fmt;

use crate::domain::communication::{email_addresses::EmailAddress, messages::OutgoingMessage};

/// One of the four required inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Your email
    Sender,

    /// Recipient email
    Recipient,

    /// Subject line
    Subject,

    /// Message body
    Body,
}

impl Field {
    /// All fields, in form order
    pub const ALL: [Field; 4] = [Field::Sender, Field::Recipient, Field::Subject, Field::Body];

    /// The label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            Field::Sender => "Your Email",
            Field::Recipient => "Recipient Email",
            Field::Subject => "Subject",
            Field::Body => "Message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The raw values currently entered in the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeFields {
    /// Sender address
    pub sender: String,

    /// Recipient address
    pub recipient: String,

    /// Subject line
    pub subject: String,

    /// Message body
    pub body: String,
}

impl ComposeFields {
    /// Read a field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Sender => &self.sender,
            Field::Recipient => &self.recipient,
            Field::Subject => &self.subject,
            Field::Body => &self.body,
        }
    }

    pub(super) fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Sender => &mut self.sender,
            Field::Recipient => &mut self.recipient,
            Field::Subject => &mut self.subject,
            Field::Body => &mut self.body,
        }
    }

    /// Build the outgoing message, or name the first empty field.
    ///
    /// Whitespace-only addresses and bodies count as empty; the subject is
    /// taken as typed and only an empty one is refused. The body is trimmed,
    /// as a multi-line input always carries trailing newlines.
    pub fn to_message(&self) -> Result<OutgoingMessage, Field> {
        if let Some(field) = Field::ALL.into_iter().find(|field| match field {
            Field::Subject => self.subject.is_empty(),
            _ => self.get(*field).trim().is_empty(),
        }) {
            return Err(field);
        }

        Ok(OutgoingMessage {
            sender: EmailAddress::new(&self.sender).map_err(|_| Field::Sender)?,
            recipient: EmailAddress::new(&self.recipient).map_err(|_| Field::Recipient)?,
            subject: self.subject.clone(),
            body: self.body.trim().to_string(),
        })
    }

    /// Clear the per-message fields, keeping the sender.
    pub(super) fn clear_message(&mut self) {
        self.recipient.clear();
        self.subject.clear();
        self.body.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ComposeFields {
        ComposeFields {
            sender: "a@x.com".to_string(),
            recipient: "b@y.com".to_string(),
            subject: "Hi".to_string(),
            body: "Test\n\n".to_string(),
        }
    }

    #[test]
    fn test_to_message_trims_body() {
        let message = filled().to_message().expect("all fields are filled");

        assert_eq!(message.sender.as_str(), "a@x.com");
        assert_eq!(message.recipient.as_str(), "b@y.com");
        assert_eq!(message.subject, "Hi");
        assert_eq!(message.body, "Test");
    }

    #[test]
    fn test_each_empty_field_is_reported() {
        for field in Field::ALL {
            let mut fields = filled();
            fields.get_mut(field).clear();

            assert_eq!(fields.to_message(), Err(field));
        }
    }

    #[test]
    fn test_whitespace_body_is_empty() {
        let mut fields = filled();
        fields.body = " \n\t\n".to_string();

        assert_eq!(fields.to_message(), Err(Field::Body));
    }

    #[test]
    fn test_blank_subject_is_sent_as_typed() {
        let mut fields = filled();
        fields.subject = "  ".to_string();

        let message = fields.to_message().expect("subject is not empty");

        assert_eq!(message.subject, "  ");
    }

    #[test]
    fn test_clear_message_keeps_sender() {
        let mut fields = filled();
        fields.clear_message();

        assert_eq!(
            fields,
            ComposeFields {
                sender: "a@x.com".to_string(),
                ..ComposeFields::default()
            }
        );
    }
}
