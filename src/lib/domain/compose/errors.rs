//! Compose errors and the notices they raise

use thiserror::Error;
use tracing::debug;

use crate::domain::communication::errors::SendError;

use super::fields::Field;

/// Why a send from the form did not go through
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// A required field is empty
    #[error("{0} is required")]
    Validation(Field),

    /// The password prompt was dismissed or left empty
    #[error("sending cancelled")]
    Cancelled,

    /// Dispatch failed
    #[error(transparent)]
    Send(#[from] SendError),
}

/// A blocking message box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Window title
    pub title: String,

    /// Message text
    pub message: String,

    /// Whether this reports a failure
    pub is_error: bool,
}

impl Notice {
    fn error(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
            is_error: true,
        }
    }

    /// The notice shown after a successful send
    pub fn sent() -> Self {
        Self {
            title: "Success".to_string(),
            message: "Email sent successfully!".to_string(),
            is_error: false,
        }
    }
}

impl ComposeError {
    /// The status line text for this error
    pub fn status(&self) -> String {
        match self {
            Self::Validation(_) => "Please fill in all fields.".to_string(),
            Self::Cancelled => "Email sending cancelled. Password not provided.".to_string(),
            Self::Send(SendError::Authentication) => "Authentication failed.".to_string(),
            Self::Send(SendError::Connection) => "Connection error.".to_string(),
            Self::Send(SendError::Disconnected) => "Server disconnected.".to_string(),
            Self::Send(SendError::Unclassified(msg)) => format!("Error: {}", msg),
        }
    }

    /// The blocking notice for this error, if it raises one.
    ///
    /// A cancelled prompt only updates the status line.
    pub fn notice(&self) -> Option<Notice> {
        debug!("ComposeError -> Notice");

        let notice = match self {
            Self::Validation(_) => Notice::error("Error", "All fields are required!"),
            Self::Cancelled => return None,
            Self::Send(SendError::Authentication) => Notice::error(
                "Authentication Error",
                "Failed to log in. Please check your email and password \
                 (or App Password for Gmail if 2FA is on).",
            ),
            Self::Send(SendError::Connection) => Notice::error(
                "Connection Error",
                "Could not connect to the SMTP server. \
                 Check your internet connection or server settings.",
            ),
            Self::Send(SendError::Disconnected) => Notice::error(
                "Server Disconnected",
                "The SMTP server unexpectedly disconnected. Try again.",
            ),
            Self::Send(SendError::Unclassified(msg)) => {
                Notice::error("Error", format!("An unexpected error occurred:\n{}", msg))
            }
        };

        Some(notice)
    }
}
