//! Error types for the email module

use lettre::{address::AddressError, error::Error};
use thiserror::Error;
use tracing::debug;

/// Why a send attempt failed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    /// The server refused the login
    #[error("authentication failed")]
    Authentication,

    /// No connection could be made to the submission server
    #[error("could not connect to the SMTP server")]
    Connection,

    /// The connection dropped after it had been established
    #[error("the SMTP server unexpectedly disconnected")]
    Disconnected,

    /// Anything else, carrying the underlying description
    #[error("{0}")]
    Unclassified(String),
}

impl From<AddressError> for SendError {
    fn from(err: AddressError) -> Self {
        debug!("AddressError -> SendError");

        SendError::Unclassified(err.to_string())
    }
}

impl From<Error> for SendError {
    fn from(err: Error) -> Self {
        debug!("lettre::error::Error -> SendError");

        SendError::Unclassified(err.to_string())
    }
}

/// Errors raised by a single step of a submission session
#[derive(Debug, Error)]
pub enum SessionError {
    /// The server answered with an error reply
    #[error("{0}")]
    Rejected(String),

    /// The network connection failed or timed out
    #[error("{0}")]
    Dropped(String),

    /// Unknown error
    #[error(transparent)]
    UnknownError(#[from] anyhow::Error),
}
