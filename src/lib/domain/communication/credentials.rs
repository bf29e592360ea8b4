//! Credential

use std::fmt;

use thiserror::Error;

/// Credential error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    /// No password was entered
    #[error("password not provided")]
    Empty,
}

/// The sender's password, collected just before a send.
///
/// Never printed: both [`fmt::Display`] and [`fmt::Debug`] are masked.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Create a new credential
    pub fn new(raw: &str) -> Result<Self, CredentialError> {
        if raw.is_empty() {
            return Err(CredentialError::Empty);
        }

        Ok(Self(raw.to_string()))
    }

    /// Get the secret
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}
