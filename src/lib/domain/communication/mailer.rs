//! Email service module

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::{
    credentials::Credential, errors::SendError, messages::OutgoingMessage,
};

/// Email service
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Send an email
    ///
    /// # Arguments
    /// * `message` - The [`OutgoingMessage`] to deliver.
    /// * `credential` - The sender's password, used for this call only.
    ///
    /// # Returns
    /// A [`Result`] which is [`Ok`] once the server has accepted the message,
    /// or an [`Err`] containing the [`SendError`] category of the failure.
    async fn send(&self, message: &OutgoingMessage, credential: &Credential)
        -> Result<(), SendError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    #[async_trait]
    impl Mailer for Mailer {
        async fn send(&self, message: &OutgoingMessage, credential: &Credential) -> Result<(), SendError>;
    }
}
