//! Submission session ports

use async_trait::async_trait;
use lettre::address::Envelope;

#[cfg(test)]
use mockall::mock;

use super::{credentials::Credential, errors::SessionError};

/// An open connection to a mail submission server.
///
/// Steps are driven strictly in order: [`starttls`](Self::starttls),
/// [`login`](Self::login), [`submit`](Self::submit). Whoever opened the
/// session must call [`close`](Self::close) exactly once, whatever the
/// outcome of the other steps.
#[async_trait]
pub trait SubmissionSession: Send {
    /// Upgrade the connection to TLS.
    async fn starttls(&mut self) -> Result<(), SessionError>;

    /// Authenticate with the given login pair.
    async fn login(&mut self, username: &str, credential: &Credential)
        -> Result<(), SessionError>;

    /// Submit one formatted message.
    async fn submit(&mut self, envelope: &Envelope, message: &[u8]) -> Result<(), SessionError>;

    /// End the session, releasing the connection.
    async fn close(&mut self);
}

/// Opens submission sessions against a fixed server.
#[async_trait]
pub trait SessionConnector: Send + Sync + 'static {
    /// The session type produced
    type Session: SubmissionSession;

    /// Connect to the server and return the open session.
    async fn connect(&self) -> Result<Self::Session, SessionError>;
}

#[cfg(test)]
mock! {
    pub SubmissionSession {}

    #[async_trait]
    impl SubmissionSession for SubmissionSession {
        async fn starttls(&mut self) -> Result<(), SessionError>;
        async fn login(&mut self, username: &str, credential: &Credential) -> Result<(), SessionError>;
        async fn submit(&mut self, envelope: &Envelope, message: &[u8]) -> Result<(), SessionError>;
        async fn close(&mut self);
    }
}

#[cfg(test)]
mock! {
    pub SessionConnector {}

    #[async_trait]
    impl SessionConnector for SessionConnector {
        type Session = MockSubmissionSession;

        async fn connect(&self) -> Result<MockSubmissionSession, SessionError>;
    }
}
