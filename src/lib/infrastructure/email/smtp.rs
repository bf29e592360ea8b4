//! SMTP email service implementation

use std::{fmt, time::Duration};

use async_trait::async_trait;
use clap::Parser;
use lettre::{
    address::Envelope,
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        client::{AsyncSmtpConnection, TlsParameters},
        extension::ClientId,
        Error,
    },
};
use tracing::{debug, warn};

use crate::domain::communication::{
    credentials::Credential,
    errors::SessionError,
    session::{SessionConnector, SubmissionSession},
};

/// Default submission host
pub const DEFAULT_HOST: &str = "smtp.gmail.com";

/// Default submission port (STARTTLS)
pub const DEFAULT_PORT: u16 = 587;

/// Default network timeout in seconds, matching lettre's transport default
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// SMTP configuration
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
pub struct SMTPConfig {
    /// The SMTP host
    #[arg(long = "smtp-host", env = "SMTP_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// The SMTP port
    #[arg(long = "smtp-port", env = "SMTP_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Network timeout for each SMTP command, in seconds
    #[arg(long = "smtp-timeout", env = "SMTP_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Name announced in EHLO; defaults to the local hostname
    #[arg(long = "smtp-helo-name", env = "SMTP_HELO_NAME")]
    pub helo_name: Option<String>,
}

impl Default for SMTPConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            helo_name: None,
        }
    }
}

impl SMTPConfig {
    fn client_id(&self) -> ClientId {
        self.helo_name
            .clone()
            .map(ClientId::Domain)
            .unwrap_or_default()
    }

    fn timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(self.timeout_secs))
    }
}

impl From<Error> for SessionError {
    fn from(err: Error) -> Self {
        debug!("lettre::transport::smtp::Error -> SessionError");

        // A reply error without a code means the server hung up mid-reply.
        if err.status().is_some() {
            SessionError::Rejected(err.to_string())
        } else if err.is_response() {
            SessionError::Dropped(err.to_string())
        } else if err.is_client() || err.is_tls() {
            SessionError::UnknownError(err.into())
        } else {
            SessionError::Dropped(err.to_string())
        }
    }
}

/// Opens SMTP sessions against the configured server
#[derive(Debug, Default, Clone)]
pub struct SMTPConnector {
    config: SMTPConfig,
}

impl SMTPConnector {
    /// Create a new SMTP connector
    pub fn new(config: SMTPConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionConnector for SMTPConnector {
    type Session = SMTPSession;

    async fn connect(&self) -> Result<SMTPSession, SessionError> {
        debug!(host = %self.config.host, port = self.config.port, "connecting");

        let hello_name = self.config.client_id();

        let connection = AsyncSmtpConnection::connect_tokio1(
            (self.config.host.as_str(), self.config.port),
            self.config.timeout(),
            &hello_name,
            None,
            None,
        )
        .await?;

        Ok(SMTPSession {
            connection,
            host: self.config.host.clone(),
            hello_name,
        })
    }
}

/// One open SMTP connection
pub struct SMTPSession {
    connection: AsyncSmtpConnection,
    host: String,
    hello_name: ClientId,
}

impl fmt::Debug for SMTPSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SMTPSession")
            .field("host", &self.host)
            .field("encrypted", &self.connection.is_encrypted())
            .finish()
    }
}

#[async_trait]
impl SubmissionSession for SMTPSession {
    async fn starttls(&mut self) -> Result<(), SessionError> {
        let parameters = TlsParameters::new(self.host.clone())?;

        self.connection
            .starttls(parameters, &self.hello_name)
            .await?;

        Ok(())
    }

    async fn login(
        &mut self,
        username: &str,
        credential: &Credential,
    ) -> Result<(), SessionError> {
        let credentials = Credentials::new(username.to_string(), credential.expose().to_string());

        self.connection
            .auth(&[Mechanism::Plain, Mechanism::Login], &credentials)
            .await?;

        Ok(())
    }

    async fn submit(&mut self, envelope: &Envelope, message: &[u8]) -> Result<(), SessionError> {
        let response = self.connection.send(envelope, message).await?;

        debug!(code = %response.code(), "message accepted");

        Ok(())
    }

    async fn close(&mut self) {
        if let Err(err) = self.connection.quit().await {
            warn!(error = %err, "QUIT failed, aborting connection");

            self.connection.abort().await;
        }
    }
}
