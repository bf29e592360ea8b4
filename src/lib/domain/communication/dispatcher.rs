//! Mail dispatcher
//!
//! Runs one submission session per send: connect, STARTTLS, login, submit,
//! close. There is exactly one attempt per call and no retry.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use lettre::Message;
use tracing::{debug, info, warn};

use super::{
    credentials::Credential,
    errors::{SendError, SessionError},
    mailer::Mailer,
    messages::OutgoingMessage,
    session::{SessionConnector, SubmissionSession},
};

/// A step of the submission sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Connect,
    StartTls,
    Login,
    Submit,
}

impl Step {
    fn fail(self, err: SessionError) -> SendError {
        warn!(step = ?self, error = %err, "submission step failed");

        match (self, err) {
            (Step::Connect, _) => SendError::Connection,
            (Step::Login, SessionError::Rejected(_)) => SendError::Authentication,
            (_, SessionError::Dropped(_)) => SendError::Disconnected,
            (_, err) => SendError::Unclassified(err.to_string()),
        }
    }
}

/// [`Mailer`] that submits each message over a fresh session
pub struct MailDispatcher<C>
where
    C: SessionConnector,
{
    connector: Arc<C>,
}

impl<C> MailDispatcher<C>
where
    C: SessionConnector,
{
    /// Create a new dispatcher
    pub fn new(connector: Arc<C>) -> Self {
        Self { connector }
    }
}

impl<C> Clone for MailDispatcher<C>
where
    C: SessionConnector,
{
    fn clone(&self) -> Self {
        Self {
            connector: Arc::clone(&self.connector),
        }
    }
}

impl<C> fmt::Debug for MailDispatcher<C>
where
    C: SessionConnector,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailDispatcher").finish_non_exhaustive()
    }
}

async fn deliver<S>(
    session: &mut S,
    message: &OutgoingMessage,
    mime: &Message,
    credential: &Credential,
) -> Result<(), SendError>
where
    S: SubmissionSession,
{
    session.starttls().await.map_err(|e| Step::StartTls.fail(e))?;
    debug!("connection upgraded to TLS");

    session
        .login(message.sender.as_str(), credential)
        .await
        .map_err(|e| Step::Login.fail(e))?;
    debug!(sender = %message.sender, "authenticated");

    session
        .submit(mime.envelope(), &mime.formatted())
        .await
        .map_err(|e| Step::Submit.fail(e))?;

    Ok(())
}

#[async_trait]
impl<C> Mailer for MailDispatcher<C>
where
    C: SessionConnector,
{
    async fn send(
        &self,
        message: &OutgoingMessage,
        credential: &Credential,
    ) -> Result<(), SendError> {
        let mime = message.to_mime()?;

        let mut session = self
            .connector
            .connect()
            .await
            .map_err(|e| Step::Connect.fail(e))?;

        let outcome = deliver(&mut session, message, &mime, credential).await;

        session.close().await;

        if outcome.is_ok() {
            info!(recipient = %message.recipient, "message submitted");
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::anyhow;
    use testresult::TestResult;

    use crate::domain::communication::{
        email_addresses::EmailAddress,
        session::{MockSessionConnector, MockSubmissionSession},
    };

    use super::*;

    type CallLog = Arc<Mutex<Vec<String>>>;

    fn record(log: &CallLog, call: &str) {
        log.lock().unwrap().push(call.to_string());
    }

    fn message() -> TestResult<OutgoingMessage> {
        Ok(OutgoingMessage {
            sender: EmailAddress::new("a@x.com")?,
            recipient: EmailAddress::new("b@y.com")?,
            subject: "Hi".to_string(),
            body: "Test".to_string(),
        })
    }

    /// A session where every step succeeds unless overridden, logging each call.
    fn session_with(
        log: &CallLog,
        starttls: fn() -> Result<(), SessionError>,
        login: fn() -> Result<(), SessionError>,
        submit: fn() -> Result<(), SessionError>,
    ) -> MockSubmissionSession {
        let mut session = MockSubmissionSession::new();

        let calls = Arc::clone(log);
        session.expect_starttls().returning(move || {
            record(&calls, "starttls");
            starttls()
        });

        let calls = Arc::clone(log);
        session.expect_login().returning(move |username, credential| {
            record(
                &calls,
                &format!("login({},{})", username, credential.expose()),
            );
            login()
        });

        let calls = Arc::clone(log);
        session.expect_submit().returning(move |envelope, bytes| {
            let to = envelope
                .to()
                .iter()
                .map(|address| address.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let text = String::from_utf8_lossy(bytes);
            assert!(text.contains("Subject: Hi"));
            assert!(text.contains("Test"));
            record(&calls, &format!("submit({})", to));
            submit()
        });

        let calls = Arc::clone(log);
        session
            .expect_close()
            .times(1)
            .returning(move || record(&calls, "close"));

        session
    }

    fn connector_for(log: &CallLog, session: MockSubmissionSession) -> MockSessionConnector {
        let mut connector = MockSessionConnector::new();
        let calls = Arc::clone(log);

        connector.expect_connect().times(1).return_once(move || {
            record(&calls, "connect");
            Ok(session)
        });

        connector
    }

    fn ok() -> Result<(), SessionError> {
        Ok(())
    }

    #[tokio::test]
    async fn test_send_runs_steps_in_order() -> TestResult {
        let log = CallLog::default();
        let session = session_with(&log, ok, ok, ok);
        let dispatcher = MailDispatcher::new(Arc::new(connector_for(&log, session)));

        let credential = Credential::new("secret123")?;
        dispatcher.send(&message()?, &credential).await?;

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "connect",
                "starttls",
                "login(a@x.com,secret123)",
                "submit(b@y.com)",
                "close",
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_connect_failure_is_connection_error() -> TestResult {
        let mut connector = MockSessionConnector::new();

        connector
            .expect_connect()
            .times(1)
            .returning(|| Err(SessionError::Dropped("connection refused".to_string())));

        let dispatcher = MailDispatcher::new(Arc::new(connector));

        let result = dispatcher
            .send(&message()?, &Credential::new("secret123")?)
            .await;

        assert_eq!(result, Err(SendError::Connection));

        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_login_is_authentication_error() -> TestResult {
        let log = CallLog::default();
        let session = session_with(
            &log,
            ok,
            || Err(SessionError::Rejected("535 5.7.8 bad credentials".to_string())),
            ok,
        );
        let dispatcher = MailDispatcher::new(Arc::new(connector_for(&log, session)));

        let result = dispatcher
            .send(&message()?, &Credential::new("wrong")?)
            .await;

        assert_eq!(result, Err(SendError::Authentication));
        assert_eq!(
            *log.lock().unwrap(),
            vec!["connect", "starttls", "login(a@x.com,wrong)", "close"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_dropped_connection_is_disconnected() -> TestResult {
        let log = CallLog::default();
        let session = session_with(
            &log,
            ok,
            ok,
            || Err(SessionError::Dropped("connection reset by peer".to_string())),
        );
        let dispatcher = MailDispatcher::new(Arc::new(connector_for(&log, session)));

        let result = dispatcher
            .send(&message()?, &Credential::new("secret123")?)
            .await;

        assert_eq!(result, Err(SendError::Disconnected));
        assert_eq!(log.lock().unwrap().last().map(String::as_str), Some("close"));

        Ok(())
    }

    #[tokio::test]
    async fn test_dropped_during_login_is_disconnected() -> TestResult {
        let log = CallLog::default();
        let session = session_with(
            &log,
            ok,
            || Err(SessionError::Dropped("broken pipe".to_string())),
            ok,
        );
        let dispatcher = MailDispatcher::new(Arc::new(connector_for(&log, session)));

        let result = dispatcher
            .send(&message()?, &Credential::new("secret123")?)
            .await;

        assert_eq!(result, Err(SendError::Disconnected));

        Ok(())
    }

    #[tokio::test]
    async fn test_refused_starttls_is_unclassified_and_skips_login() -> TestResult {
        let log = CallLog::default();
        let session = session_with(
            &log,
            || Err(SessionError::Rejected("454 TLS not available".to_string())),
            ok,
            ok,
        );
        let dispatcher = MailDispatcher::new(Arc::new(connector_for(&log, session)));

        let result = dispatcher
            .send(&message()?, &Credential::new("secret123")?)
            .await;

        assert_eq!(
            result,
            Err(SendError::Unclassified("454 TLS not available".to_string()))
        );
        assert_eq!(*log.lock().unwrap(), vec!["connect", "starttls", "close"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_submit_error_is_unclassified() -> TestResult {
        let log = CallLog::default();
        let session = session_with(&log, ok, ok, || {
            Err(SessionError::UnknownError(anyhow!("something odd")))
        });
        let dispatcher = MailDispatcher::new(Arc::new(connector_for(&log, session)));

        let result = dispatcher
            .send(&message()?, &Credential::new("secret123")?)
            .await;

        assert_eq!(
            result,
            Err(SendError::Unclassified("something odd".to_string()))
        );
        assert_eq!(log.lock().unwrap().last().map(String::as_str), Some("close"));

        Ok(())
    }

    #[tokio::test]
    async fn test_unparseable_address_never_connects() -> TestResult {
        let mut connector = MockSessionConnector::new();
        connector.expect_connect().times(0);

        let dispatcher = MailDispatcher::new(Arc::new(connector));
        let mut outgoing = message()?;
        outgoing.recipient = EmailAddress::new("no at sign")?;

        let result = dispatcher
            .send(&outgoing, &Credential::new("secret123")?)
            .await;

        assert!(matches!(result, Err(SendError::Unclassified(_))));

        Ok(())
    }
}
