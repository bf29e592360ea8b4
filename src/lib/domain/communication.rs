//! Outgoing mail: message model, credentials and the dispatcher that submits them.

pub mod credentials;
pub mod dispatcher;
pub mod email_addresses;
pub mod errors;
pub mod mailer;
pub mod messages;
pub mod session;
