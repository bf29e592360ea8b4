//! Compose form module.

mod errors;
mod fields;
mod form;
mod prompt;

pub use errors::{ComposeError, Notice};
pub use fields::{ComposeFields, Field};
pub use form::{ComposeForm, Status};
pub use prompt::CredentialPrompt;
