//! Credential prompt port

#[cfg(test)]
use mockall::mock;

/// Asks the user for their password in a masked modal.
pub trait CredentialPrompt {
    /// Show the prompt and wait for an answer.
    ///
    /// # Returns
    /// [`None`] if the user dismissed the prompt, otherwise the text entered,
    /// which may be empty.
    fn ask(&mut self) -> Option<String>;
}

#[cfg(test)]
mock! {
    pub CredentialPrompt {}

    impl CredentialPrompt for CredentialPrompt {
        fn ask(&mut self) -> Option<String>;
    }
}
