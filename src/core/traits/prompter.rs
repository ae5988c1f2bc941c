use age::secrecy::SecretString;

use crate::core::errors::Result;

/// Port for interactive operator input.
pub trait Prompter {
    /// Ask a yes/no question. `Ok(false)` means the operator declined.
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Read a passphrase. Fails with `Input` on a closed stream or an
    /// empty answer.
    fn read_passphrase(&mut self, prompt: &str) -> Result<SecretString>;
}
