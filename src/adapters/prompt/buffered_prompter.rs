use std::io::{BufRead, Write};

use age::secrecy::SecretString;

use crate::core::errors::{KeyboxError, Result};
use crate::core::traits::prompter::Prompter;

/// Prompter that writes questions to `output` and reads answers line by
/// line from a buffered `input`.
///
/// Reads block until a full line arrives; there is no timeout.
pub struct BufferedPrompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> BufferedPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line without its line terminator.
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| KeyboxError::Input {
                detail: format!("failed to read from input: {e}"),
            })?;

        if read == 0 {
            return Err(KeyboxError::Input {
                detail: "input stream closed before an answer was given".into(),
            });
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Prompter for BufferedPrompter<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question} [y/N]: ")?;
        self.output.flush()?;

        let answer = self.read_line()?.trim().to_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }

    fn read_passphrase(&mut self, prompt: &str) -> Result<SecretString> {
        write!(self.output, "{prompt} ")?;
        self.output.flush()?;

        let passphrase = self.read_line()?;
        if passphrase.is_empty() {
            return Err(KeyboxError::Input {
                detail: "no passphrase entered".into(),
            });
        }
        Ok(SecretString::from(passphrase))
    }
}
