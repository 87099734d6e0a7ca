//! # Console Module
//!
//! The line-based input/output boundary of the kiosk.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Console Boundary                                     │
//! │                                                                         │
//! │   stdin (BufRead) ──► read_line ──► parse_yes_no ──┐                   │
//! │                          ▲                         │ invalid            │
//! │                          └── "[ERROR] ..." ◄───────┘                   │
//! │                                                    │ Y / N              │
//! │                                                    ▼                    │
//! │                              ConfirmationPort::confirm ──► kiosk-core   │
//! │                                                                         │
//! │   kiosk-core ──► PurchaseResult / Vec<Product> ──► view ──► stdout      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Console`] is generic over its reader and writer so the whole dialogue
//! runs against in-memory buffers in tests.

pub mod view;

use std::io::{BufRead, Write};

use kiosk_core::validation::parse_yes_no;
use kiosk_core::{ConfirmationPort, Prompt};

use crate::error::AppError;

/// A reader/writer pair speaking to one buyer.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Gives back the writer (captured output in tests).
    pub fn into_output(self) -> W {
        self.output
    }

    /// Writes `text` followed by a newline.
    pub fn print(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Writes an error the way the buyer sees it.
    pub fn report(&mut self, err: &AppError) -> Result<(), AppError> {
        writeln!(self.output, "{err}")?;
        Ok(())
    }

    /// Shows `prompt` and reads one line, without its line ending.
    ///
    /// ## Errors
    /// `EndOfInput` once the reader is exhausted.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        writeln!(self.output, "\n{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::end_of_input());
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Asks until the buyer answers Y or N.
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool, AppError> {
        loop {
            let line = self.read_line(question)?;
            match parse_yes_no(&line) {
                Ok(answer) => return Ok(answer),
                Err(err) => self.report(&AppError::from(err))?,
            }
        }
    }
}

impl<R: BufRead, W: Write> ConfirmationPort for Console<R, W> {
    type Error = AppError;

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool, AppError> {
        self.ask_yes_no(&prompt.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_read_line_strips_line_ending() {
        let mut console = console("[Cola-2]\r\n");
        assert_eq!(console.read_line("Buy?").unwrap(), "[Cola-2]");
        assert!(output(console).contains("Buy?"));
    }

    #[test]
    fn test_read_line_at_eof() {
        let mut console = console("");
        assert!(console.read_line("Buy?").unwrap_err().is_end_of_input());
    }

    #[test]
    fn test_yes_no_reasks_until_valid() {
        let mut console = console("\nmaybe\n y \n");
        assert!(console.confirm(&Prompt::Membership).unwrap());

        let text = output(console);
        assert!(text.contains("[ERROR] No input was entered"));
        assert!(text.contains("[ERROR] Answer with Y or N"));
        assert_eq!(text.matches("membership discount").count(), 3);
    }
}
