//! Line-oriented operator console.
//!
//! [`Console`] wraps any `BufRead`/`Write` pair so the whole interactive
//! surface can be driven from a script in tests. [`run`] is the main loop.

mod error;
mod menu;
pub mod operations;
mod prompt;
pub mod render;

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::time::Duration;

pub use error::*;
pub use menu::{run, MainMenu, SearchMode};
pub use operations::Session;
pub use prompt::{parse_hour, parse_number, parse_option, MenuOption, Outcome};

pub struct Console<R, W> {
    input: R,
    output: W,
    error_delay: Duration,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            error_delay: Duration::ZERO,
        }
    }

    /// Pause applied after every reported error so the operator can read it.
    pub fn with_error_delay(mut self, delay: Duration) -> Self {
        self.error_delay = delay;
        self
    }

    /// Reads one line without its terminator. End of input is an error.
    ///
    /// Bytes that are not UTF-8 are replaced rather than rejected, so a stray
    /// byte becomes ordinary bad input for the current prompt.
    pub fn read_line(&mut self) -> Result<String, ConsoleError> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Err(ConsoleError::InputClosed);
        }
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Writes `label` without a newline and reads the answer.
    pub fn prompt(&mut self, label: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn say(&mut self, text: impl Display) -> Result<(), ConsoleError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn report(&mut self, error: &impl Display) -> Result<(), ConsoleError> {
        writeln!(self.output, "Error: {}", error)?;
        self.output.flush()?;
        if !self.error_delay.is_zero() {
            std::thread::sleep(self.error_delay);
        }
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
