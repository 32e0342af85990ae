//! Validated prompts and the retry-or-abort loop every operation runs in.

use std::io::{BufRead, Write};

use crate::models::Hour;

use super::{Console, ConsoleError, Failure, Interrupt};

const RETRY_PROMPT: &str = "Press Enter to return to the menu, or type anything to try again: ";

/// Result of an operation that ran to completion or was given up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    Aborted,
}

/// A numbered entry of a menu.
pub trait MenuOption: Copy + 'static {
    fn all() -> &'static [Self];
    fn number(self) -> u32;
    fn label(self) -> &'static str;
}

/// Accepts ASCII digits only: no sign, no whitespace, not empty.
pub fn parse_number(raw: &str) -> Result<u32, Failure> {
    let invalid = || Failure::InvalidInput {
        input: raw.to_string(),
        expected: "a non-negative whole number",
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse().map_err(|_| invalid())
}

pub fn parse_hour(raw: &str) -> Result<Hour, Failure> {
    parse_number(raw)
        .ok()
        .and_then(Hour::new)
        .ok_or_else(|| Failure::InvalidInput {
            input: raw.to_string(),
            expected: "an hour between 0 and 23",
        })
}

/// Accepts the number of one of `T`'s options.
pub fn parse_option<T: MenuOption>(raw: &str) -> Result<T, Failure> {
    raw.parse::<u32>()
        .ok()
        .and_then(|n| T::all().iter().copied().find(|o| o.number() == n))
        .ok_or_else(|| Failure::InvalidOption(raw.to_string()))
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Prompts once and runs the answer through `validate`.
    pub fn ask<T>(
        &mut self,
        label: &str,
        validate: impl FnOnce(&str) -> Result<T, Failure>,
    ) -> Result<T, Interrupt> {
        let raw = self.prompt(label)?;
        Ok(validate(&raw)?)
    }

    /// Runs `attempt` until it succeeds or the operator gives up.
    ///
    /// After a [`Failure`] the operator answers the retry prompt: an empty
    /// line aborts, anything else restarts `attempt` from the top.
    pub fn retrying<T>(
        &mut self,
        mut attempt: impl FnMut(&mut Self) -> Result<T, Interrupt>,
    ) -> Result<Outcome<T>, ConsoleError> {
        loop {
            match attempt(self) {
                Ok(value) => return Ok(Outcome::Done(value)),
                Err(Interrupt::Failure(failure)) => {
                    tracing::warn!("{}", failure);
                    self.report(&failure)?;
                    if self.prompt(RETRY_PROMPT)?.is_empty() {
                        return Ok(Outcome::Aborted);
                    }
                }
                Err(Interrupt::Fatal(e)) => return Err(e),
            }
        }
    }
}
