use std::io;

use thiserror::Error;

use crate::models::Hour;
use crate::store::StoreError;

/// Expected, operator-correctable outcomes. Each one is reported and followed
/// by the retry-or-abort prompt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Failure {
    #[error("Room {0} was not found")]
    NotFound(String),

    #[error("Room {0} already exists")]
    AlreadyExists(String),

    #[error("Room {room_no} is already booked for {}", .hour.label())]
    SlotConflict { room_no: String, hour: Hour },

    #[error("Invalid input {input:?}: expected {expected}")]
    InvalidInput {
        input: String,
        expected: &'static str,
    },

    #[error("{0:?} is not one of the listed options")]
    InvalidOption(String),
}

impl From<StoreError> for Failure {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(room_no) => Self::NotFound(room_no),
            StoreError::AlreadyExists(room_no) => Self::AlreadyExists(room_no),
        }
    }
}

/// Faults of the console itself. These end the interaction loop.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Input closed")]
    InputClosed,

    #[error("Console I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Why an operation attempt stopped short.
#[derive(Debug)]
pub enum Interrupt {
    /// Reported, then the operator may retry.
    Failure(Failure),
    /// Propagated out of the interaction loop.
    Fatal(ConsoleError),
}

impl From<Failure> for Interrupt {
    fn from(e: Failure) -> Self {
        Self::Failure(e)
    }
}

impl From<StoreError> for Interrupt {
    fn from(e: StoreError) -> Self {
        Self::Failure(e.into())
    }
}

impl From<ConsoleError> for Interrupt {
    fn from(e: ConsoleError) -> Self {
        Self::Fatal(e)
    }
}
