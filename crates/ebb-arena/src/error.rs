//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during buffer operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// A buffer was created from an empty field.
    EmptyBuffer,
    /// A field does not match the buffer length fixed at construction.
    LengthMismatch {
        /// The buffer length.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBuffer => write!(f, "field buffers must hold at least one value"),
            Self::LengthMismatch { expected, actual } => {
                write!(f, "field length {actual} does not match buffer length {expected}")
            }
        }
    }
}

impl Error for ArenaError {}
