//! Errors reported by the validating dotv entry point.

use std::fmt;
use thiserror::Error;

/// Which operand a validation error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    X,
    Y,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::X => f.write_str("x"),
            Operand::Y => f.write_str("y"),
        }
    }
}

/// Caller errors caught by [`try_dotv`](super::try_dotv).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DotvError {
    /// A non-empty operand with stride zero.
    #[error("operand {operand} has a zero stride")]
    ZeroStride { operand: Operand },

    /// The slice is shorter than `n` elements at the given stride.
    #[error("operand {operand} needs {required} elements but holds {len}")]
    OutOfBounds {
        operand: Operand,
        required: usize,
        len: usize,
    },
}

/// Result type for dotv validation.
pub type Result<T> = std::result::Result<T, DotvError>;
