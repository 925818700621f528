//! # Error Types
//!
//! Errors raised by the shared primitives.

use thiserror::Error;

/// Checked arithmetic failures on `Amount`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AmountError {
    /// Addition or multiplication exceeded the representable range.
    #[error("Amount overflow: {lhs} {op} {rhs}")]
    Overflow { lhs: u128, op: char, rhs: u128 },

    /// Subtraction would produce a negative amount.
    #[error("Amount underflow: {lhs} - {rhs} is negative")]
    Underflow { lhs: u128, rhs: u128 },

    /// Ratio transform with a zero denominator.
    #[error("Division by zero")]
    DivisionByZero,
}

/// Malformed primitive values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The reserved all-zero hash.
    #[error("Empty hash")]
    EmptyHash,

    /// The reserved all-zero address.
    #[error("Null address")]
    NullAddress,

    /// Not a hex string.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded byte length does not match the fixed width.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
