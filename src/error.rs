//! Error types for disktree operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building a treemap.
///
/// Layout and rendering themselves never fail: degenerate-but-valid input
/// (empty tables, zero-sized boxes) produces a placeholder or an empty
/// render tree instead. Malformed input is rejected at build time; the
/// only other failure source is file I/O in the encoders.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when writing an encoded document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Negative or non-finite pixel dimensions.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: f64,
        /// Height value.
        height: f64,
    },

    /// An entry carries a NaN or infinite value.
    #[error("Non-finite value {value} for entry {name:?}")]
    NonFiniteValue {
        /// Name of the offending entry.
        name: String,
        /// The rejected value.
        value: f64,
    },
}
