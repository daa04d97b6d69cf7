//! errors.rs - Custom error types for the censor-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `censor-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CensorError {
    /// A detector tried to build a match without a real source identifier.
    #[error("Invalid match construction: source identifier '{0}' is not allowed")]
    InvalidMatchConstruction(String),

    #[error("Scan for '{source_id}' produced more than {limit} matches; refusing pathological input")]
    RunawayMatchCount { source_id: String, limit: usize },

    #[error("Mask length ({mask}) does not match text length ({text})")]
    LengthMismatch { text: usize, mask: usize },

    #[error("Match from '{source_id}' covers position {position}, but the text is only {len} characters long")]
    PositionOutOfRange { source_id: String, position: usize, len: usize },

    #[error("Cannot merge engine results built for different texts")]
    TextMismatch,

    #[error("Failed to compile word list '{0}': {1}")]
    PatternCompilation(String, regex::Error),

    #[error("Word list '{0}': term length ({1}) exceeds maximum allowed ({2})")]
    TermLengthExceeded(String, usize, usize),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}
