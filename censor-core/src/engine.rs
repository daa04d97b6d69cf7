// censor-core/src/engine.rs
//! Defines the core CensorEngine trait.
//!
//! The `CensorEngine` trait provides a pluggable interface for different
//! detection strategies (e.g., word lists). This module defines the contract
//! that all such engines must adhere to, so the [`Censor`](crate::Censor)
//! orchestrator can run them interchangeably.
//!
//! License: MIT OR APACHE 2.0

use crate::censor_match::CensorMatch;
use crate::errors::CensorError;
use crate::result::EngineResult;

/// A detector that reports position-tagged matches for a piece of text.
///
/// Engines are built once from owned configuration and must be read-only
/// afterwards: `find_matches` may be called concurrently from many threads.
pub trait CensorEngine: Send + Sync {
    /// A short, stable name used in logs.
    fn name(&self) -> &str;

    /// Scans `text` and returns every match, in the order the engine found them.
    ///
    /// Positions are character indices into `text`.
    fn find_matches(&self, text: &str) -> Result<Vec<CensorMatch>, CensorError>;

    /// Scans `text` and wraps the matches into an [`EngineResult`].
    fn run(&self, text: &str) -> Result<EngineResult, CensorError> {
        let matches = self.find_matches(text)?;
        EngineResult::new(text, matches)
    }
}
