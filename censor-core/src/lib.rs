// censor-core/src/lib.rs
//! # Censor Core Library
//!
//! `censor-core` provides the platform-independent logic for text moderation.
//! Text is run through one or more pluggable detector engines; their
//! position-tagged matches are merged, conflicts between them are resolved,
//! and the outcome is reduced to a single [`Penalty`]: a keep/redact mask per
//! character, the reasons for it, and a severity score.
//!
//! The library performs no I/O on the hot path. Engines and the [`Censor`]
//! orchestrator are built once from owned configuration and are read-only
//! afterwards, so a single instance can be shared across threads.
//!
//! ## Modules
//!
//! * `censor_match`: The [`CensorMatch`] report type and overwrite strategies.
//! * `engine`: The [`CensorEngine`] trait, the single extension point for detectors.
//! * `engines`: Concrete engines, currently the [`WordListEngine`].
//! * `patterns`: Word-list compilation and confusable-character folding.
//! * `result`: Match aggregation, conflict resolution and severity scoring.
//! * `censor`: The [`Censor`] orchestrator and [`apply_mask`].
//! * `config`: Serializable configuration for the orchestrator and engines.
//! * `headless`: A one-shot convenience wrapper.
//!
//! ## Usage Example
//!
//! ```rust
//! use censor_core::{AlphabetTable, Censor, CensorOptions, WordListEngine};
//!
//! fn main() -> Result<(), censor_core::CensorError> {
//!     let engine = WordListEngine::from_lists(AlphabetTable::default(), "bad", "badge")?;
//!     let censor = Censor::new(vec![Box::new(engine)], CensorOptions::default());
//!
//!     let penalty = censor.run("this badge is bad")?;
//!     assert_eq!(censor.run_mask(&penalty)?, "this badge is ###");
//!     assert_eq!(penalty.severity, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Core operations return [`CensorError`]; configuration loaders return
//! `anyhow::Result` with context describing the file involved.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod censor;
pub mod censor_match;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod patterns;
pub mod result;

/// Re-exports the orchestrator and the masking helper.
pub use censor::{apply_mask, Censor};

/// Re-exports match types and overwrite strategies.
pub use censor_match::{CensorMatch, CensorMatchBuilder, MatchKind, Overwrite, OverwriteStrategy};

/// Re-exports configuration types.
pub use config::{
    AlphabetTable,
    CensorConfig,
    CensorOptions,
    EngineConfig,
    WordListConfig,
    DEFAULT_CENSOR_CHAR,
    DEFAULT_MAX_MATCHES,
    MAX_TERM_LENGTH,
};

/// Re-exports the engine trait and the reference engine.
pub use engine::CensorEngine;
pub use engines::word_list::WordListEngine;

/// Re-exports the custom error type for clear error reporting.
pub use errors::CensorError;

/// Re-exports the one-shot helper.
pub use headless::headless_censor_string;

/// Re-exports aggregation types.
pub use result::{combined_severity, EngineResult, Penalty, PositionMask};
