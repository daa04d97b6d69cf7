// censor-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for using the censor in headless mode (non-UI).
//! Provides a helper for a full, one-shot masking of a string.

use anyhow::{Context, Result};

use crate::censor::Censor;
use crate::config::CensorConfig;

/// Builds a [`Censor`] from `config`, runs it over `content` and returns the
/// masked text.
///
/// Building the engines compiles every word list, so callers masking many
/// messages should build one `Censor` and reuse it instead.
pub fn headless_censor_string(config: CensorConfig, content: &str) -> Result<String> {
    let censor = Censor::from_config(config).context("Failed to build censor engines")?;
    let masked = censor.censor(content).context("Censoring failed")?;
    Ok(masked)
}
