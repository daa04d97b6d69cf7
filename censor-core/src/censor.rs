// censor-core/src/censor.rs
//! The `Censor` orchestrator: owns the configured engines, runs them over a
//! message, merges their results and masks text with the final verdict.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::config::{CensorConfig, CensorOptions, EngineConfig};
use crate::engine::CensorEngine;
use crate::engines::word_list::WordListEngine;
use crate::errors::CensorError;
use crate::result::{EngineResult, Penalty};

/// Runs a fixed, ordered set of engines over messages.
///
/// Immutable after construction, so one instance can serve concurrent callers.
pub struct Censor {
    engines: Vec<Box<dyn CensorEngine>>,
    options: CensorOptions,
}

impl std::fmt::Debug for Censor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Censor")
            .field("engines", &self.engines.iter().map(|e| e.name()).collect::<Vec<_>>())
            .field("options", &self.options)
            .finish()
    }
}

impl Censor {
    pub fn new(engines: Vec<Box<dyn CensorEngine>>, options: CensorOptions) -> Self {
        debug!("Censor configured with {} engine(s).", engines.len());
        Self { engines, options }
    }

    /// Builds every configured engine, in order.
    pub fn from_config(config: CensorConfig) -> Result<Self, CensorError> {
        let engines = config
            .engines
            .into_iter()
            .map(|engine| -> Result<Box<dyn CensorEngine>, CensorError> {
                match engine {
                    EngineConfig::WordList(cfg) => Ok(Box::new(WordListEngine::new(cfg)?)),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(engines, config.options))
    }

    pub fn options(&self) -> &CensorOptions {
        &self.options
    }

    pub fn engines(&self) -> impl Iterator<Item = &dyn CensorEngine> {
        self.engines.iter().map(|e| e.as_ref())
    }

    /// Runs every engine over `text` and resolves their matches into one verdict.
    ///
    /// With no engines configured the whole text is masked.
    pub fn run(&self, text: &str) -> Result<Penalty, CensorError> {
        let results = self
            .engines
            .iter()
            .map(|engine| engine.run(text))
            .collect::<Result<Vec<EngineResult>, _>>()?;

        let Some(mut merged) = EngineResult::merge(results)? else {
            debug!("No engines configured; masking the entire message.");
            return Ok(Penalty::redact_all(text));
        };

        let penalty = merged.to_penalty();
        debug!(
            "Run complete: {} surviving match(es), {} masked char(s), severity {}.",
            penalty.reasons.len(),
            penalty.redacted_count(),
            penalty.severity
        );
        Ok(penalty)
    }

    /// Masks a penalty's own text with the configured censor character.
    pub fn run_mask(&self, penalty: &Penalty) -> Result<String, CensorError> {
        apply_mask(&penalty.text, &penalty.mask, self.options.censor_char)
    }

    /// Runs and masks in one call.
    pub fn censor(&self, text: &str) -> Result<String, CensorError> {
        let penalty = self.run(text)?;
        self.run_mask(&penalty)
    }
}

/// Replaces every character whose mask entry is `false` with `censor_char`.
///
/// The mask must hold exactly one entry per character of `text`.
pub fn apply_mask(text: &str, mask: &[bool], censor_char: char) -> Result<String, CensorError> {
    let len = text.chars().count();
    if len != mask.len() {
        return Err(CensorError::LengthMismatch { text: len, mask: mask.len() });
    }
    Ok(text
        .chars()
        .zip(mask)
        .map(|(c, keep)| if *keep { c } else { censor_char })
        .collect())
}
