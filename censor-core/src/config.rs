//! Configuration management for `censor-core`.
//!
//! This module defines the serializable configuration for the orchestrator and
//! its engines. It handles deserialization of YAML (censor configuration) and
//! JSON (alphabet tables) and validates what it loads. The word lists and
//! alphabet are carried as already-loaded data; reading them from wherever they
//! live is up to the caller.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Maximum allowed length (in characters) of a single word-list term.
pub const MAX_TERM_LENGTH: usize = 500;

/// Default cap on matches a single pattern may produce for one input.
pub const DEFAULT_MAX_MATCHES: usize = 1000;

/// Default replacement character for masked positions.
pub const DEFAULT_CENSOR_CHAR: char = '#';

/// Confusable-character table, as found in `alphabet.json`.
///
/// Unknown fields are ignored so richer tables load unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlphabetTable {
    /// Clusters of interchangeable characters, e.g. `"a@4áà"`.
    #[serde(default)]
    pub similar: Vec<String>,
    /// The canonical alphabet clusters are folded into.
    #[serde(default)]
    pub latin: String,
}

impl AlphabetTable {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse alphabet table")
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read alphabet file {}", path.display()))?;
        let table = Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse alphabet file {}", path.display()))?;
        debug!("Loaded alphabet with {} confusable groups from {}.", table.similar.len(), path.display());
        Ok(table)
    }
}

fn default_severity() -> u32 {
    1
}

fn default_max_matches() -> usize {
    DEFAULT_MAX_MATCHES
}

/// Settings for the word-list engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WordListConfig {
    #[serde(default)]
    pub alphabet: AlphabetTable,
    /// Newline-separated blacklist terms.
    #[serde(default)]
    pub blacklist: String,
    /// Newline-separated whitelist (exception) terms.
    #[serde(default)]
    pub whitelist: String,
    /// Per-term severity overrides for blacklist hits.
    #[serde(default)]
    pub severities: HashMap<String, u32>,
    /// Severity for blacklist terms without an override.
    #[serde(default = "default_severity")]
    pub default_severity: u32,
    /// Hits allowed per pattern and input before the run fails.
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
    #[serde(default)]
    pub case_insensitive: bool,
    /// Scan the confusable-folded text instead of the raw text.
    #[serde(default)]
    pub fold_confusables: bool,
}

impl Default for WordListConfig {
    fn default() -> Self {
        Self {
            alphabet: AlphabetTable::default(),
            blacklist: String::new(),
            whitelist: String::new(),
            severities: HashMap::new(),
            default_severity: default_severity(),
            max_matches: DEFAULT_MAX_MATCHES,
            case_insensitive: false,
            fold_confusables: false,
        }
    }
}

impl WordListConfig {
    pub fn new(alphabet: AlphabetTable, blacklist: impl Into<String>, whitelist: impl Into<String>) -> Self {
        Self {
            alphabet,
            blacklist: blacklist.into(),
            whitelist: whitelist.into(),
            ..Self::default()
        }
    }

    fn validate(&self, errors: &mut Vec<String>) {
        if self.max_matches == 0 {
            errors.push("Word-list engine: `max_matches` must be greater than 0.".to_string());
        }
        for (term, _) in self.severities.iter() {
            if !split_terms(&self.blacklist).any(|t| t == term.as_str()) {
                warn!("Severity override for '{}' does not match any blacklist term.", term);
            }
        }
    }
}

/// Splits a newline-delimited word list into terms.
///
/// A trailing `\r` is dropped from each line. An entirely empty list has no
/// terms; any other empty line is kept as an empty term.
pub fn split_terms(list: &str) -> impl Iterator<Item = &str> {
    let lines = if list.is_empty() { None } else { Some(list.split('\n')) };
    lines
        .into_iter()
        .flatten()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Options owned by the orchestrator itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CensorOptions {
    /// Character substituted for every masked position.
    pub censor_char: char,
}

impl Default for CensorOptions {
    fn default() -> Self {
        Self { censor_char: DEFAULT_CENSOR_CHAR }
    }
}

/// One configured engine, tagged by `engine:` in YAML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "engine", rename_all = "snake_case")]
pub enum EngineConfig {
    WordList(WordListConfig),
}

/// Top-level configuration: orchestrator options plus engines in run order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CensorConfig {
    #[serde(default)]
    pub options: CensorOptions,
    #[serde(default)]
    pub engines: Vec<EngineConfig>,
}

impl CensorConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: CensorConfig = serde_yml::from_str(yaml).context("Failed to parse censor configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a censor configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading censor configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        info!("Loaded {} engine(s) from file {}.", config.engines.len(), path.display());
        Ok(config)
    }

    /// Validates option and engine integrity, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.options.censor_char.is_control() {
            errors.push(format!(
                "`censor_char` must be a printable character, got {:?}.",
                self.options.censor_char
            ));
        }
        for engine in &self.engines {
            match engine {
                EngineConfig::WordList(cfg) => cfg.validate(&mut errors),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_terms() {
        assert_eq!(split_terms("").count(), 0);
        assert_eq!(split_terms("bad\r\nworse").collect::<Vec<_>>(), ["bad", "worse"]);
        assert_eq!(split_terms("bad\n").collect::<Vec<_>>(), ["bad", ""]);
    }

    #[test]
    fn test_alphabet_ignores_unknown_fields() {
        let json = r#"{"similar": ["a@4"], "latin": "abc", "cyrillic": "абв", "latinToCyrillic": "x"}"#;
        let table = AlphabetTable::from_json_str(json).unwrap();
        assert_eq!(table.similar, vec!["a@4".to_string()]);
        assert_eq!(table.latin, "abc");
    }

    #[test]
    fn test_word_list_defaults() {
        let cfg: WordListConfig = serde_json::from_str(r#"{"blacklist": "bad"}"#).unwrap();
        assert_eq!(cfg.default_severity, 1);
        assert_eq!(cfg.max_matches, DEFAULT_MAX_MATCHES);
        assert!(!cfg.fold_confusables);
        assert_eq!(cfg, WordListConfig { blacklist: "bad".into(), ..WordListConfig::default() });
    }

    #[test]
    fn test_validate_rejects_zero_cap_and_control_char() {
        let config = CensorConfig {
            options: CensorOptions { censor_char: '\n' },
            engines: vec![EngineConfig::WordList(WordListConfig { max_matches: 0, ..Default::default() })],
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_matches"));
        assert!(err.contains("censor_char"));
    }
}
