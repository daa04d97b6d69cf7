// censor-core/src/censor_match.rs
//! Provides the `CensorMatch` report type, the overwrite resolution strategies
//! engines attach to matches, and PII-aware debug logging helpers.

use std::fmt;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CensorError;

lazy_static! {
    /// A static boolean that is initialized once to determine if matched text is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("CENSOR_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Source identifier reserved as "not set". Matches may never carry it.
pub const PLACEHOLDER_SOURCE: &str = "placeholder";

/// Reason used when an engine does not supply one.
pub const DEFAULT_REASON: &str = "No reason specified";

/// Whether a match claims a violation or explicitly clears one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    #[default]
    Blacklist,
    Whitelist,
}

/// A pluggable resolution strategy for [`Overwrite::Custom`].
///
/// `current` is the match carrying the strategy, `accepted` the matches accepted
/// so far at one character position, in order. Returning `None` leaves the
/// accepted list unchanged; returning `Some` replaces it. The carrying match is
/// only kept if the strategy puts it in the returned list.
pub trait OverwriteStrategy: Send + Sync + fmt::Debug {
    fn resolve(
        &self,
        current: &Arc<CensorMatch>,
        accepted: &[Arc<CensorMatch>],
    ) -> Option<Vec<Arc<CensorMatch>>>;
}

/// How a match interacts with matches proposed earlier at the same position.
#[derive(Debug, Clone, Default)]
pub enum Overwrite {
    /// No strategy. In a bucket where another match carries one, this match
    /// is dropped unless that strategy re-inserts it.
    #[default]
    None,
    /// Cancel every earlier match at the position and keep only this one.
    Supersede,
    /// Cancel earlier matches from the given source and append this one.
    SupersedeSource(String),
    /// Engine-defined strategy.
    Custom(Arc<dyn OverwriteStrategy>),
}

impl Overwrite {
    pub fn is_none(&self) -> bool {
        matches!(self, Overwrite::None)
    }

    /// Resolves this strategy against the accepted list at one position.
    ///
    /// `None` means "no replacement": the accepted list stays as it is.
    pub fn resolve(
        &self,
        current: &Arc<CensorMatch>,
        accepted: &[Arc<CensorMatch>],
    ) -> Option<Vec<Arc<CensorMatch>>> {
        match self {
            Overwrite::None => None,
            Overwrite::Supersede => Some(vec![Arc::clone(current)]),
            Overwrite::SupersedeSource(source) => {
                let mut kept: Vec<Arc<CensorMatch>> = accepted
                    .iter()
                    .filter(|m| m.source() != source.as_str())
                    .cloned()
                    .collect();
                kept.push(Arc::clone(current));
                Some(kept)
            }
            Overwrite::Custom(strategy) => strategy.resolve(current, accepted),
        }
    }
}

/// One detector's claim about a set of character positions.
///
/// Immutable after construction. Build one with [`CensorMatch::builder`].
#[derive(Debug, Clone)]
pub struct CensorMatch {
    id: Uuid,
    kind: MatchKind,
    severity: u32,
    source: String,
    reason: String,
    positions: Vec<usize>,
    overwrite: Overwrite,
}

impl CensorMatch {
    pub fn builder(source: impl Into<String>) -> CensorMatchBuilder {
        CensorMatchBuilder {
            kind: MatchKind::Blacklist,
            severity: 0,
            source: source.into(),
            reason: DEFAULT_REASON.to_string(),
            positions: Vec::new(),
            overwrite: Overwrite::None,
        }
    }

    /// Diagnostic identifier. Never meaningful for equality.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    pub fn is_whitelist(&self) -> bool {
        self.kind == MatchKind::Whitelist
    }

    pub fn severity(&self) -> u32 {
        self.severity
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Sorted, de-duplicated character indices.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn overwrite(&self) -> &Overwrite {
        &self.overwrite
    }
}

/// Builder for [`CensorMatch`]. `build` rejects placeholder sources.
#[derive(Debug, Clone)]
pub struct CensorMatchBuilder {
    kind: MatchKind,
    severity: u32,
    source: String,
    reason: String,
    positions: Vec<usize>,
    overwrite: Overwrite,
}

impl CensorMatchBuilder {
    pub fn kind(mut self, kind: MatchKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn severity(mut self, severity: u32) -> Self {
        self.severity = severity;
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn positions(mut self, positions: impl IntoIterator<Item = usize>) -> Self {
        self.positions = positions.into_iter().collect();
        self
    }

    pub fn overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn build(mut self) -> Result<CensorMatch, CensorError> {
        if self.source.is_empty() || self.source == PLACEHOLDER_SOURCE {
            return Err(CensorError::InvalidMatchConstruction(self.source));
        }
        self.positions.sort_unstable();
        self.positions.dedup();

        Ok(CensorMatch {
            id: Uuid::new_v4(),
            kind: self.kind,
            severity: self.severity,
            source: self.source,
            reason: self.reason,
            positions: self.positions,
            overwrite: self.overwrite,
        })
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", len)
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_censor_match_debug(
    module_path: &str,
    source: &str,
    kind: MatchKind,
    matched_text: &str,
    start: usize,
    end: usize,
) {
    debug!("{} Found {:?} match: Source='{}', Text='{}', Chars={}..{}",
        module_path,
        kind,
        source,
        get_loggable_content(matched_text),
        start,
        end
    );
}
