// censor-core/src/result.rs
//! Aggregation of engine matches into a per-character mask, conflict
//! resolution, and reduction to a final [`Penalty`].
//!
//! Resolution runs in three ordered passes over every position:
//!
//! 1. overwrite strategies (see [`Overwrite`](crate::censor_match::Overwrite)),
//! 2. whitelist dominance,
//! 3. orphan pruning of matches no bucket references any more.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::censor_match::{CensorMatch, MatchKind};
use crate::errors::CensorError;

/// The final verdict for one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Penalty {
    pub text: String,
    /// One entry per character: `true` keeps it, `false` redacts it.
    pub mask: Vec<bool>,
    pub reasons: Vec<String>,
    pub severity: u64,
}

impl Penalty {
    /// The verdict used when no engine is configured: nothing approved, so
    /// every character is redacted.
    pub fn redact_all(text: &str) -> Self {
        Self {
            text: text.to_string(),
            mask: vec![false; text.chars().count()],
            reasons: Vec::new(),
            severity: 0,
        }
    }

    pub fn redacted_count(&self) -> usize {
        self.mask.iter().filter(|keep| !**keep).count()
    }

    pub fn is_clean(&self) -> bool {
        self.severity == 0 && self.mask.iter().all(|keep| *keep)
    }
}

/// One bucket per character index, each holding the matches touching it in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct PositionMask {
    buckets: Vec<Vec<Arc<CensorMatch>>>,
}

impl PositionMask {
    fn with_len(len: usize) -> Self {
        Self { buckets: vec![Vec::new(); len] }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn bucket(&self, position: usize) -> Option<&[Arc<CensorMatch>]> {
        self.buckets.get(position).map(Vec::as_slice)
    }

    pub fn buckets(&self) -> impl Iterator<Item = &[Arc<CensorMatch>]> {
        self.buckets.iter().map(Vec::as_slice)
    }
}

/// Matches from one or more engine runs over a single text, plus the
/// [`PositionMask`] built from them.
#[derive(Debug, Clone)]
pub struct EngineResult {
    text: String,
    char_len: usize,
    matches: Vec<Arc<CensorMatch>>,
    mask: PositionMask,
}

impl EngineResult {
    /// Buckets every match by its positions. Fails if a match points past the
    /// end of `text`.
    pub fn new(text: &str, matches: Vec<CensorMatch>) -> Result<Self, CensorError> {
        let char_len = text.chars().count();
        let mut mask = PositionMask::with_len(char_len);
        let matches: Vec<Arc<CensorMatch>> = matches.into_iter().map(Arc::new).collect();

        for m in &matches {
            for &pos in m.positions() {
                let bucket = mask.buckets.get_mut(pos).ok_or_else(|| CensorError::PositionOutOfRange {
                    source_id: m.source().to_string(),
                    position: pos,
                    len: char_len,
                })?;
                bucket.push(Arc::clone(m));
            }
        }

        Ok(Self {
            text: text.to_string(),
            char_len,
            matches,
            mask,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn matches(&self) -> &[Arc<CensorMatch>] {
        &self.matches
    }

    pub fn mask(&self) -> &PositionMask {
        &self.mask
    }

    /// Appends the matches and buckets of `others` after this result's own,
    /// preserving their order.
    pub fn add_results(
        &mut self,
        others: impl IntoIterator<Item = EngineResult>,
    ) -> Result<&mut Self, CensorError> {
        for other in others {
            if other.text != self.text {
                return Err(CensorError::TextMismatch);
            }
            for (bucket, more) in self.mask.buckets.iter_mut().zip(other.mask.buckets) {
                bucket.extend(more);
            }
            self.matches.extend(other.matches);
        }
        Ok(self)
    }

    /// Merges results in the given order. `None` if `results` is empty.
    pub fn merge(
        results: impl IntoIterator<Item = EngineResult>,
    ) -> Result<Option<EngineResult>, CensorError> {
        let mut results = results.into_iter();
        let Some(mut first) = results.next() else {
            return Ok(None);
        };
        first.add_results(results)?;
        Ok(Some(first))
    }

    /// Folds every bucket through its matches' overwrite strategies.
    ///
    /// Buckets without any strategy are left alone. Elsewhere the accepted
    /// list starts empty and only strategies change it: a strategy's output
    /// replaces it (last strategy wins), a strategy yielding nothing leaves it
    /// as is. Matches without a strategy are not carried over.
    pub fn apply_overwrites(&mut self) -> &mut Self {
        for bucket in self.mask.buckets.iter_mut() {
            if bucket.iter().all(|m| m.overwrite().is_none()) {
                continue;
            }
            let mut accepted: Vec<Arc<CensorMatch>> = Vec::new();
            for m in bucket.iter().filter(|m| !m.overwrite().is_none()) {
                if let Some(replacement) = m.overwrite().resolve(m, &accepted) {
                    accepted = replacement;
                }
            }
            *bucket = accepted;
        }
        self
    }

    /// Any whitelist match at a position discards every blacklist match there.
    pub fn apply_whitelists(&mut self) -> &mut Self {
        for bucket in self.mask.buckets.iter_mut() {
            if bucket.iter().any(|m| m.is_whitelist()) {
                bucket.retain(|m| m.is_whitelist());
            }
        }
        self
    }

    /// Drops matches that no bucket references any more.
    pub fn remove_orphans(&mut self) -> &mut Self {
        let referenced: HashSet<*const CensorMatch> = self
            .mask
            .buckets
            .iter()
            .flatten()
            .map(Arc::as_ptr)
            .collect();
        let before = self.matches.len();
        self.matches.retain(|m| referenced.contains(&Arc::as_ptr(m)));
        debug!("Pruned {} orphaned matches, {} remain.", before - self.matches.len(), self.matches.len());
        self
    }

    pub fn clean_up(&mut self) -> &mut Self {
        self.apply_overwrites().apply_whitelists().remove_orphans()
    }

    /// Cleans up and reduces to the final verdict.
    pub fn to_penalty(&mut self) -> Penalty {
        self.clean_up();

        // After whitelist dominance a bucket never mixes kinds.
        let mask = self
            .mask
            .buckets
            .iter()
            .map(|bucket| match bucket.first() {
                None => true,
                Some(m) => m.kind() == MatchKind::Whitelist,
            })
            .collect();

        Penalty {
            text: self.text.clone(),
            mask,
            reasons: self.matches.iter().map(|m| m.reason().to_string()).collect(),
            severity: combined_severity(self.matches.iter().map(|m| m.severity())),
        }
    }
}

/// `floor(H + 0.1 * (S - H)^2)` for highest severity `H` and sum `S`; 0 when
/// `H` is 0.
pub fn combined_severity(severities: impl IntoIterator<Item = u32>) -> u64 {
    let (highest, sum) = severities
        .into_iter()
        .fold((0u64, 0u64), |(h, s), v| (h.max(u64::from(v)), s.saturating_add(u64::from(v))));
    if highest == 0 {
        return 0;
    }
    let rest = u128::from(sum - highest);
    let combined = u128::from(highest) + rest * rest / 10;
    u64::try_from(combined).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::censor_match::{MatchKind, Overwrite, OverwriteStrategy};

    fn blacklist(source: &str, severity: u32, positions: impl IntoIterator<Item = usize>) -> CensorMatch {
        CensorMatch::builder(source)
            .severity(severity)
            .reason(format!("{} hit", source))
            .positions(positions)
            .build()
            .unwrap()
    }

    fn whitelist(source: &str, positions: impl IntoIterator<Item = usize>) -> CensorMatch {
        CensorMatch::builder(source)
            .kind(MatchKind::Whitelist)
            .reason(format!("{} allowed", source))
            .positions(positions)
            .build()
            .unwrap()
    }

    #[test]
    fn test_combined_severity_values() {
        assert_eq!(combined_severity(std::iter::empty()), 0);
        assert_eq!(combined_severity([0, 0]), 0);
        assert_eq!(combined_severity([5]), 5);
        assert_eq!(combined_severity([1, 1]), 1);
        assert_eq!(combined_severity([1, 1, 1, 1]), 1 + 9 / 10);
        assert_eq!(combined_severity([3, 2, 2]), 3 + 16 / 10);
        assert_eq!(combined_severity([1; 11]), 11);
    }

    #[test]
    fn test_combined_severity_large_values_do_not_overflow() {
        assert_eq!(combined_severity([u32::MAX]), u64::from(u32::MAX));
        assert_eq!(combined_severity([u32::MAX; 3]), 7_378_697_630_342_814_105);
        assert_eq!(combined_severity([u32::MAX; 5]), u64::MAX);
    }

    #[test]
    fn test_every_position_gets_a_bucket() {
        let result = EngineResult::new("héllo", vec![]).unwrap();
        assert_eq!(result.char_len(), 5);
        assert_eq!(result.mask().len(), 5);
        assert!(result.mask().buckets().all(|b| b.is_empty()));
    }

    #[test]
    fn test_position_out_of_range_is_rejected() {
        let err = EngineResult::new("abc", vec![blacklist("a", 1, [3])]).unwrap_err();
        assert!(matches!(err, CensorError::PositionOutOfRange { position: 3, len: 3, .. }));
    }

    #[test]
    fn test_merge_preserves_engine_order() {
        let first = EngineResult::new("abcd", vec![blacklist("first", 1, [0, 1])]).unwrap();
        let second = EngineResult::new("abcd", vec![blacklist("second", 1, [1, 2])]).unwrap();

        let merged = EngineResult::merge([first, second]).unwrap().unwrap();
        let sources: Vec<&str> = merged.matches().iter().map(|m| m.source()).collect();
        assert_eq!(sources, ["first", "second"]);
        let bucket: Vec<&str> = merged.mask().bucket(1).unwrap().iter().map(|m| m.source()).collect();
        assert_eq!(bucket, ["first", "second"]);
    }

    #[test]
    fn test_merge_rejects_different_texts() {
        let a = EngineResult::new("abc", vec![]).unwrap();
        let b = EngineResult::new("xyz", vec![]).unwrap();
        assert!(matches!(EngineResult::merge([a, b]), Err(CensorError::TextMismatch)));
        assert!(EngineResult::merge(Vec::new()).unwrap().is_none());
    }

    #[test]
    fn test_whitelist_dominates_and_orphans_are_pruned() {
        let mut result = EngineResult::new(
            "badge",
            vec![blacklist("bl", 2, [0, 1, 2]), whitelist("wl", [0, 1, 2, 3, 4])],
        )
        .unwrap();

        let penalty = result.to_penalty();
        assert_eq!(penalty.mask, vec![true; 5]);
        assert_eq!(penalty.reasons, vec!["wl allowed".to_string()]);
        assert_eq!(penalty.severity, 0);
        assert_eq!(result.matches().len(), 1);
    }

    #[test]
    fn test_partially_whitelisted_blacklist_survives() {
        let mut result = EngineResult::new(
            "abcdef",
            vec![blacklist("bl", 4, [1, 2, 3, 4]), whitelist("wl", [3, 4])],
        )
        .unwrap();

        let penalty = result.to_penalty();
        assert_eq!(penalty.mask, vec![true, false, false, true, true, true]);
        assert_eq!(penalty.reasons, vec!["bl hit".to_string(), "wl allowed".to_string()]);
        assert_eq!(penalty.severity, 4);
    }

    #[test]
    fn test_no_strategies_leave_buckets_untouched() {
        let mut result = EngineResult::new("ab", vec![blacklist("x", 1, [0]), blacklist("y", 1, [0])]).unwrap();
        result.apply_overwrites();
        assert_eq!(result.mask().bucket(0).unwrap().len(), 2);
    }

    #[test]
    fn test_supersede_cancels_earlier_matches() {
        let replacing = CensorMatch::builder("late")
            .severity(3)
            .reason("late hit")
            .positions([0, 1])
            .overwrite(Overwrite::Supersede)
            .build()
            .unwrap();
        let mut result = EngineResult::new("abc", vec![blacklist("early", 7, [0, 1]), replacing]).unwrap();

        let penalty = result.to_penalty();
        assert_eq!(penalty.reasons, vec!["late hit".to_string()]);
        assert_eq!(penalty.severity, 3);
        assert_eq!(penalty.mask, vec![false, false, true]);
    }

    #[derive(Debug)]
    struct ClearAll;

    impl OverwriteStrategy for ClearAll {
        fn resolve(&self, _current: &Arc<CensorMatch>, _accepted: &[Arc<CensorMatch>]) -> Option<Vec<Arc<CensorMatch>>> {
            Some(Vec::new())
        }
    }

    #[derive(Debug)]
    struct Abstain;

    impl OverwriteStrategy for Abstain {
        fn resolve(&self, _current: &Arc<CensorMatch>, _accepted: &[Arc<CensorMatch>]) -> Option<Vec<Arc<CensorMatch>>> {
            None
        }
    }

    #[test]
    fn test_custom_strategy_can_clear_a_position() {
        let clear = CensorMatch::builder("clear")
            .positions([1])
            .overwrite(Overwrite::Custom(Arc::new(ClearAll)))
            .build()
            .unwrap();
        let mut result = EngineResult::new("abc", vec![blacklist("bl", 2, [0, 1]), clear]).unwrap();

        let penalty = result.to_penalty();
        // The blacklist still owns position 0, so it is not an orphan.
        assert_eq!(penalty.mask, vec![false, true, true]);
        assert_eq!(penalty.reasons, vec!["bl hit".to_string()]);
        assert_eq!(penalty.severity, 2);
    }

    #[derive(Debug)]
    struct KeepAccepted;

    impl OverwriteStrategy for KeepAccepted {
        fn resolve(&self, _current: &Arc<CensorMatch>, accepted: &[Arc<CensorMatch>]) -> Option<Vec<Arc<CensorMatch>>> {
            Some(accepted.to_vec())
        }
    }

    #[test]
    fn test_abstaining_strategy_keeps_nothing() {
        let abstain = CensorMatch::builder("abstain")
            .severity(9)
            .positions([0])
            .overwrite(Overwrite::Custom(Arc::new(Abstain)))
            .build()
            .unwrap();
        let mut result = EngineResult::new("ab", vec![blacklist("bl", 1, [0, 1]), abstain]).unwrap();

        let penalty = result.to_penalty();
        // Position 1 has no strategy, so the blacklist survives there.
        assert_eq!(penalty.mask, vec![true, false]);
        assert_eq!(penalty.reasons, vec!["bl hit".to_string()]);
        assert_eq!(penalty.severity, 1);
    }

    #[test]
    fn test_matches_without_strategy_are_not_carried_into_a_strategy_bucket() {
        let keep = CensorMatch::builder("keep")
            .reason("keep")
            .positions([0])
            .overwrite(Overwrite::Custom(Arc::new(KeepAccepted)))
            .build()
            .unwrap();
        let mut result = EngineResult::new("x", vec![blacklist("a", 5, [0]), keep]).unwrap();

        let penalty = result.to_penalty();
        assert_eq!(penalty.mask, vec![true]);
        assert!(penalty.reasons.is_empty());
        assert_eq!(penalty.severity, 0);
        assert!(result.matches().is_empty());
    }

    #[test]
    fn test_strategy_can_reinsert_an_earlier_strategy_match() {
        let first = CensorMatch::builder("first")
            .severity(2)
            .reason("first")
            .positions([0])
            .overwrite(Overwrite::Supersede)
            .build()
            .unwrap();
        let keep = CensorMatch::builder("keep")
            .positions([0])
            .overwrite(Overwrite::Custom(Arc::new(KeepAccepted)))
            .build()
            .unwrap();
        let mut result = EngineResult::new("x", vec![first, keep]).unwrap();

        let penalty = result.to_penalty();
        assert_eq!(penalty.mask, vec![false]);
        assert_eq!(penalty.reasons, vec!["first".to_string()]);
        assert_eq!(penalty.severity, 2);
    }

    #[test]
    fn test_last_strategy_wins() {
        let first = CensorMatch::builder("first")
            .reason("first")
            .positions([0])
            .overwrite(Overwrite::Supersede)
            .build()
            .unwrap();
        let second = CensorMatch::builder("second")
            .reason("second")
            .positions([0])
            .overwrite(Overwrite::Supersede)
            .build()
            .unwrap();
        let mut result = EngineResult::new("a", vec![blacklist("bl", 1, [0]), first, second]).unwrap();

        let penalty = result.to_penalty();
        assert_eq!(penalty.reasons, vec!["second".to_string()]);
    }

    #[test]
    fn test_redact_all_penalty() {
        let penalty = Penalty::redact_all("héé");
        assert_eq!(penalty.mask, vec![false; 3]);
        assert_eq!(penalty.redacted_count(), 3);
        assert!(!penalty.is_clean());
    }
}
