// censor-core/src/engines/word_list.rs
//! A `CensorEngine` implementation that matches blacklist and whitelist word
//! lists with combined literal-alternation regular expressions.
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;

use log::debug;
use regex::Regex;

use crate::censor_match::{log_censor_match_debug, CensorMatch, MatchKind};
use crate::config::{split_terms, AlphabetTable, WordListConfig};
use crate::engine::CensorEngine;
use crate::errors::CensorError;
use crate::patterns::alphabet::ConfusableFold;
use crate::patterns::compiler::{compile_word_list, CompiledWordList};

/// Source identifier on every match this engine reports.
pub const WORD_LIST_SOURCE: &str = "word-list";
pub const BLACKLIST_REASON: &str = "Profanity";
pub const WHITELIST_REASON: &str = "Not Profanity";

/// Converts byte offsets of the scanned text into character indices.
struct CharIndex {
    starts: Vec<usize>,
}

impl CharIndex {
    fn new(text: &str) -> Self {
        Self { starts: text.char_indices().map(|(byte, _)| byte).collect() }
    }

    fn of_byte(&self, byte: usize) -> usize {
        self.starts.partition_point(|&start| start < byte)
    }
}

#[derive(Debug)]
pub struct WordListEngine {
    fold: ConfusableFold,
    blacklist: Option<CompiledWordList>,
    whitelist: Option<CompiledWordList>,
    severities: HashMap<String, u32>,
    /// Lowercased term to severity; the first term in list order wins.
    folded_severities: HashMap<String, u32>,
    default_severity: u32,
    max_matches: usize,
    case_insensitive: bool,
    fold_confusables: bool,
}

impl WordListEngine {
    /// Builds the fold map and compiles both word lists.
    pub fn new(config: WordListConfig) -> Result<Self, CensorError> {
        let fold = ConfusableFold::new(&config.alphabet);
        let blacklist = compile_word_list("blacklist", &config.blacklist, config.case_insensitive)?;
        let whitelist = compile_word_list("whitelist", &config.whitelist, config.case_insensitive)?;

        let mut severities: HashMap<String, u32> = split_terms(&config.blacklist)
            .map(|term| (term.to_string(), config.default_severity))
            .collect();
        severities.extend(config.severities);

        let mut folded_severities = HashMap::new();
        if config.case_insensitive {
            let mut extra: Vec<&String> = severities
                .keys()
                .filter(|term| !split_terms(&config.blacklist).any(|t| t == term.as_str()))
                .collect();
            extra.sort();
            let ordered = split_terms(&config.blacklist).chain(extra.into_iter().map(String::as_str));
            for term in ordered {
                let severity = severities.get(term).copied().unwrap_or(config.default_severity);
                folded_severities.entry(term.to_lowercase()).or_insert(severity);
            }
        }

        debug!(
            "Initialized WordListEngine: {} blacklist term(s), {} whitelist term(s), cap {} matches.",
            blacklist.as_ref().map_or(0, |c| c.term_count),
            whitelist.as_ref().map_or(0, |c| c.term_count),
            config.max_matches
        );

        Ok(Self {
            fold,
            blacklist,
            whitelist,
            severities,
            folded_severities,
            default_severity: config.default_severity,
            max_matches: config.max_matches,
            case_insensitive: config.case_insensitive,
            fold_confusables: config.fold_confusables,
        })
    }

    /// Convenience constructor from an alphabet and the two raw word lists.
    pub fn from_lists(alphabet: AlphabetTable, blacklist: &str, whitelist: &str) -> Result<Self, CensorError> {
        Self::new(WordListConfig::new(alphabet, blacklist, whitelist))
    }

    /// Folds confusable characters onto the canonical alphabet.
    pub fn to_latin(&self, text: &str) -> String {
        self.fold.to_latin(text)
    }

    fn severity_of(&self, matched: &str) -> u32 {
        if let Some(severity) = self.severities.get(matched) {
            return *severity;
        }
        if let Some(severity) = self.folded_severities.get(&matched.to_lowercase()) {
            return *severity;
        }
        self.default_severity
    }

    fn scan(
        &self,
        compiled: &CompiledWordList,
        kind: MatchKind,
        scanned: &str,
        index: &CharIndex,
        out: &mut Vec<CensorMatch>,
    ) -> Result<(), CensorError> {
        let regex: &Regex = &compiled.regex;
        let mut hits = 0usize;

        // A fresh iterator per call: no scan state survives between runs.
        for found in regex.find_iter(scanned) {
            hits += 1;
            if hits > self.max_matches {
                return Err(CensorError::RunawayMatchCount {
                    source_id: format!("{}/{}", WORD_LIST_SOURCE, compiled.name),
                    limit: self.max_matches,
                });
            }

            let start = index.of_byte(found.start());
            let end = index.of_byte(found.end());
            log_censor_match_debug(module_path!(), WORD_LIST_SOURCE, kind, found.as_str(), start, end);

            let (severity, reason) = match kind {
                MatchKind::Blacklist => (self.severity_of(found.as_str()), BLACKLIST_REASON),
                MatchKind::Whitelist => (0, WHITELIST_REASON),
            };
            out.push(
                CensorMatch::builder(WORD_LIST_SOURCE)
                    .kind(kind)
                    .severity(severity)
                    .reason(reason)
                    .positions(start..end)
                    .build()?,
            );
        }

        debug!("Word list '{}' produced {} hit(s).", compiled.name, hits);
        Ok(())
    }
}

impl CensorEngine for WordListEngine {
    fn name(&self) -> &str {
        WORD_LIST_SOURCE
    }

    fn find_matches(&self, text: &str) -> Result<Vec<CensorMatch>, CensorError> {
        let folded;
        let scanned = if self.fold_confusables {
            folded = self.to_latin(text);
            folded.as_str()
        } else {
            text
        };
        let index = CharIndex::new(scanned);

        let mut matches = Vec::new();
        if let Some(blacklist) = &self.blacklist {
            self.scan(blacklist, MatchKind::Blacklist, scanned, &index, &mut matches)?;
        }
        if let Some(whitelist) = &self.whitelist {
            self.scan(whitelist, MatchKind::Whitelist, scanned, &index, &mut matches)?;
        }
        Ok(matches)
    }
}
