//! compiler.rs - Compiles word lists into combined alternation patterns.
//!
//! Every term is escaped as a literal and the terms are joined with `|`, so the
//! compiled pattern follows leftmost-first semantics: at a given start offset
//! the earliest listed term that matches wins.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::config::{split_terms, MAX_TERM_LENGTH};
use crate::errors::CensorError;

/// A word list compiled into one pattern.
#[derive(Debug, Clone)]
pub struct CompiledWordList {
    /// Name of the list, used in logs and errors.
    pub name: String,
    /// The combined alternation pattern.
    pub regex: Regex,
    /// Number of terms in the list, including empty ones.
    pub term_count: usize,
}

/// Escapes every term and joins them into one alternation.
pub fn alternation_pattern<'a>(terms: impl IntoIterator<Item = &'a str>) -> String {
    terms
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<String>>()
        .join("|")
}

/// Compiles a newline-delimited word list.
///
/// Returns `Ok(None)` for a list without terms.
pub fn compile_word_list(
    name: &str,
    list: &str,
    case_insensitive: bool,
) -> Result<Option<CompiledWordList>, CensorError> {
    let terms: Vec<&str> = split_terms(list).collect();
    if terms.is_empty() {
        debug!("Word list '{}' is empty; no pattern compiled.", name);
        return Ok(None);
    }

    if let Some(term) = terms.iter().find(|t| t.chars().count() > MAX_TERM_LENGTH) {
        return Err(CensorError::TermLengthExceeded(
            name.to_string(),
            term.chars().count(),
            MAX_TERM_LENGTH,
        ));
    }

    let empty_terms = terms.iter().filter(|t| t.is_empty()).count();
    if empty_terms > 0 {
        warn!(
            "Word list '{}' contains {} empty term(s); they match at every position.",
            name, empty_terms
        );
    }

    debug!("Compiling word list '{}' with {} terms.", name, terms.len());
    let pattern = alternation_pattern(terms.iter().copied());
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(case_insensitive)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|e| CensorError::PatternCompilation(name.to_string(), e))?;

    debug!("Word list '{}' compiled successfully.", name);
    Ok(Some(CompiledWordList {
        name: name.to_string(),
        regex,
        term_count: terms.len(),
    }))
}
