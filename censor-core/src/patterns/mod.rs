//! Pattern building for the word-list engine.
//!
//! This module turns newline-delimited word lists into combined literal
//! alternation patterns and builds the confusable-character fold map used to
//! normalize look-alike characters to a canonical alphabet.
//!
//! It works closely with `config` (for word-list and alphabet definitions) and
//! `engines::word_list` (which scans text with the compiled patterns).

pub mod alphabet;
pub mod compiler;
