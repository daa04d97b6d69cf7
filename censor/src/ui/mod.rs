//! Terminal output helpers for the `censor` binary.

pub mod output_format;
