//! Command implementations for the `censor` binary.

pub mod censor;
