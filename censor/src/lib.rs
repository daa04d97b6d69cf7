// censor/src/lib.rs
//! # Censor CLI Application
//!
//! This crate provides the command-line front end for `censor-core`. It loads
//! the alphabet table and word lists from disk, builds a `Censor`, and masks
//! messages read from a file or stdin.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

pub use commands::censor::{run_censor, CensorRunOptions, RunOutcome};
