// censor/src/cli.rs
//! This file defines the command-line interface (CLI) for the censor
//! application.
//! License: MIT OR Apache-2.0

use clap::Parser;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "censor",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mask profanity in text using configurable word lists",
    long_about = "Censor runs text through configurable detector engines and masks every character they flag. Word lists and the confusable-alphabet table are loaded from files; messages are read from a file or stdin and written, masked, to stdout.",
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress the severity summary and all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a censor configuration file (YAML) with inline word lists.
    #[arg(
        long = "config",
        short = 'c',
        value_name = "FILE",
        env = "CENSOR_CONFIG",
        conflicts_with_all = ["alphabet", "blacklist", "whitelist"],
        help = "Load engines and options from a YAML configuration file."
    )]
    pub config: Option<PathBuf>,

    /// Path to the confusable-alphabet table (JSON).
    #[arg(long, value_name = "FILE", env = "CENSOR_ALPHABET", help = "Confusable-alphabet table (JSON).")]
    pub alphabet: Option<PathBuf>,

    /// Path to the newline-separated blacklist.
    #[arg(long, value_name = "FILE", env = "CENSOR_BLACKLIST", help = "Newline-separated blacklist terms.")]
    pub blacklist: Option<PathBuf>,

    /// Path to the newline-separated whitelist.
    #[arg(long, value_name = "FILE", env = "CENSOR_WHITELIST", help = "Newline-separated whitelist (exception) terms.")]
    pub whitelist: Option<PathBuf>,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Character substituted for masked characters.
    #[arg(long = "censor-char", value_name = "CHAR", help = "Character used for masked positions (default '#').")]
    pub censor_char: Option<char>,

    /// Match look-alike characters (e.g. '@' for 'a') using the alphabet table.
    #[arg(long = "fold-confusables", help = "Match look-alike characters using the alphabet table.")]
    pub fold_confusables: bool,

    /// Match word lists case-insensitively.
    #[arg(long = "case-insensitive", help = "Match word lists case-insensitively.")]
    pub case_insensitive: bool,

    /// Treat every input line as a separate message.
    #[arg(long = "line-buffered", help = "Treat every input line as a separate message and flush after each.")]
    pub line_buffered: bool,

    /// Print the penalty of every message as JSON instead of the masked text.
    #[arg(long = "json", help = "Print one JSON penalty report per message instead of masked text.")]
    pub json: bool,

    /// Exit with a non-zero code if any message's severity exceeds this threshold.
    #[arg(long = "fail-over-severity", value_name = "N", help = "Exit with a non-zero code if any message's severity exceeds N.")]
    pub fail_over_severity: Option<u64>,
}
