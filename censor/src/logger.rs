// censor/src/logger.rs
//! Logger setup for the `censor` binary.
//!
//! `RUST_LOG` is honoured; an explicit level (from `--quiet`/`--debug`)
//! overrides it. Logs go to stderr so stdout stays clean for masked output.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger. Safe to call more than once.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None);
    let _ = builder.try_init();
}
