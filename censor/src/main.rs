// censor/src/main.rs
//! Censor entry point.
//!
//! Builds the configured engines and masks the input.

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use censor::cli::Cli;
use censor::commands::censor::{build_config, error_msg, run_censor, warn_msg, CensorRunOptions};
use censor::logger;
use censor_core::Censor;

fn run(cli: &Cli) -> Result<bool> {
    let config = build_config(cli)?;
    if config.engines.is_empty() && !cli.quiet {
        warn_msg("No engines configured; every character will be masked.");
    }
    let censor = Censor::from_config(config).context("Failed to build censor engines")?;

    let outcome = run_censor(&censor, CensorRunOptions::from(cli))?;

    Ok(match cli.fail_over_severity {
        Some(threshold) if outcome.max_severity > threshold => {
            if !cli.quiet {
                warn_msg(format!(
                    "Severity {} exceeds the threshold of {}.",
                    outcome.max_severity, threshold
                ));
            }
            false
        }
        _ => true,
    })
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            error_msg(format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
