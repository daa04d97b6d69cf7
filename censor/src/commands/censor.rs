//! Censor command implementation: builds the engines from files and masks
//! messages from a file or stdin.

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use censor_core::{AlphabetTable, Censor, CensorConfig, CensorOptions, EngineConfig, Penalty, WordListConfig};

use crate::cli::Cli;
use crate::ui::output_format;

/// Options for the ergonomic `run_censor` API.
#[derive(Debug, Default)]
pub struct CensorRunOptions {
    pub input_file: Option<PathBuf>,
    pub line_buffered: bool,
    pub json: bool,
    pub quiet: bool,
}

impl From<&Cli> for CensorRunOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            input_file: cli.input_file.clone(),
            line_buffered: cli.line_buffered,
            json: cli.json,
            quiet: cli.quiet,
        }
    }
}

/// What a run saw, for exit-code decisions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub messages: usize,
    pub max_severity: u64,
}

/// Reads a word-list file, dropping one trailing line break so the list does
/// not end in an empty term.
pub fn load_word_list(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read word list {}", path.display()))?;
    let trimmed = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(&text);
    Ok(trimmed.to_string())
}

/// Assembles a `CensorConfig` from either `--config` or the individual files.
pub fn build_config(cli: &Cli) -> Result<CensorConfig> {
    let mut config = match &cli.config {
        Some(path) => CensorConfig::load_from_file(path)?,
        None => {
            let Some(blacklist_path) = &cli.blacklist else {
                bail!("Either --config or --blacklist must be provided.");
            };
            let alphabet = match &cli.alphabet {
                Some(path) => AlphabetTable::load_from_file(path)?,
                None => AlphabetTable::default(),
            };
            let blacklist = load_word_list(blacklist_path)?;
            let whitelist = match &cli.whitelist {
                Some(path) => load_word_list(path)?,
                None => String::new(),
            };
            CensorConfig {
                options: CensorOptions::default(),
                engines: vec![EngineConfig::WordList(WordListConfig::new(alphabet, blacklist, whitelist))],
            }
        }
    };

    if let Some(c) = cli.censor_char {
        config.options.censor_char = c;
    }
    for engine in config.engines.iter_mut() {
        match engine {
            EngineConfig::WordList(cfg) => {
                cfg.fold_confusables |= cli.fold_confusables;
                cfg.case_insensitive |= cli.case_insensitive;
            }
        }
    }
    config.validate()?;
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            info!("Reading input from stdin.");
            let mut buffer = String::new();
            io::Read::read_to_string(&mut io::stdin(), &mut buffer).context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Masks one message and writes either the masked text or a JSON report.
fn process_message<W: Write>(
    censor: &Censor,
    message: &str,
    opts: &CensorRunOptions,
    out: &mut W,
    outcome: &mut RunOutcome,
) -> Result<()> {
    let penalty = censor.run(message).context("Censoring failed")?;
    outcome.messages += 1;
    outcome.max_severity = outcome.max_severity.max(penalty.severity);

    if opts.json {
        serde_json::to_writer(&mut *out, &penalty).context("Failed to serialize penalty")?;
        writeln!(out)?;
    } else {
        let masked = censor.run_mask(&penalty)?;
        write!(out, "{}", masked)?;
        if opts.line_buffered {
            writeln!(out)?;
        }
    }

    if !opts.quiet && !opts.json {
        print_summary(&penalty)?;
    }
    Ok(())
}

fn print_summary(penalty: &Penalty) -> Result<()> {
    let stderr = io::stderr();
    let supports_color = stderr.is_terminal();
    output_format::print_penalty_summary(&mut stderr.lock(), penalty, supports_color)?;
    Ok(())
}

/// The main operation runner for the censor CLI.
pub fn run_censor(censor: &Censor, opts: CensorRunOptions) -> Result<RunOutcome> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let mut outcome = RunOutcome::default();

    if opts.line_buffered {
        debug!("Running in line-buffered mode.");
        let lines: Box<dyn BufRead> = match &opts.input_file {
            Some(path) => Box::new(io::BufReader::new(
                fs::File::open(path).with_context(|| format!("Failed to open input file: {}", path.display()))?,
            )),
            None => Box::new(io::stdin().lock()),
        };
        for line in lines.lines() {
            let line = line.context("Failed to read input line")?;
            process_message(censor, &line, &opts, &mut writer, &mut outcome)?;
            writer.flush()?;
        }
    } else {
        let input = read_input(opts.input_file.as_deref())?;
        process_message(censor, &input, &opts, &mut writer, &mut outcome)?;
        writer.flush()?;
    }

    info!("Censored {} message(s); highest severity {}.", outcome.messages, outcome.max_severity);
    Ok(outcome)
}

/// Prints a status line to stderr in the CLI's style.
pub fn warn_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

pub fn error_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}
