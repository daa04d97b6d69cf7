// censor/src/ui/output_format.rs
//! Formatting of status messages and per-message penalty summaries.
//!
//! Colour is applied only when the caller says the target supports it.

use std::io::{self, Write};

use censor_core::Penalty;
use owo_colors::OwoColorize;

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "warning:".yellow().bold(), msg)
    } else {
        writeln!(writer, "warning: {}", msg)
    }
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", "error:".red().bold(), msg)
    } else {
        writeln!(writer, "error: {}", msg)
    }
}

/// Groups reasons by text, keeping first-seen order.
pub fn count_reasons(reasons: &[String]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for reason in reasons {
        match counts.iter_mut().find(|(r, _)| *r == reason.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((reason.as_str(), 1)),
        }
    }
    counts
}

/// Writes a one-block summary: severity, masked character count and reasons.
pub fn print_penalty_summary<W: Write>(writer: &mut W, penalty: &Penalty, supports_color: bool) -> io::Result<()> {
    let severity = penalty.severity.to_string();
    let masked = format!("{}/{}", penalty.redacted_count(), penalty.mask.len());
    if supports_color {
        let severity = if penalty.severity == 0 {
            severity.green().to_string()
        } else {
            severity.red().bold().to_string()
        };
        writeln!(writer, "{} {}  {} {}", "Severity:".bold(), severity, "Masked:".bold(), masked)?;
    } else {
        writeln!(writer, "Severity: {}  Masked: {}", severity, masked)?;
    }

    for (reason, occurrences) in count_reasons(&penalty.reasons) {
        if supports_color {
            writeln!(writer, "  - {} ({})", reason.yellow(), occurrences)?;
        } else {
            writeln!(writer, "  - {} ({})", reason, occurrences)?;
        }
    }
    Ok(())
}
