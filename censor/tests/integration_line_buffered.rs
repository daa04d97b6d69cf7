// censor/tests/integration_line_buffered.rs
//! Integration tests for the --line-buffered mode of censor.
//!
//! Every input line is treated as its own message: it gets its own penalty,
//! its own JSON report and is flushed as soon as it is masked.

use assert_cmd::Command;
use assert_cmd::assert::Assert;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

/// Helper function to create the word lists for testing.
fn create_word_lists(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
    let blacklist = dir.path().join("blacklist.txt");
    let whitelist = dir.path().join("whitelist.txt");
    fs::write(&blacklist, "darn\nheck\n").unwrap();
    fs::write(&whitelist, "heckle\n").unwrap();
    (blacklist, whitelist)
}

/// Helper to run a line-buffered command with piped stdin.
fn run_censor_with_stdin(input: &str, extra_args: &[&str]) -> Assert {
    let dir = tempdir().unwrap();
    let (blacklist, whitelist) = create_word_lists(&dir);

    let mut cmd = Command::cargo_bin("censor").unwrap();
    cmd.env_remove("CENSOR_CONFIG")
        .arg("--line-buffered")
        .arg("--blacklist")
        .arg(&blacklist)
        .arg("--whitelist")
        .arg(&whitelist)
        .args(extra_args);

    cmd.write_stdin(input).assert()
}

#[test]
fn test_line_buffered_masks_each_line() {
    run_censor_with_stdin("oh darn\nno heckle here\nwhat the heck\n", &["--quiet"])
        .success()
        .stdout(predicate::str::diff("oh ####\nno heckle here\nwhat the ####\n"));
}

#[test]
fn test_line_buffered_summary_per_line() {
    run_censor_with_stdin("darn\nfine\n", &[])
        .success()
        .stdout(predicate::str::diff("####\nfine\n"))
        .stderr(
            predicate::str::contains("Severity: 1  Masked: 4/4")
                .and(predicate::str::contains("Severity: 0  Masked: 0/4")),
        );
}

#[test]
fn test_line_buffered_empty_input() {
    run_censor_with_stdin("", &["--quiet"])
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_line_buffered_line_without_newline_at_end() {
    run_censor_with_stdin("darn it", &["--quiet"])
        .success()
        .stdout(predicate::str::diff("#### it\n"));
}

#[test]
fn test_line_buffered_json_reports() {
    let output = run_censor_with_stdin("heck\nheckle\n", &["--json"]).success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let reports: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["severity"], 1);
    assert_eq!(reports[1]["severity"], 0);
    assert_eq!(reports[1]["reasons"], serde_json::json!(["Not Profanity"]));
}
