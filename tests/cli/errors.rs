use crate::cli::support::{sample_tree, seernav};
use predicates::prelude::*;

// ============================================================================
// Exit codes and error envelopes
// ============================================================================

#[test]
fn test_missing_root_is_data_error() {
    let dir = tempfile::tempdir().unwrap();

    seernav()
        .arg("--root")
        .arg(dir.path().join("nope"))
        .arg("sessions")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("sessions root not found"));
}

#[test]
fn test_unknown_session_is_data_error() {
    let dir = sample_tree();

    seernav()
        .arg("--root")
        .arg(dir.path())
        .args(["session", "s9"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("session not found: s9"));
}

#[test]
fn test_task_in_no_session_json_error() {
    let dir = sample_tree();

    seernav()
        .arg("--root")
        .arg(dir.path())
        .args(["--format", "json", "task-sessions", "ghost"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"task_not_in_any_session\""));
}

#[test]
fn test_unknown_sort_column_is_usage_error() {
    let dir = sample_tree();

    seernav()
        .arg("--root")
        .arg(dir.path())
        .args(["sessions", "--sort", "BOGUS"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown column"));
}

#[test]
fn test_unknown_format_is_usage_error() {
    let dir = sample_tree();

    seernav()
        .arg("--root")
        .arg(dir.path())
        .args(["--format", "xml", "sessions"])
        .assert()
        .code(2);
}

#[test]
fn test_malformed_config_is_usage_error() {
    let dir = sample_tree();
    std::fs::write(dir.path().join(".seernav.toml"), "score_precision = [").unwrap();

    seernav()
        .arg("--root")
        .arg(dir.path())
        .arg("sessions")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_quiet_suppresses_error_text() {
    let dir = tempfile::tempdir().unwrap();

    seernav()
        .arg("--root")
        .arg(dir.path().join("nope"))
        .args(["--quiet", "sessions"])
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_parse_error_with_uppercase_json_format_gives_envelope() {
    seernav()
        .args(["--format", "JSON", "sessions", "--bogus"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"usage_error\""));

    seernav()
        .args(["--format=Json", "sessions", "--bogus"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"usage_error\""));
}
