use crate::cli::support::{sample_tree, seernav};
use predicates::prelude::*;

// ============================================================================
// Logging flag tests
// ============================================================================

#[test]
fn test_log_level_debug_shows_debug_messages() {
    let dir = sample_tree();

    seernav()
        .arg("--root")
        .arg(dir.path())
        .args(["--log-level", "debug", "sessions"])
        .env_remove("SEERNAV_LOG")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args"));
}

#[test]
fn test_default_level_hides_debug_messages() {
    let dir = sample_tree();

    seernav()
        .arg("--root")
        .arg(dir.path())
        .arg("sessions")
        .env_remove("SEERNAV_LOG")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("parse_args").not());
}

#[test]
fn test_malformed_record_logged_as_warning() {
    let dir = sample_tree();
    std::fs::write(dir.path().join("s2/t1/index.json"), "{oops").unwrap();

    seernav()
        .arg("--root")
        .arg(dir.path())
        .args(["session", "s2"])
        .env_remove("SEERNAV_LOG")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("Malformed summary"));
}

#[test]
fn test_log_json_emits_json_lines() {
    let dir = sample_tree();

    seernav()
        .arg("--root")
        .arg(dir.path())
        .args(["--verbose", "--log-json", "sessions"])
        .env_remove("SEERNAV_LOG")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("\"level\":\"DEBUG\""));
}
