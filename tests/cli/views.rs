use crate::cli::support::{sample_tree, seernav, stdout_json};
use predicates::prelude::*;

// ============================================================================
// View command tests
// ============================================================================

#[test]
fn test_help_lists_views() {
    seernav()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: seernav"))
        .stdout(predicate::str::contains("sessions"))
        .stdout(predicate::str::contains("task-sessions"));
}

#[test]
fn test_no_command_prints_version() {
    seernav()
        .assert()
        .success()
        .stdout(predicate::str::contains("seernav"));
}

#[test]
fn test_sessions_human_output() {
    let dir = sample_tree();

    seernav()
        .arg("--root")
        .arg(dir.path())
        .arg("sessions")
        .assert()
        .success()
        .stdout(predicate::str::contains("SESSION"))
        .stdout(predicate::str::contains("WEIGHT"))
        .stdout(predicate::str::contains("first run"))
        .stdout(predicate::str::contains("sessions:"))
        .stdout(predicate::str::contains("unsorted"));
}

#[test]
fn test_session_json_rows_and_summary() {
    let dir = sample_tree();

    let output = seernav()
        .arg("--root")
        .arg(dir.path())
        .args(["--format", "json", "session", "s1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["view"], "session");
    assert_eq!(json["rows"][0]["id"], "t1");
    assert_eq!(json["rows"][0]["cells"]["TEST"], "✔");
    assert_eq!(json["rows"][0]["cells"]["WEIGHT"], "4");
    assert_eq!(json["rows"][1]["cells"]["ERROR"], "⚠");
    assert!(json["sort"].is_null());
}

#[test]
fn test_repeated_sort_toggles_direction() {
    let dir = sample_tree();

    let output = seernav()
        .arg("--root")
        .arg(dir.path())
        .args(["--format", "json", "tasks", "--sort", "steps", "--sort", "STEPS"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["sort"]["column"], "STEPS");
    assert_eq!(json["sort"]["direction"], "desc");
    // t1 has 5 steps across two sessions, t2 has 1
    assert_eq!(json["rows"][0]["id"], "t1");
    assert_eq!(json["rows"][0]["cells"]["SESSIONS"], "2");
}

#[test]
fn test_focus_follows_row_through_sort() {
    let dir = sample_tree();

    let output = seernav()
        .arg("--root")
        .arg(dir.path())
        .args([
            "--format", "json", "task-sessions", "t1", "--focus", "s1", "--sort", "SCORE",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["rows"][0]["id"], "s2");
    assert_eq!(json["focus"]["id"], "s1");
    assert_eq!(json["focus"]["index"], 1);
}

#[test]
fn test_task_records_output() {
    let dir = sample_tree();

    seernav()
        .arg("--root")
        .arg(dir.path())
        .args(["--format", "records", "task", "s1", "t1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("H seernav=1 records=1 view=task"))
        .stdout(predicate::str::contains("S steps value=1"))
        .stdout(predicate::str::contains("R 000 STEP=000"));
}

#[test]
fn test_human_marks_focused_row() {
    let dir = sample_tree();

    seernav()
        .arg("--root")
        .arg(dir.path())
        .args(["session", "s1", "--focus", "t2", "--sort", "TASK"])
        .assert()
        .success()
        .stdout(predicate::str::contains("> t2"))
        .stdout(predicate::str::contains("sorted by TASK asc"));
}

#[test]
fn test_root_config_sets_default_sort() {
    let dir = sample_tree();
    std::fs::write(
        dir.path().join(".seernav.toml"),
        "[default_sort]\nsessions = \"SESSION\"\n",
    )
    .unwrap();

    let output = seernav()
        .arg("--root")
        .arg(dir.path())
        .args(["--format", "json", "sessions", "--sort", "SESSION"])
        .output()
        .unwrap();
    assert!(output.status.success());

    // default sort was ascending, the explicit request toggles it
    let json = stdout_json(&output);
    assert_eq!(json["sort"]["direction"], "desc");
    assert_eq!(json["rows"][0]["id"], "s2");
}
