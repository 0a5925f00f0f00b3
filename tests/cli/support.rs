use std::fs;
use std::path::Path;

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Get a Command for seernav
pub fn seernav() -> Command {
    cargo_bin_cmd!("seernav")
}

pub fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
}

/// Two sessions sharing task `t1`
///
/// ```text
/// s1/index.json            count=2 description="first run"
/// s1/t1/index.json         steps=3 score=1.5 test passed
/// s1/t1/task.json          weight 4
/// s1/t1/000/index.json
/// s1/t2/index.json         steps=1 has_errors
/// s2/t1/index.json         steps=2 score=0.5
/// ```
pub fn sample_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write_json(
        &root.join("s1/index.json"),
        &json!({"count": 2, "test_passed": 1, "description": "first run"}),
    );
    write_json(
        &root.join("s1/t1/index.json"),
        &json!({"steps": 3, "best_score": 1.5, "test_passed": true, "duration_seconds": 90}),
    );
    write_json(
        &root.join("s1/t1/task.json"),
        &json!({"train": [{"input": [[1]], "output": [[2]]}], "test": [{"input": [[3, 4]]}]}),
    );
    write_json(
        &root.join("s1/t1/000/index.json"),
        &json!({"attempts": 1, "best_score": 1.5}),
    );
    write_json(
        &root.join("s1/t2/index.json"),
        &json!({"steps": 1, "has_errors": true}),
    );
    write_json(
        &root.join("s2/t1/index.json"),
        &json!({"steps": 2, "best_score": 0.5, "test_passed": false}),
    );
    dir
}

pub fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}
