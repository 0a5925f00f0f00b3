//! Aggregation over fixture result trees

mod common;

use common::Fixture;
use seernav_core::config::NavigatorConfig;
use seernav_core::tree::ResultTree;
use seernav_core::view::{build_view, ViewKind};
use serde_json::json;

fn cell<'a>(view: &'a seernav_core::view::View, row: &str, column: &str) -> &'a str {
    let col = view.table.column_index(column).unwrap();
    let row = view.table.row_index(row).unwrap();
    view.table.rows[row].cell(col)
}

fn summary<'a>(view: &'a seernav_core::view::View, label: &str) -> &'a str {
    &view.summary.get(label).unwrap().value
}

#[test]
fn test_session_without_summary_recomputed_from_tasks() {
    let fx = Fixture::new();
    fx.session("s1", None);
    fx.task("s1", "t1", Some(json!({"steps": 5, "duration_seconds": 10.0, "has_errors": false})));
    fx.task("s1", "t2", Some(json!({"steps": 3, "duration_seconds": 5.0, "has_errors": true})));
    fx.task("s1", "t3", None);

    let tree = ResultTree::open(fx.root()).unwrap();
    let config = NavigatorConfig::default();
    let sessions = build_view(&tree, &config, &ViewKind::Sessions).unwrap();

    assert_eq!(cell(&sessions, "s1", "STEPS"), "8");
    assert_eq!(cell(&sessions, "s1", "TIME"), "00:00:15");
    assert_eq!(cell(&sessions, "s1", "ERROR"), "1");

    let session = build_view(
        &tree,
        &config,
        &ViewKind::Session {
            session: "s1".into(),
        },
    )
    .unwrap();
    // the task without a summary keeps its row, metrics blank
    assert_eq!(session.table.rows.len(), 3);
    assert_eq!(cell(&session, "t3", "STEPS"), "-");
    assert_eq!(cell(&session, "t3", "TIME"), "-");
    assert_eq!(cell(&session, "t2", "ERROR"), "⚠");
}

#[test]
fn test_malformed_record_does_not_abort_siblings() {
    let fx = Fixture::new();
    fx.session("s1", Some(json!({"count": 2})));
    fx.raw("s1/t1/index.json", "{broken");
    fx.task("s1", "t2", Some(json!({"steps": 2, "test_passed": true})));

    let tree = ResultTree::open(fx.root()).unwrap();
    let view = build_view(
        &tree,
        &NavigatorConfig::default(),
        &ViewKind::Session {
            session: "s1".into(),
        },
    )
    .unwrap();

    assert_eq!(cell(&view, "t1", "TEST"), "-");
    assert_eq!(cell(&view, "t2", "TEST"), "✔");
    assert_eq!(summary(&view, "steps"), "2");
    assert_eq!(summary(&view, "tasks"), "2");
}

#[test]
fn test_weight_shared_across_instances() {
    let fx = Fixture::new();
    for session in ["s1", "s2", "s3"] {
        fx.session(session, None);
        fx.task(session, "t1", Some(json!({"steps": 1})));
    }
    // only the second session carries the descriptor
    fx.descriptor("s2", "t1", 5);

    let tree = ResultTree::open(fx.root()).unwrap();
    let view = build_view(
        &tree,
        &NavigatorConfig::default(),
        &ViewKind::TaskSessions { task: "t1".into() },
    )
    .unwrap();

    assert_eq!(view.table.rows.len(), 3);
    for session in ["s1", "s2", "s3"] {
        assert_eq!(cell(&view, session, "WEIGHT"), "10");
    }
    assert_eq!(summary(&view, "weight"), "30");
    assert_eq!(summary(&view, "instances"), "3");
}

#[test]
fn test_weight_sentinels() {
    let fx = Fixture::new();
    fx.session("s1", None);
    fx.task("s1", "bad", Some(json!({"steps": 1})));
    fx.raw("s1/bad/task.json", "not json");
    fx.task("s1", "none", Some(json!({"steps": 1})));

    let tree = ResultTree::open(fx.root()).unwrap();
    let view = build_view(
        &tree,
        &NavigatorConfig::default(),
        &ViewKind::Session {
            session: "s1".into(),
        },
    )
    .unwrap();

    assert_eq!(cell(&view, "bad", "WEIGHT"), "ERR");
    assert_eq!(cell(&view, "none", "WEIGHT"), "?");
    assert_eq!(summary(&view, "weight"), "0");
}

#[test]
fn test_disabled_weight_lookup_renders_missing() {
    let fx = Fixture::new();
    fx.session("s1", None);
    fx.task("s1", "t1", Some(json!({"steps": 1})));
    fx.descriptor("s1", "t1", 2);

    let tree = ResultTree::open(fx.root()).unwrap();
    let config = NavigatorConfig {
        weight_lookup: false,
        ..NavigatorConfig::default()
    };
    let view = build_view(&tree, &config, &ViewKind::Sessions).unwrap();
    assert_eq!(cell(&view, "s1", "WEIGHT"), "-");
}

#[test]
fn test_session_summary_overrides_recomputed_counts() {
    let fx = Fixture::new();
    fx.session(
        "s1",
        Some(json!({
            "count": 40,
            "total_steps": 120,
            "test_passed": 10,
            "train_passed": 12,
            "duration_seconds": 3725,
            "description": "baseline run",
            "tokens": {"prompt_tokens": 1500, "candidates_tokens": 500, "total_tokens": 2000}
        })),
    );
    fx.task("s1", "t1", Some(json!({"steps": 1, "best_score": 3.5})));
    fx.task("s1", "t2", Some(json!({"steps": 1, "best_score": 1.25})));

    let tree = ResultTree::open(fx.root()).unwrap();
    let config = NavigatorConfig::default();
    let sessions = build_view(&tree, &config, &ViewKind::Sessions).unwrap();
    assert_eq!(cell(&sessions, "s1", "TASKS"), "40");
    assert_eq!(cell(&sessions, "s1", "STEPS"), "120");
    assert_eq!(cell(&sessions, "s1", "TIME"), "01:02:05");
    assert_eq!(cell(&sessions, "s1", "IN"), "1,500");
    assert_eq!(cell(&sessions, "s1", "DESC"), "baseline run");
    assert_eq!(summary(&sessions, "sessions"), "1");

    let session = build_view(
        &tree,
        &config,
        &ViewKind::Session {
            session: "s1".into(),
        },
    )
    .unwrap();
    // best score always comes from the tasks
    assert_eq!(summary(&session, "best"), "1.25");
    let test = session.summary.get("test").unwrap();
    assert_eq!(test.extra.as_deref(), Some("25.0%"));
    assert_eq!(session.summary.get("train").unwrap().extra.as_deref(), Some("-2"));
}

#[test]
fn test_tasks_view_counts_unique_tasks() {
    let fx = Fixture::new();
    fx.session("s1", None);
    fx.session("s2", None);
    fx.task("s1", "t1", Some(json!({"steps": 2, "test_passed": true})));
    fx.task("s2", "t1", Some(json!({"steps": 3, "has_errors": true, "test_passed": false})));
    fx.task("s2", "t2", Some(json!({"steps": 1, "test_passed": false})));

    let tree = ResultTree::open(fx.root()).unwrap();
    let view = build_view(&tree, &NavigatorConfig::default(), &ViewKind::Tasks).unwrap();

    assert_eq!(cell(&view, "t1", "SESSIONS"), "2");
    assert_eq!(cell(&view, "t1", "STEPS"), "5");
    assert_eq!(cell(&view, "t1", "ERRORS"), "1");
    assert_eq!(summary(&view, "tasks"), "2");
    assert_eq!(summary(&view, "sessions"), "2");
    assert_eq!(summary(&view, "test"), "1");
    let errors = view.summary.get("errors").unwrap();
    assert_eq!(errors.value, "1");
    assert_eq!(errors.extra.as_deref(), Some("50.0%"));
}

#[test]
fn test_task_view_counts_files_without_summary() {
    let fx = Fixture::new();
    fx.session("s1", None);
    fx.task("s1", "t1", Some(json!({"steps": 2, "test_passed": true, "duration_seconds": 42})));
    fx.step(
        "s1",
        "t1",
        "000",
        Some(json!({"attempts": 2, "best_score": 4.0, "size_correct": true, "pixels_off": 1200})),
    );
    fx.step("s1", "t1", "001", None);
    fx.raw("s1/t1/001/response.json", "{}");
    fx.raw("s1/t1/001/code.py", "");

    let tree = ResultTree::open(fx.root()).unwrap();
    let view = build_view(
        &tree,
        &NavigatorConfig::default(),
        &ViewKind::Task {
            session: "s1".into(),
            task: "t1".into(),
        },
    )
    .unwrap();

    assert_eq!(cell(&view, "000", "PIXELS"), "1,200");
    assert_eq!(cell(&view, "000", "SIZE"), "✔");
    assert_eq!(cell(&view, "000", "FILES"), "1");
    assert_eq!(cell(&view, "001", "SCORE"), "-");
    assert_eq!(cell(&view, "001", "FILES"), "2");
    assert_eq!(summary(&view, "steps"), "2");
    assert_eq!(summary(&view, "attempts"), "2");
    assert_eq!(summary(&view, "time"), "00:00:42");
    assert_eq!(summary(&view, "test"), "✔");
}

#[test]
fn test_task_in_no_session_is_data_error() {
    let fx = Fixture::new();
    fx.session("s1", None);

    let tree = ResultTree::open(fx.root()).unwrap();
    let err = build_view(
        &tree,
        &NavigatorConfig::default(),
        &ViewKind::TaskSessions {
            task: "ghost".into(),
        },
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), seernav_core::error::ExitCode::Data);
}
