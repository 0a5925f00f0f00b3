//! One row per session that holds a given task id

use crate::aggregate::Rollup;
use crate::error::{Result, SeerError};
use crate::format::{
    format_count, format_duration, format_error_flag, format_flag, format_opt_count, format_score,
    format_weight,
};
use crate::metrics::{TaskMetrics, Weight};
use crate::sort::ColumnType::*;
use crate::table::{Column, Row, Table};
use crate::tree::dir_name;
use crate::view::summary::SummaryPanel;
use crate::view::Scan;

const COLUMNS: &[Column] = &[
    Column::new("SESSION", Identifier),
    Column::new("ERROR", SymbolFlag),
    Column::new("TEST", SymbolFlag),
    Column::new("TRAIN", SymbolFlag),
    Column::new("SCORE", Score),
    Column::new("STEPS", Count),
    Column::new("TIME", Duration),
    Column::new("IN", Count),
    Column::new("OUT", Count),
    Column::new("TOTAL", Count),
    Column::new("WEIGHT", WeightOrError),
];

pub(super) fn build(scan: &mut Scan, task: &str) -> Result<(Table, SummaryPanel)> {
    let mut found_in_any = false;
    let mut instances: Vec<TaskMetrics> = Vec::new();
    let mut table = Table::new(COLUMNS);
    let precision = scan.config.score_precision;

    for session_dir in scan.sessions.clone() {
        let task_dir = session_dir.join(task);
        if !task_dir.is_dir() {
            continue;
        }
        found_in_any = true;

        // instances without a readable summary are not listed here
        let entry = scan.task(&task_dir);
        let Some(metrics) = entry.metrics else {
            continue;
        };
        table.push(row(&dir_name(&session_dir), &metrics, precision));
        instances.push(metrics);
    }

    if !found_in_any {
        return Err(SeerError::TaskNotInAnySession {
            task: task.to_string(),
        });
    }

    let weight = scan.weights.weight(task);
    let rollup = Rollup::over(&instances);
    let count = rollup.children;
    let total_weight = match weight {
        Weight::Value(w) => Weight::Value(w.saturating_mul(count)),
        other => other,
    };

    let mut panel = SummaryPanel::default();
    panel
        .steps(rollup.steps, count)
        .duration(rollup.duration_seconds)
        .best(rollup.best_score, precision)
        .weight(total_weight)
        .count("instances", count)
        .pass_rates(
            rollup.test_passed,
            rollup.train_passed,
            count,
            scan.config.percent_precision,
        )
        .count("errors", rollup.error_count)
        .tokens(&rollup.tokens);
    Ok((table, panel))
}

fn row(session: &str, task: &TaskMetrics, precision: usize) -> Row {
    Row::new(
        session,
        vec![
            session.to_string(),
            format_error_flag(task.has_error),
            format_flag(task.test_passed),
            format_flag(task.train_passed),
            format_score(task.best_score, precision),
            format_count(task.step_count),
            format_duration(task.duration_seconds),
            format_opt_count(task.tokens.prompt),
            format_opt_count(task.tokens.candidates),
            format_opt_count(task.tokens.total),
            format_weight(task.weight),
        ],
    )
}
