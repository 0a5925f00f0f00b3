//! One row per distinct task id across every session

use crate::aggregate::{CrossSessionIndex, GlobalSummary, TaskAcrossSessions};
use crate::format::{
    format_count, format_duration, format_nonzero_count, format_score, format_weight,
};
use crate::metrics::Weight;
use crate::sort::ColumnType::*;
use crate::table::{Column, Row, Table};
use crate::tree::dir_name;
use crate::view::summary::{percent_of, SummaryPanel};
use crate::view::Scan;

const COLUMNS: &[Column] = &[
    Column::new("TASK", Identifier),
    Column::new("SESSIONS", Count),
    Column::new("ERRORS", Count),
    Column::new("TEST", Count),
    Column::new("TRAIN", Count),
    Column::new("STEPS", Count),
    Column::new("TIME", Duration),
    Column::new("BEST", Score),
    Column::new("IN", Count),
    Column::new("OUT", Count),
    Column::new("TOTAL", Count),
    Column::new("WEIGHT", WeightOrError),
];

#[tracing::instrument(skip(scan), fields(sessions = scan.sessions.len()))]
pub(super) fn build(scan: &mut Scan) -> (Table, SummaryPanel) {
    let mut index = CrossSessionIndex::new();
    for session_dir in scan.sessions.clone() {
        let session = dir_name(&session_dir);
        let (entries, _) = scan.tasks(&session_dir);
        for entry in entries {
            index.add(&session, &entry.id, entry.metrics);
        }
    }

    let tasks = index.finish(|id| scan.weights.weight(id));
    let precision = scan.config.score_precision;
    let mut table = Table::new(COLUMNS);
    for task in &tasks {
        table.push(row(task, precision));
    }

    let global = GlobalSummary::from_tasks(&tasks);
    (table, summarize(&global, scan))
}

fn row(task: &TaskAcrossSessions, precision: usize) -> Row {
    let t = &task.totals;
    Row::new(
        task.task_id.clone(),
        vec![
            task.task_id.clone(),
            format_count(task.sessions.len() as u64),
            format_nonzero_count(t.error_count),
            format_count(t.test_passed),
            format_count(t.train_passed),
            format_count(t.steps),
            format_duration(t.duration_seconds),
            format_score(t.best_score, precision),
            format_count(t.tokens.prompt),
            format_count(t.tokens.candidates),
            format_count(t.tokens.total),
            format_weight(task.weight),
        ],
    )
}

fn summarize(global: &GlobalSummary, scan: &Scan) -> SummaryPanel {
    let totals = &global.totals;
    let unique = global.unique.clone().unwrap_or_default();
    let precision = scan.config.percent_precision;
    let weight = if scan.config.weight_lookup {
        Weight::Value(totals.weight)
    } else {
        Weight::Skipped
    };

    let mut panel = SummaryPanel::default();
    panel
        .count("tasks", unique.unique_task_count)
        .count("sessions", global.sessions_involved.len() as u64)
        .count("steps", totals.steps)
        .duration(totals.duration_seconds)
        .weight(weight)
        .pass_rates(
            unique.passed_test,
            unique.passed_train,
            unique.unique_task_count,
            precision,
        )
        .push_with(
            "errors",
            format_count(unique.with_errors),
            percent_of(unique.with_errors, unique.unique_task_count, precision),
        )
        .tokens(&totals.tokens);
    panel
}
