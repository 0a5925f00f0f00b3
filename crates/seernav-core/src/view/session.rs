//! One row per task directory of a session

use crate::error::Result;
use crate::format::{
    format_count, format_duration, format_error_flag, format_flag, format_opt_count, format_score,
    format_weight, MISSING,
};
use crate::sort::ColumnType::*;
use crate::table::{Column, Row, Table};
use crate::view::summary::SummaryPanel;
use crate::view::{Scan, TaskEntry};

const COLUMNS: &[Column] = &[
    Column::new("TASK", Identifier),
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

pub(super) fn build(scan: &mut Scan, session: &str) -> Result<(Table, SummaryPanel)> {
    let dir = scan.tree.session_dir(session)?;
    let (metrics, entries) = scan.session(&dir);
    let precision = scan.config.score_precision;

    let mut table = Table::new(COLUMNS);
    for entry in &entries {
        table.push(row(entry, precision));
    }

    let mut panel = SummaryPanel::default();
    panel
        .steps(metrics.total_steps, metrics.task_count)
        .duration(metrics.total_duration_seconds)
        .best(metrics.best_score, precision)
        .weight(metrics.total_weight)
        .count("tasks", metrics.task_count)
        .pass_rates(
            metrics.test_passed_count,
            metrics.train_passed_count,
            metrics.task_count,
            scan.config.percent_precision,
        )
        .count("errors", metrics.error_task_count)
        .tokens(&metrics.tokens);
    Ok((table, panel))
}

fn row(entry: &TaskEntry, precision: usize) -> Row {
    let weight = format_weight(entry.weight);
    let cells = match &entry.metrics {
        Some(task) => vec![
            entry.id.clone(),
            format_error_flag(task.has_error),
            format_flag(task.test_passed),
            format_flag(task.train_passed),
            format_score(task.best_score, precision),
            format_count(task.step_count),
            format_duration(task.duration_seconds),
            format_opt_count(task.tokens.prompt),
            format_opt_count(task.tokens.candidates),
            format_opt_count(task.tokens.total),
            weight,
        ],
        None => {
            let mut cells = vec![entry.id.clone()];
            cells.resize(COLUMNS.len() - 1, MISSING.to_string());
            cells.push(weight);
            cells
        }
    };
    Row::new(entry.id.clone(), cells)
}
