//! One row per step directory of a task

use crate::aggregate::Rollup;
use crate::config::NavigatorConfig;
use crate::error::Result;
use crate::format::{
    format_count, format_duration, format_error_flag, format_flag, format_opt_count, format_score,
    MISSING,
};
use crate::metrics::{extract_step, extract_task, StepMetrics};
use crate::record::read_index;
use crate::sort::ColumnType::*;
use crate::table::{Column, Row, Table};
use crate::tree::{count_files, dir_name, list_subdirs_lenient};
use crate::view::summary::SummaryPanel;
use crate::view::Scan;

const COLUMNS: &[Column] = &[
    Column::new("STEP", Identifier),
    Column::new("ERROR", SymbolFlag),
    Column::new("TEST", SymbolFlag),
    Column::new("TRAIN", SymbolFlag),
    Column::new("SCORE", Score),
    Column::new("SIZE", SymbolFlag),
    Column::new("PALETTE", SymbolFlag),
    Column::new("COLORS", SymbolFlag),
    Column::new("PIXELS", Count),
    Column::new("%", Score),
    Column::new("TIME", Duration),
    Column::new("ATTEMPTS", Count),
    Column::new("IN", Count),
    Column::new("OUT", Count),
    Column::new("TOTAL", Count),
    Column::new("FILES", Count),
];

pub(super) fn build(scan: &mut Scan, session: &str, task: &str) -> Result<(Table, SummaryPanel)> {
    let dir = scan.tree.task_dir(session, task)?;
    let own = read_index(&dir).into_found().map(|record| extract_task(&record));
    let weight = scan.weights.weight(task);

    let (step_dirs, _) = list_subdirs_lenient(&dir);
    let mut table = Table::new(COLUMNS);
    let mut steps = Vec::with_capacity(step_dirs.len());
    for step_dir in &step_dirs {
        let name = dir_name(step_dir);
        // files are counted even when the summary is unreadable
        let files = count_files(step_dir);
        let metrics = read_index(step_dir)
            .found()
            .map(|record| extract_step(record, files));
        table.push(row(&name, metrics.as_ref(), files, scan.config));
        steps.extend(metrics);
    }

    let rollup = Rollup::over(&steps);
    let duration = own
        .as_ref()
        .and_then(|t| t.duration_seconds)
        .or(rollup.duration_seconds);

    let mut panel = SummaryPanel::default();
    panel
        .count("steps", step_dirs.len() as u64)
        .count("attempts", rollup.attempts)
        .duration(duration)
        .best(rollup.best_score, scan.config.score_precision)
        .push("test", format_flag(own.as_ref().and_then(|t| t.test_passed)))
        .push("train", format_flag(own.as_ref().and_then(|t| t.train_passed)))
        .count("errors", rollup.error_count)
        .weight(weight)
        .tokens(&rollup.tokens);
    Ok((table, panel))
}

fn row(name: &str, step: Option<&StepMetrics>, files: usize, config: &NavigatorConfig) -> Row {
    let cells = match step {
        Some(step) => vec![
            name.to_string(),
            format_error_flag(step.has_error),
            format_flag(step.test_passed),
            format_flag(step.train_passed),
            format_score(step.best_score, config.score_precision),
            format_flag(step.size_correct),
            format_flag(step.palette_correct),
            format_flag(step.color_count_correct),
            format_opt_count(step.pixels_off),
            format_score(step.percent_correct, config.percent_precision),
            format_duration(step.duration_seconds),
            format_opt_count(step.attempts),
            format_opt_count(step.tokens.prompt),
            format_opt_count(step.tokens.candidates),
            format_opt_count(step.tokens.total),
            format_count(files as u64),
        ],
        None => {
            let mut cells = vec![name.to_string()];
            cells.resize(COLUMNS.len() - 1, MISSING.to_string());
            cells.push(format_count(files as u64));
            cells
        }
    };
    Row::new(name, cells)
}
