//! One row per session directory

use crate::aggregate::GlobalSummary;
use crate::format::{format_count, format_duration, format_nonzero_count, format_weight, MISSING};
use crate::metrics::{SessionMetrics, Weight};
use crate::sort::ColumnType::*;
use crate::table::{Column, Row, Table};
use crate::view::summary::SummaryPanel;
use crate::view::Scan;

const COLUMNS: &[Column] = &[
    Column::new("SESSION", Identifier),
    Column::new("ERROR", Count),
    Column::new("TEST", Count),
    Column::new("TRAIN", Count),
    Column::new("TASKS", Count),
    Column::new("STEPS", Count),
    Column::new("TIME", Duration),
    Column::new("IN", Count),
    Column::new("OUT", Count),
    Column::new("TOTAL", Count),
    Column::new("WEIGHT", WeightOrError),
    Column::new("DESC", Identifier),
];

pub(super) fn build(scan: &mut Scan) -> (Table, SummaryPanel) {
    let mut table = Table::new(COLUMNS);
    let mut sessions = Vec::with_capacity(scan.sessions.len());

    for dir in scan.sessions.clone() {
        let (metrics, _) = scan.session(&dir);
        table.push(row(&metrics));
        sessions.push(metrics);
    }

    let summary = summarize(&GlobalSummary::from_sessions(&sessions), scan);
    (table, summary)
}

fn row(session: &SessionMetrics) -> Row {
    Row::new(
        session.name.clone(),
        vec![
            session.name.clone(),
            format_nonzero_count(session.error_task_count),
            format_count(session.test_passed_count),
            format_count(session.train_passed_count),
            format_count(session.task_count),
            format_count(session.total_steps),
            format_duration(session.total_duration_seconds),
            format_count(session.tokens.prompt),
            format_count(session.tokens.candidates),
            format_count(session.tokens.total),
            format_weight(session.total_weight),
            session
                .description
                .clone()
                .unwrap_or_else(|| MISSING.to_string()),
        ],
    )
}

fn summarize(global: &GlobalSummary, scan: &Scan) -> SummaryPanel {
    let totals = &global.totals;
    let weight = if scan.config.weight_lookup {
        Weight::Value(totals.weight)
    } else {
        Weight::Skipped
    };

    let mut panel = SummaryPanel::default();
    panel
        .count("sessions", totals.children)
        .steps(totals.steps, totals.tasks)
        .duration(totals.duration_seconds)
        .weight(weight)
        .count("tasks", totals.tasks)
        .pass_rates(
            totals.test_passed,
            totals.train_passed,
            totals.tasks,
            scan.config.percent_precision,
        )
        .count("errors", totals.error_count)
        .tokens(&totals.tokens);
    panel
}
