//! Human-readable output: summary panel, aligned table, sort footer

use seernav_core::sort::ColumnType;
use seernav_core::view::{ListView, SummaryPanel};

use super::direction_label;
use crate::cli::Cli;

const FOCUS_MARKER: &str = ">";
const COLUMN_GAP: &str = "  ";

/// Output in human-readable format
pub fn output_human(cli: &Cli, list: &ListView) {
    let view = list.view();
    println!("{}", view.title);
    if !cli.quiet {
        print_summary(&view.summary);
    }
    println!();

    if view.table.rows.is_empty() {
        if !cli.quiet {
            println!("No rows found");
        }
        return;
    }

    let widths = column_widths(list);
    let header: Vec<&str> = view.table.columns.iter().map(|c| c.name).collect();
    println!(
        "{} {}",
        " ".repeat(FOCUS_MARKER.len()),
        render_line(list, &header, &widths)
    );

    for (i, row) in view.table.rows.iter().enumerate() {
        let marker = if i == list.focus() { FOCUS_MARKER } else { " " };
        let cells: Vec<&str> = row.cells.iter().map(String::as_str).collect();
        println!("{} {}", marker, render_line(list, &cells, &widths));
    }

    if !cli.quiet {
        println!();
        match list.sort_column() {
            Some((column, direction)) => {
                println!("sorted by {} {}", column, direction_label(direction))
            }
            None => println!("unsorted"),
        }
    }
}

fn print_summary(summary: &SummaryPanel) {
    let label_width = summary
        .lines
        .iter()
        .map(|l| l.label.len() + 1)
        .max()
        .unwrap_or(0);
    let value_width = summary
        .lines
        .iter()
        .map(|l| display_width(&l.value))
        .max()
        .unwrap_or(0);

    for line in &summary.lines {
        let label = format!("{}:", line.label);
        match &line.extra {
            Some(extra) => println!(
                "  {:>lw$} {:>vw$}  {}",
                label,
                line.value,
                extra,
                lw = label_width,
                vw = value_width
            ),
            None => println!(
                "  {:>lw$} {:>vw$}",
                label,
                line.value,
                lw = label_width,
                vw = value_width
            ),
        }
    }
}

fn column_widths(list: &ListView) -> Vec<usize> {
    let table = &list.view().table;
    table
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            table
                .rows
                .iter()
                .map(|row| display_width(row.cell(i)))
                .chain(std::iter::once(display_width(column.name)))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// Text columns are left-aligned, everything else right-aligned
fn render_line(list: &ListView, cells: &[&str], widths: &[usize]) -> String {
    let columns = list.view().table.columns;
    cells
        .iter()
        .zip(widths)
        .zip(columns)
        .map(|((cell, width), column)| {
            let pad = " ".repeat(width.saturating_sub(display_width(cell)));
            if column.column_type == ColumnType::Identifier {
                format!("{cell}{pad}")
            } else {
                format!("{pad}{cell}")
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

/// Glyph cells are one column wide, so char count is the display width
fn display_width(s: &str) -> usize {
    s.chars().count()
}
