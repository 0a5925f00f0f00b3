//! `seernav <view>` commands - build a list view, apply sorts, render
//!
//! - `--focus` picks the row before sorting, so it follows that row
//! - each `--sort` is one sort request; repeating a column toggles it

pub mod format;

use seernav_core::error::Result;
use seernav_core::trace_time;
use seernav_core::view::{ListView, ViewKind};

use crate::cli::{OutputFormat, ViewArgs};
use crate::commands::dispatch::command::CommandContext;

use self::format::{output_human, output_json, output_records};

/// Execute a view command
pub fn execute(ctx: &CommandContext, kind: ViewKind, args: &ViewArgs) -> Result<()> {
    let (tree, config) = ctx.open_tree()?;
    let mut list = ListView::open(tree, config, kind)?;
    trace_time!(ctx.start, "open_view", rows = list.view().table.rows.len());

    if let Some(id) = &args.focus {
        if !list.focus_row(id) {
            tracing::warn!(row = %id, "Focus row not found, focusing first row");
        }
    }

    for column in &args.sort {
        list.request_sort(column)?;
    }

    match ctx.cli.format {
        OutputFormat::Json => output_json(&list)?,
        OutputFormat::Human => output_human(ctx.cli, &list),
        OutputFormat::Records => output_records(&list),
    }
    Ok(())
}
