//! CLI argument parsing for seernav
//!
//! Global flags: --root, --format, --quiet, --verbose, --log-level, --log-json

pub mod paths;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use seernav_core::format::OutputFormat;

/// Seernav - browse SEER session, task and step results
#[derive(Parser, Debug)]
#[command(name = "seernav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Sessions root directory (defaults to the current directory)
    #[arg(long, global = true, env = "SEERNAV_ROOT")]
    pub root: Option<PathBuf>,

    /// Output format: human, json or records
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (e.g. "debug", "seernav_core=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Sorting and focus options shared by every list view
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Sort by column; repeat to toggle direction or chain sorts
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Vec<String>,

    /// Row id to focus (session, task or step name)
    #[arg(long, value_name = "ROW_ID")]
    pub focus: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List sessions under the root
    Sessions(ViewArgs),

    /// List the tasks of one session
    Session {
        /// Session directory name
        session: String,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// List the steps of one task in a session
    Task {
        /// Session directory name
        session: String,

        /// Task id
        task: String,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// List every distinct task across all sessions
    Tasks(ViewArgs),

    /// List the sessions that ran a task
    TaskSessions {
        /// Task id
        task: String,

        #[command(flatten)]
        view: ViewArgs,
    },
}
