//! List views over a result tree
//!
//! A view is a column schema, a row builder and a summary builder. Scanning
//! goes through [`Scan`], which owns the one [`WeightLookup`] of a pass;
//! ordering goes through the generic [`SortController`].

mod session;
mod sessions;
pub mod summary;
mod task;
mod task_sessions;
mod tasks;

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::aggregate::session_metrics;
use crate::config::NavigatorConfig;
use crate::error::Result;
use crate::metrics::{extract_session, extract_task, SessionMetrics, TaskMetrics, Weight};
use crate::record::read_index;
use crate::sort::{Direction, SortController, SortOutcome, SortState};
use crate::table::Table;
use crate::trace_time;
use crate::tree::{dir_name, list_subdirs_lenient, ResultTree};
use crate::weight::{GridCellWeigher, WeightLookup};

pub use summary::{SummaryLine, SummaryPanel};

/// Which level of the tree a view lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ViewKind {
    Sessions,
    Session { session: String },
    Task { session: String, task: String },
    Tasks,
    TaskSessions { task: String },
}

impl ViewKind {
    /// Stable name used in config, errors and JSON output
    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::Sessions => "sessions",
            ViewKind::Session { .. } => "session",
            ViewKind::Task { .. } => "task",
            ViewKind::Tasks => "tasks",
            ViewKind::TaskSessions { .. } => "task-sessions",
        }
    }
}

/// A built view: rows in display order plus the summary panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub kind: ViewKind,
    pub title: String,
    pub table: Table,
    pub summary: SummaryPanel,
}

/// Build a view from a full scan of its subtree
pub fn build_view(tree: &ResultTree, config: &NavigatorConfig, kind: &ViewKind) -> Result<View> {
    let start = Instant::now();
    let mut scan = Scan::new(tree, config)?;

    let (title, table, summary) = match kind {
        ViewKind::Sessions => {
            let (table, summary) = sessions::build(&mut scan);
            (tree.name(), table, summary)
        }
        ViewKind::Session { session } => {
            let (table, summary) = session::build(&mut scan, session)?;
            (session.clone(), table, summary)
        }
        ViewKind::Task { session, task } => {
            let (table, summary) = task::build(&mut scan, session, task)?;
            (format!("{session} / {task}"), table, summary)
        }
        ViewKind::Tasks => {
            let (table, summary) = tasks::build(&mut scan);
            (format!("{} tasks", tree.name()), table, summary)
        }
        ViewKind::TaskSessions { task } => {
            let (table, summary) = task_sessions::build(&mut scan, task)?;
            (format!("{task} across sessions"), table, summary)
        }
    };

    trace_time!(
        start,
        "build_view",
        rows = table.rows.len(),
        descriptor_reads = scan.weights.descriptor_reads()
    );
    Ok(View {
        kind: kind.clone(),
        title,
        table,
        summary,
    })
}

/// One task directory as seen by a scan
#[derive(Debug, Clone)]
pub(crate) struct TaskEntry {
    pub id: String,
    /// `None` when `index.json` is missing or malformed
    pub metrics: Option<TaskMetrics>,
    pub weight: Weight,
}

/// State shared by one scanning pass
pub(crate) struct Scan<'a> {
    pub tree: &'a ResultTree,
    pub config: &'a NavigatorConfig,
    pub sessions: Vec<PathBuf>,
    pub weights: WeightLookup,
}

impl<'a> Scan<'a> {
    fn new(tree: &'a ResultTree, config: &'a NavigatorConfig) -> Result<Self> {
        let sessions = tree.session_dirs()?;
        let weights = if config.weight_lookup {
            WeightLookup::new(sessions.clone(), Box::new(GridCellWeigher))
        } else {
            WeightLookup::disabled()
        };
        Ok(Scan {
            tree,
            config,
            sessions,
            weights,
        })
    }

    /// Read a task directory's summary and resolve its weight
    pub fn task(&mut self, task_dir: &Path) -> TaskEntry {
        let id = dir_name(task_dir);
        let weight = self.weights.weight(&id);
        let metrics = read_index(task_dir).into_found().map(|record| TaskMetrics {
            weight,
            ..extract_task(&record)
        });
        TaskEntry { id, metrics, weight }
    }

    /// Every task directory of a session, and whether listing succeeded
    pub fn tasks(&mut self, session_dir: &Path) -> (Vec<TaskEntry>, bool) {
        let (dirs, listed) = list_subdirs_lenient(session_dir);
        let entries = dirs.iter().map(|dir| self.task(dir)).collect();
        (entries, listed)
    }

    /// Merged metrics of a session along with its task entries
    #[tracing::instrument(skip(self, session_dir), fields(session = %dir_name(session_dir)))]
    pub fn session(&mut self, session_dir: &Path) -> (SessionMetrics, Vec<TaskEntry>) {
        let name = dir_name(session_dir);
        let record = read_index(session_dir).found().map(extract_session);
        let (entries, listed) = self.tasks(session_dir);

        let readable: Vec<TaskMetrics> = entries.iter().filter_map(|e| e.metrics.clone()).collect();
        let weight = self.total_weight(&entries, listed);
        let metrics = session_metrics(&name, record.as_ref(), &readable, weight);
        tracing::debug!(tasks = entries.len(), readable = readable.len(), "Scanned session");
        (metrics, entries)
    }

    /// Sum of valid task weights; an unlistable session is an error
    fn total_weight(&self, entries: &[TaskEntry], listed: bool) -> Weight {
        if !listed {
            Weight::Error
        } else if !self.config.weight_lookup {
            Weight::Skipped
        } else {
            Weight::Value(
                entries
                    .iter()
                    .filter_map(|e| e.weight.value())
                    .fold(0, u64::saturating_add),
            )
        }
    }
}

/// A view with its sort state and focused row
#[derive(Debug)]
pub struct ListView {
    tree: ResultTree,
    config: NavigatorConfig,
    view: View,
    sort: SortController,
    focus: usize,
}

impl ListView {
    /// Build the view, then apply the configured default sort if any
    pub fn open(tree: ResultTree, config: NavigatorConfig, kind: ViewKind) -> Result<Self> {
        let view = build_view(&tree, &config, &kind)?;
        let default_sort = config.default_sort_for(kind.name()).map(str::to_string);

        let mut list = ListView {
            tree,
            config,
            view,
            sort: SortController::new(),
            focus: 0,
        };
        if let Some(column) = default_sort {
            list.request_sort(&column)?;
        }
        Ok(list)
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn sort_state(&self) -> SortState {
        self.sort.state()
    }

    /// Active sort column name and direction
    pub fn sort_column(&self) -> Option<(&'static str, Direction)> {
        match self.sort.state() {
            SortState::Unsorted => None,
            SortState::SortedBy { column, direction } => self
                .view
                .table
                .columns
                .get(column)
                .map(|c| (c.name, direction)),
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.view.table.rows.get(self.focus).map(|r| r.id.as_str())
    }

    /// Move focus to the row with `id`; returns false and keeps focus if absent
    pub fn focus_row(&mut self, id: &str) -> bool {
        match self.view.table.row_index(id) {
            Some(index) => {
                self.focus = index;
                true
            }
            None => false,
        }
    }

    /// Sort by a column name, toggling direction when it repeats
    pub fn request_sort(&mut self, column: &str) -> Result<SortOutcome> {
        let start = Instant::now();
        let index = self
            .view
            .table
            .resolve_column(self.view.kind.name(), column)?;
        let focused = self.focused_id().map(str::to_string);

        let outcome = self
            .sort
            .request(&mut self.view.table, index, focused.as_deref())?;
        self.focus = outcome.focus;
        trace_time!(start, "request_sort", rows = self.view.table.rows.len());
        Ok(outcome)
    }

    /// Re-scan the subtree, keep the sort state and the focused row
    pub fn refresh(&mut self) -> Result<()> {
        let focused = self.focused_id().map(str::to_string);
        let mut view = build_view(&self.tree, &self.config, &self.view.kind)?;
        self.focus = self.sort.reapply(&mut view.table, focused.as_deref())?;
        self.view = view;
        Ok(())
    }
}
