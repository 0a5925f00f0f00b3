//! Hierarchical roll-up of metrics
//!
//! One reduction table serves every level of the tree. Each child type says
//! what it contributes through [`Contribute`]; [`Rollup`] applies the rules:
//!
//! | field | rule |
//! |---|---|
//! | tasks, steps, attempts, tokens, weight | sum (missing contributes 0) |
//! | duration | sum over children that report one |
//! | best score | minimum over non-null scores |
//! | errors | count of erroring children |
//! | test / train | count of children that passed |
//!
//! Children whose record was missing or malformed are simply not passed in.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::metrics::{
    SessionMetrics, SessionRecord, StepMetrics, TaskMetrics, TokenTotals, Weight,
};

/// Reduced metrics of a set of children
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Rollup {
    /// Children that contributed
    pub children: u64,
    pub tasks: u64,
    pub steps: u64,
    pub attempts: u64,
    pub duration_seconds: Option<f64>,
    pub best_score: Option<f64>,
    pub tokens: TokenTotals,
    pub error_count: u64,
    pub test_passed: u64,
    pub train_passed: u64,
    /// Sum of valid weights
    pub weight: u64,
}

/// A child metric value that can be folded into a parent [`Rollup`]
pub trait Contribute {
    fn contribute(&self, rollup: &mut Rollup);
}

impl Rollup {
    /// Reduce every child in one pass
    pub fn over<'a, T, I>(children: I) -> Self
    where
        T: Contribute + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut rollup = Rollup::default();
        for child in children {
            rollup.children += 1;
            child.contribute(&mut rollup);
        }
        rollup
    }

    pub fn add_duration(&mut self, seconds: Option<f64>) {
        if let Some(seconds) = seconds {
            *self.duration_seconds.get_or_insert(0.0) += seconds;
        }
    }

    pub fn add_score(&mut self, score: Option<f64>) {
        let Some(score) = score.filter(|s| !s.is_nan()) else {
            return;
        };
        self.best_score = Some(match self.best_score {
            Some(best) if best <= score => best,
            _ => score,
        });
    }

    fn count_flag(counter: &mut u64, flag: Option<bool>) {
        if flag == Some(true) {
            *counter += 1;
        }
    }
}

impl Contribute for StepMetrics {
    fn contribute(&self, rollup: &mut Rollup) {
        rollup.steps += 1;
        rollup.attempts = rollup.attempts.saturating_add(self.attempts.unwrap_or(0));
        rollup.add_duration(self.duration_seconds);
        rollup.add_score(self.best_score);
        rollup.tokens.add_counts(&self.tokens);
        rollup.error_count += u64::from(self.has_error);
        Rollup::count_flag(&mut rollup.test_passed, self.test_passed);
        Rollup::count_flag(&mut rollup.train_passed, self.train_passed);
    }
}

impl Contribute for TaskMetrics {
    fn contribute(&self, rollup: &mut Rollup) {
        rollup.tasks += 1;
        rollup.steps = rollup.steps.saturating_add(self.step_count);
        rollup.attempts = rollup.attempts.saturating_add(self.attempts.unwrap_or(0));
        rollup.add_duration(self.duration_seconds);
        rollup.add_score(self.best_score);
        rollup.tokens.add_counts(&self.tokens);
        rollup.error_count += u64::from(self.has_error);
        Rollup::count_flag(&mut rollup.test_passed, self.test_passed);
        Rollup::count_flag(&mut rollup.train_passed, self.train_passed);
        rollup.weight = rollup.weight.saturating_add(self.weight.value().unwrap_or(0));
    }
}

impl Contribute for SessionMetrics {
    fn contribute(&self, rollup: &mut Rollup) {
        rollup.tasks = rollup.tasks.saturating_add(self.task_count);
        rollup.steps = rollup.steps.saturating_add(self.total_steps);
        rollup.add_duration(self.total_duration_seconds);
        rollup.add_score(self.best_score);
        rollup.tokens.add_totals(&self.tokens);
        rollup.error_count = rollup.error_count.saturating_add(self.error_task_count);
        rollup.test_passed = rollup.test_passed.saturating_add(self.test_passed_count);
        rollup.train_passed = rollup.train_passed.saturating_add(self.train_passed_count);
        rollup.weight = rollup.weight.saturating_add(self.total_weight.value().unwrap_or(0));
    }
}

/// Merge a session's own summary with the roll-up of its tasks
///
/// Counts, duration and tokens come from the summary file when it carries
/// them; best score is always recomputed from the readable tasks.
/// `total_weight` covers every task directory, readable summary or not, and
/// is resolved by the caller.
pub fn session_metrics(
    name: &str,
    record: Option<&SessionRecord>,
    tasks: &[TaskMetrics],
    total_weight: Weight,
) -> SessionMetrics {
    let rollup = Rollup::over(tasks);
    let fallback = SessionRecord::default();
    let record = record.unwrap_or(&fallback);

    let tokens = TokenTotals {
        prompt: record.tokens.prompt.unwrap_or(rollup.tokens.prompt),
        candidates: record.tokens.candidates.unwrap_or(rollup.tokens.candidates),
        total: record.tokens.total.unwrap_or(rollup.tokens.total),
    };

    SessionMetrics {
        name: name.to_string(),
        task_count: record.task_count.unwrap_or(rollup.tasks),
        test_passed_count: record.test_passed_count.unwrap_or(rollup.test_passed),
        train_passed_count: record.train_passed_count.unwrap_or(rollup.train_passed),
        error_task_count: record.error_task_count.unwrap_or(rollup.error_count),
        total_steps: record.total_steps.unwrap_or(rollup.steps),
        total_duration_seconds: record.duration_seconds.or(rollup.duration_seconds),
        best_score: rollup.best_score,
        tokens,
        total_weight,
        description: record.description.clone(),
    }
}

/// One task id aggregated over every session that contains it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskAcrossSessions {
    pub task_id: String,
    /// Sessions holding a directory for this task, readable or not
    pub sessions: BTreeSet<String>,
    /// Roll-up of the readable task summaries; `error_count`, `test_passed`
    /// and `train_passed` count sessions
    pub totals: Rollup,
    pub weight: Weight,
}

/// Accumulates task instances across sessions, keyed by task id
#[derive(Debug, Default)]
pub struct CrossSessionIndex {
    tasks: BTreeMap<String, (BTreeSet<String>, Vec<TaskMetrics>)>,
}

impl CrossSessionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `session` holds task `task_id`, with its metrics if readable
    pub fn add(&mut self, session: &str, task_id: &str, metrics: Option<TaskMetrics>) {
        let (sessions, instances) = self.tasks.entry(task_id.to_string()).or_default();
        sessions.insert(session.to_string());
        instances.extend(metrics);
    }

    /// Reduce each task id; `weight_of` is asked once per id
    pub fn finish(self, mut weight_of: impl FnMut(&str) -> Weight) -> Vec<TaskAcrossSessions> {
        self.tasks
            .into_iter()
            .map(|(task_id, (sessions, instances))| {
                let weight = weight_of(&task_id);
                TaskAcrossSessions {
                    totals: Rollup::over(&instances),
                    task_id,
                    sessions,
                    weight,
                }
            })
            .collect()
    }
}

/// Counts over distinct task ids, as opposed to task instances
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UniqueTaskStats {
    pub unique_task_count: u64,
    /// Tasks that passed test in at least one session
    pub passed_test: u64,
    /// Tasks that passed train in at least one session
    pub passed_train: u64,
    /// Tasks that errored in at least one session
    pub with_errors: u64,
}

/// Top-level summary over all sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalSummary {
    pub sessions_involved: BTreeSet<String>,
    /// Task instances, summed per session
    pub totals: Rollup,
    /// Present when built from tasks rather than sessions
    pub unique: Option<UniqueTaskStats>,
}

impl GlobalSummary {
    /// Sum session metrics; a task recurring across sessions counts once per session
    pub fn from_sessions(sessions: &[SessionMetrics]) -> Self {
        GlobalSummary {
            sessions_involved: sessions.iter().map(|s| s.name.clone()).collect(),
            totals: Rollup::over(sessions),
            unique: None,
        }
    }

    /// Summarize per-task aggregates, counting each task id once for pass/error stats
    pub fn from_tasks(tasks: &[TaskAcrossSessions]) -> Self {
        let mut totals = Rollup::default();
        let mut unique = UniqueTaskStats::default();
        let mut sessions_involved = BTreeSet::new();

        for task in tasks {
            sessions_involved.extend(task.sessions.iter().cloned());

            let t = &task.totals;
            totals.children += 1;
            totals.tasks = totals.tasks.saturating_add(t.tasks);
            totals.steps = totals.steps.saturating_add(t.steps);
            totals.attempts = totals.attempts.saturating_add(t.attempts);
            totals.add_duration(t.duration_seconds);
            totals.add_score(t.best_score);
            totals.tokens.add_totals(&t.tokens);
            totals.error_count = totals.error_count.saturating_add(t.error_count);
            totals.test_passed = totals.test_passed.saturating_add(t.test_passed);
            totals.train_passed = totals.train_passed.saturating_add(t.train_passed);
            // weight is per task id, counted once
            totals.weight = totals.weight.saturating_add(task.weight.value().unwrap_or(0));

            unique.unique_task_count += 1;
            unique.passed_test += u64::from(t.test_passed > 0);
            unique.passed_train += u64::from(t.train_passed > 0);
            unique.with_errors += u64::from(t.error_count > 0);
        }

        GlobalSummary {
            sessions_involved,
            totals,
            unique: Some(unique),
        }
    }
}
