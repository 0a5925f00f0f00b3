//! Canonical metric values for steps, tasks and sessions
//!
//! Summary files are heterogeneous and every field is optional. The
//! extractor in [`extract`] normalizes them into the types below; nothing
//! downstream looks at raw JSON again.

pub mod extract;

use serde::Serialize;

pub use extract::{extract_session, extract_step, extract_task};

/// Token usage as reported by a single record; each count is independent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    pub prompt: Option<u64>,
    pub candidates: Option<u64>,
    pub total: Option<u64>,
}

/// Summed token usage; missing leaf counts contribute zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenTotals {
    pub prompt: u64,
    pub candidates: u64,
    pub total: u64,
}

impl TokenTotals {
    pub fn add_counts(&mut self, counts: &TokenCounts) {
        self.prompt = self.prompt.saturating_add(counts.prompt.unwrap_or(0));
        self.candidates = self.candidates.saturating_add(counts.candidates.unwrap_or(0));
        self.total = self.total.saturating_add(counts.total.unwrap_or(0));
    }

    pub fn add_totals(&mut self, other: &TokenTotals) {
        self.prompt = self.prompt.saturating_add(other.prompt);
        self.candidates = self.candidates.saturating_add(other.candidates);
        self.total = self.total.saturating_add(other.total);
    }
}

/// Task weight as resolved from the task descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Weight {
    /// Weight computed from `task.json`
    Value(u64),
    /// Descriptor found but could not be read or weighed
    Error,
    /// No descriptor in any session
    NotFound,
    /// Weight lookup switched off in configuration
    Skipped,
}

impl Weight {
    pub fn value(&self) -> Option<u64> {
        match self {
            Weight::Value(v) => Some(*v),
            _ => None,
        }
    }
}

/// Metrics of one step directory
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepMetrics {
    pub has_error: bool,
    pub duration_seconds: Option<f64>,
    pub attempts: Option<u64>,
    pub best_score: Option<f64>,
    pub test_passed: Option<bool>,
    pub train_passed: Option<bool>,
    pub tokens: TokenCounts,
    pub size_correct: Option<bool>,
    pub palette_correct: Option<bool>,
    pub color_count_correct: Option<bool>,
    pub pixels_off: Option<u64>,
    pub percent_correct: Option<f64>,
    pub file_count: usize,
}

/// Metrics of one task directory, from its own summary file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskMetrics {
    pub has_error: bool,
    pub step_count: u64,
    pub duration_seconds: Option<f64>,
    pub attempts: Option<u64>,
    pub best_score: Option<f64>,
    pub test_passed: Option<bool>,
    pub train_passed: Option<bool>,
    pub tokens: TokenCounts,
    /// Resolved separately from `task.json`, never from steps
    pub weight: Weight,
}

/// Fields a session summary file may carry
///
/// Every field is optional: whatever is present overrides the value
/// recomputed from the session's tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionRecord {
    pub task_count: Option<u64>,
    pub test_passed_count: Option<u64>,
    pub train_passed_count: Option<u64>,
    pub error_task_count: Option<u64>,
    pub total_steps: Option<u64>,
    pub duration_seconds: Option<f64>,
    pub tokens: TokenCounts,
    pub description: Option<String>,
}

/// Metrics of one session, merged from its summary file and its tasks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionMetrics {
    pub name: String,
    pub task_count: u64,
    pub test_passed_count: u64,
    pub train_passed_count: u64,
    pub error_task_count: u64,
    pub total_steps: u64,
    pub total_duration_seconds: Option<f64>,
    pub best_score: Option<f64>,
    pub tokens: TokenTotals,
    pub total_weight: Weight,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_value_only_for_computed_weights() {
        assert_eq!(Weight::Value(42).value(), Some(42));
        assert_eq!(Weight::Error.value(), None);
        assert_eq!(Weight::NotFound.value(), None);
        assert_eq!(Weight::Skipped.value(), None);
    }

    #[test]
    fn test_token_totals_treat_missing_as_zero() {
        let mut totals = TokenTotals::default();
        totals.add_counts(&TokenCounts {
            prompt: Some(10),
            candidates: None,
            total: Some(15),
        });
        totals.add_counts(&TokenCounts {
            prompt: Some(1),
            candidates: Some(2),
            total: None,
        });
        assert_eq!(
            totals,
            TokenTotals {
                prompt: 11,
                candidates: 2,
                total: 15
            }
        );
    }
}
