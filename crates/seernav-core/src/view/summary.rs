//! Summary panels shown above each table
//!
//! Derived statistics (averages, percentages, differences) are computed
//! here from aggregated counts and never stored back into metrics.

use serde::Serialize;

use crate::format::{format_count, format_duration, format_percent, format_score, format_signed, format_weight};
use crate::metrics::{TokenTotals, Weight};

/// One `label: value [extra]` line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryPanel {
    pub lines: Vec<SummaryLine>,
}

impl SummaryPanel {
    pub fn push(&mut self, label: &'static str, value: impl Into<String>) -> &mut Self {
        self.lines.push(SummaryLine {
            label,
            value: value.into(),
            extra: None,
        });
        self
    }

    pub fn push_with(
        &mut self,
        label: &'static str,
        value: impl Into<String>,
        extra: impl Into<String>,
    ) -> &mut Self {
        self.lines.push(SummaryLine {
            label,
            value: value.into(),
            extra: Some(extra.into()),
        });
        self
    }

    pub fn count(&mut self, label: &'static str, value: u64) -> &mut Self {
        self.push(label, format_count(value))
    }

    pub fn duration(&mut self, seconds: Option<f64>) -> &mut Self {
        self.push("time", format_duration(seconds))
    }

    pub fn best(&mut self, score: Option<f64>, precision: usize) -> &mut Self {
        self.push("best", format_score(score, precision))
    }

    pub fn weight(&mut self, weight: Weight) -> &mut Self {
        self.push("weight", format_weight(weight))
    }

    /// Steps with the average per child
    pub fn steps(&mut self, steps: u64, children: u64) -> &mut Self {
        self.push_with("steps", format_count(steps), average(steps, children))
    }

    /// Test passes as a share of `total`, train passes against test passes
    pub fn pass_rates(&mut self, test: u64, train: u64, total: u64, precision: usize) -> &mut Self {
        self.push_with("test", format_count(test), percent_of(test, total, precision));
        self.push_with("train", format_count(train), difference(test, train))
    }

    pub fn tokens(&mut self, tokens: &TokenTotals) -> &mut Self {
        self.count("in", tokens.prompt)
            .count("out", tokens.candidates)
            .count("total", tokens.total)
    }

    pub fn get(&self, label: &str) -> Option<&SummaryLine> {
        self.lines.iter().find(|line| line.label == label)
    }
}

/// `N.N avg`; zero children averages to zero
pub fn average(total: u64, count: u64) -> String {
    let avg = if count > 0 {
        total as f64 / count as f64
    } else {
        0.0
    };
    format!("{avg:.1} avg")
}

pub fn percent_of(part: u64, whole: u64, precision: usize) -> String {
    let pct = if whole > 0 {
        part as f64 / whole as f64 * 100.0
    } else {
        0.0
    };
    format_percent(pct, precision)
}

/// Signed `test - train`
pub fn difference(test: u64, train: u64) -> String {
    let diff = i128::from(test) - i128::from(train);
    format_signed(diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_statistics() {
        assert_eq!(average(8, 3), "2.7 avg");
        assert_eq!(average(5, 0), "0.0 avg");
        assert_eq!(percent_of(1, 3, 1), "33.3%");
        assert_eq!(percent_of(1, 0, 1), "0.0%");
        assert_eq!(difference(2, 5), "-3");
        assert_eq!(difference(5, 2), "+3");
        assert_eq!(difference(u64::MAX, 0), format!("+{}", i64::MAX));
        assert_eq!(difference(0, u64::MAX), i64::MIN.to_string());
    }

    #[test]
    fn test_panel_lines() {
        let mut panel = SummaryPanel::default();
        panel.steps(10, 4).pass_rates(2, 1, 4, 1);

        let steps = panel.get("steps").unwrap();
        assert_eq!(steps.value, "10");
        assert_eq!(steps.extra.as_deref(), Some("2.5 avg"));
        assert_eq!(panel.get("test").unwrap().extra.as_deref(), Some("50.0%"));
        assert_eq!(panel.get("train").unwrap().extra.as_deref(), Some("+1"));
        assert!(panel.get("weight").is_none());
    }
}
