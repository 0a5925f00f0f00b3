//! Output format handling and cell rendering
//!
//! Three output formats:
//! - human: aligned tables for terminal use
//! - json: stable, machine-readable JSON
//! - records: line-oriented records for scripts and LLM context
//!
//! Cell formatters are pure and used only when a view is built; canonical
//! values stay numeric in [`crate::metrics`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeerError;
use crate::metrics::Weight;

/// Absent or unknown value
pub const MISSING: &str = "-";
/// Pass glyph
pub const PASS: &str = "✔";
/// Fail glyph
pub const FAIL: &str = "✘";
/// Error glyph
pub const ERROR: &str = "⚠";
/// Weight descriptor present but unreadable
pub const WEIGHT_ERROR: &str = "ERR";
/// Weight descriptor not found in any session
pub const WEIGHT_UNKNOWN: &str = "?";

/// Output format for seernav commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
    /// Line records
    Records,
}

impl FromStr for OutputFormat {
    type Err = SeerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "records" => Ok(OutputFormat::Records),
            other => Err(SeerError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Records => write!(f, "records"),
        }
    }
}

/// Format seconds as `HH:MM:SS`; hours are not wrapped at 24
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => {
            let total = s as u64;
            format!(
                "{:02}:{:02}:{:02}",
                total / 3600,
                (total % 3600) / 60,
                total % 60
            )
        }
        _ => MISSING.to_string(),
    }
}

/// Integer with comma thousands separators
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_opt_count(value: Option<u64>) -> String {
    value.map(format_count).unwrap_or_else(|| MISSING.to_string())
}

/// Count where zero reads as nothing to report
pub fn format_nonzero_count(value: u64) -> String {
    if value == 0 {
        MISSING.to_string()
    } else {
        format_count(value)
    }
}

pub fn format_score(score: Option<f64>, precision: usize) -> String {
    match score {
        Some(s) if s.is_finite() => format!("{:.*}", precision, s),
        _ => MISSING.to_string(),
    }
}

/// Tri-state pass/fail glyph
pub fn format_flag(flag: Option<bool>) -> String {
    match flag {
        Some(true) => PASS,
        Some(false) => FAIL,
        None => MISSING,
    }
    .to_string()
}

pub fn format_error_flag(has_error: bool) -> String {
    if has_error { ERROR } else { MISSING }.to_string()
}

pub fn format_weight(weight: Weight) -> String {
    match weight {
        Weight::Value(v) => format_count(v),
        Weight::Error => WEIGHT_ERROR.to_string(),
        Weight::NotFound => WEIGHT_UNKNOWN.to_string(),
        Weight::Skipped => MISSING.to_string(),
    }
}

pub fn format_percent(value: f64, precision: usize) -> String {
    format!("{:.*}%", precision, value)
}

/// Signed difference, always with a leading `+` or `-`
pub fn format_signed(value: i64) -> String {
    format!("{:+}", value)
}
