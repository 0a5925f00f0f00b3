//! Normalize raw summary records into canonical metrics
//!
//! Field access never fails: a missing key, an explicit `null` or a value of
//! the wrong JSON type all read as "unset".

use serde_json::Value;

use super::{SessionRecord, StepMetrics, TaskMetrics, TokenCounts, Weight};
use crate::record::RawRecord;

/// Extract step metrics; `file_count` is supplied by the directory scan
pub fn extract_step(record: &RawRecord, file_count: usize) -> StepMetrics {
    StepMetrics {
        has_error: has_error(record),
        duration_seconds: get_f64(record, "duration_seconds"),
        attempts: get_u64(record, "attempts"),
        best_score: get_f64(record, "best_score"),
        test_passed: get_flag(record, "test_passed"),
        train_passed: get_flag(record, "train_passed"),
        tokens: tokens_from(record, &["response", "tokens"]),
        size_correct: get_flag(record, "size_correct"),
        palette_correct: get_flag(record, "color_palette_correct"),
        color_count_correct: get_flag(record, "color_count_correct"),
        pixels_off: get_u64(record, "pixels_off"),
        percent_correct: get_f64(record, "percent_correct"),
        file_count,
    }
}

/// Extract task metrics; the weight is resolved later by the caller
pub fn extract_task(record: &RawRecord) -> TaskMetrics {
    TaskMetrics {
        has_error: has_error(record),
        step_count: get_u64(record, "steps").unwrap_or(0),
        duration_seconds: get_f64(record, "duration_seconds"),
        attempts: get_u64(record, "attempts"),
        best_score: get_f64(record, "best_score"),
        test_passed: get_flag(record, "test_passed"),
        train_passed: get_flag(record, "train_passed"),
        tokens: tokens_from(record, &["tokens", "response"]),
        weight: Weight::NotFound,
    }
}

/// Extract the fields a session summary may carry
pub fn extract_session(record: &RawRecord) -> SessionRecord {
    // Older writers nest the error count under `errors.count`
    let error_task_count = get_u64(record, "tasks_with_errors_count").or_else(|| {
        get_object(record, "errors").and_then(|errors| get_u64(errors, "count"))
    });

    SessionRecord {
        task_count: get_u64(record, "count"),
        test_passed_count: get_u64(record, "test_passed"),
        train_passed_count: get_u64(record, "train_passed"),
        error_task_count,
        total_steps: get_u64(record, "total_steps"),
        duration_seconds: get_f64(record, "duration_seconds"),
        tokens: tokens_from(record, &["tokens"]),
        description: get_str(record, "description").map(str::to_string),
    }
}

/// `has_errors` absent means no error was recorded
fn has_error(record: &RawRecord) -> bool {
    get_flag(record, "has_errors").unwrap_or(false)
}

/// Read token counts from the first of `keys` holding an object
fn tokens_from(record: &RawRecord, keys: &[&str]) -> TokenCounts {
    keys.iter()
        .find_map(|key| get_object(record, key))
        .map(|tokens| TokenCounts {
            prompt: get_u64(tokens, "prompt_tokens"),
            candidates: get_u64(tokens, "candidates_tokens"),
            total: get_u64(tokens, "total_tokens"),
        })
        .unwrap_or_default()
}

pub(crate) fn get_flag(record: &RawRecord, key: &str) -> Option<bool> {
    record.get(key).and_then(Value::as_bool)
}

pub(crate) fn get_f64(record: &RawRecord, key: &str) -> Option<f64> {
    record
        .get(key)
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
}

pub(crate) fn get_u64(record: &RawRecord, key: &str) -> Option<u64> {
    let value = record.get(key)?;
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
            .map(|v| v as u64)
    })
}

fn get_str<'a>(record: &'a RawRecord, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

fn get_object<'a>(record: &'a RawRecord, key: &str) -> Option<&'a RawRecord> {
    record.get(key).and_then(Value::as_object)
}
