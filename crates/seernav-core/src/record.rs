//! Summary file reader
//!
//! Every level of a result tree carries a JSON summary written by an external
//! solver process. This module only reads them: a present, well-formed file
//! yields its top-level mapping, a missing file is [`RecordOutcome::NotFound`],
//! and anything else is [`RecordOutcome::Malformed`]. None of these outcomes is
//! an error for the caller.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};

/// Per-directory summary file name (sessions, tasks and steps)
pub const INDEX_FILE: &str = "index.json";

/// Task descriptor file name, used only for weight lookup
pub const TASK_FILE: &str = "task.json";

/// Parsed top-level mapping of a summary file
pub type RawRecord = Map<String, Value>;

/// Outcome of reading one summary file
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// File parsed into a JSON object
    Found(RawRecord),
    /// File does not exist
    NotFound,
    /// File exists but could not be read or is not a JSON object
    Malformed(String),
}

impl RecordOutcome {
    pub fn found(&self) -> Option<&RawRecord> {
        match self {
            RecordOutcome::Found(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_found(self) -> Option<RawRecord> {
        match self {
            RecordOutcome::Found(record) => Some(record),
            _ => None,
        }
    }
}

/// Read `index.json` from a session, task or step directory
pub fn read_index(dir: &Path) -> RecordOutcome {
    read_json_object(&dir.join(INDEX_FILE))
}

/// Read and parse a JSON object file without failing
pub fn read_json_object(path: &Path) -> RecordOutcome {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return RecordOutcome::NotFound,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read summary");
            return RecordOutcome::Malformed(e.to_string());
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => RecordOutcome::Found(map),
        Ok(other) => {
            let reason = format!("expected a JSON object, found {}", json_kind(&other));
            tracing::warn!(path = %path.display(), reason = %reason, "Malformed summary");
            RecordOutcome::Malformed(reason)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Malformed summary");
            RecordOutcome::Malformed(e.to_string())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
