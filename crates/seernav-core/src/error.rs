//! Error types and exit codes for seernav
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, unknown sort column)
//! - 3: Data error (missing root, unknown session or task)
//!
//! Absent or malformed summary files are not errors; they surface as
//! [`crate::record::RecordOutcome`] values and never abort a scan.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the seernav binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing root or unknown entity (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while browsing a result tree
#[derive(Error, Debug)]
pub enum SeerError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("unknown column {column:?} for {view} view (columns: {available})")]
    UnknownColumn {
        view: String,
        column: String,
        available: String,
    },

    #[error("invalid config {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("sessions root not found: {path:?}")]
    RootNotFound { path: PathBuf },

    #[error("sessions root is not a directory: {path:?}")]
    RootNotADirectory { path: PathBuf },

    #[error("session not found: {name}")]
    SessionNotFound { name: String },

    #[error("task not found: {task} in session {session}")]
    TaskNotFound { session: String, task: String },

    #[error("task {task} not found in any session")]
    TaskNotInAnySession { task: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl SeerError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        SeerError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        SeerError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SeerError::UnknownFormat(_)
            | SeerError::UnknownColumn { .. }
            | SeerError::InvalidConfig { .. }
            | SeerError::UsageError(_) => ExitCode::Usage,

            SeerError::RootNotFound { .. }
            | SeerError::RootNotADirectory { .. }
            | SeerError::SessionNotFound { .. }
            | SeerError::TaskNotFound { .. }
            | SeerError::TaskNotInAnySession { .. } => ExitCode::Data,

            SeerError::Io(_)
            | SeerError::Json(_)
            | SeerError::Toml(_)
            | SeerError::InvalidValue { .. }
            | SeerError::FailedOperationWithTarget { .. }
            | SeerError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            SeerError::UnknownFormat(_) => "unknown_format",
            SeerError::UnknownColumn { .. } => "unknown_column",
            SeerError::InvalidConfig { .. } => "invalid_config",
            SeerError::UsageError(_) => "usage_error",
            SeerError::RootNotFound { .. } => "root_not_found",
            SeerError::RootNotADirectory { .. } => "root_not_a_directory",
            SeerError::SessionNotFound { .. } => "session_not_found",
            SeerError::TaskNotFound { .. } => "task_not_found",
            SeerError::TaskNotInAnySession { .. } => "task_not_in_any_session",
            SeerError::Io(_) => "io_error",
            SeerError::Json(_) => "json_error",
            SeerError::Toml(_) => "toml_error",
            SeerError::InvalidValue { .. } => "invalid_value",
            SeerError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            SeerError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for seernav operations
pub type Result<T> = std::result::Result<T, SeerError>;
