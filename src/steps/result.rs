//! Step outcomes.
//!
//! Every registered step resolves to exactly one [`StepResult`]. A failing
//! action is captured here as a [`StepActionError`]; it never escapes the
//! runner as a `StepfsError`.

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// How a step resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step's action completed successfully.
    Completed,

    /// Step's action failed.
    Failed,

    /// Step was not executed because the previous step failed.
    Skipped,
}

/// Opaque payload produced by a successful action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StepOutput {
    /// The action had nothing to report (write, delete, rename, ...).
    Nothing,
    /// Raw file contents.
    Bytes(Vec<u8>),
    /// Decoded file contents.
    Text(String),
    /// Directory entry names, sorted.
    Listing(Vec<String>),
    /// File contents split into lines.
    Lines(Vec<String>),
    /// A parsed structured value.
    Json(serde_json::Value),
    /// Result of an existence check.
    Exists(bool),
    /// A watch was registered on this path.
    Watching(PathBuf),
}

impl StepOutput {
    /// Short human-readable rendering for summaries.
    pub fn preview(&self) -> Option<String> {
        match self {
            StepOutput::Nothing => None,
            StepOutput::Bytes(bytes) => Some(format!("{} bytes", bytes.len())),
            StepOutput::Text(text) => Some(text.clone()),
            StepOutput::Listing(entries) => Some(entries.join(", ")),
            StepOutput::Lines(lines) => Some(format!("{} lines", lines.len())),
            StepOutput::Json(value) => Some(value.to_string()),
            StepOutput::Exists(true) => Some("exists".to_string()),
            StepOutput::Exists(false) => Some("does not exist".to_string()),
            StepOutput::Watching(path) => Some(format!("watching {}", path.display())),
        }
    }
}

/// Category of a step action failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionErrorKind {
    /// The target path does not exist.
    NotFound,
    /// The operation was refused by the filesystem.
    PermissionDenied,
    /// The target already exists.
    AlreadyExists,
    /// Bytes could not be decoded with the requested encoding.
    Decode,
    /// Structured data could not be encoded or decoded.
    Codec,
    /// A change watch could not be registered.
    Watch,
    /// Any other I/O failure.
    Io,
    /// The action panicked.
    Panic,
}

impl fmt::Display for ActionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionErrorKind::NotFound => "not found",
            ActionErrorKind::PermissionDenied => "permission denied",
            ActionErrorKind::AlreadyExists => "already exists",
            ActionErrorKind::Decode => "decode error",
            ActionErrorKind::Codec => "codec error",
            ActionErrorKind::Watch => "watch error",
            ActionErrorKind::Io => "io error",
            ActionErrorKind::Panic => "action panicked",
        };
        write!(f, "{}", s)
    }
}

/// Failure of a step's underlying filesystem, codec or decoder operation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind}: {message}")]
pub struct StepActionError {
    /// Failure category.
    pub kind: ActionErrorKind,
    /// Description of the cause.
    pub message: String,
}

impl StepActionError {
    /// Create an error of the given kind.
    pub fn new(kind: ActionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Create a `NotFound` error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ActionErrorKind::NotFound, message)
    }
}

impl From<std::io::Error> for StepActionError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let kind = match err.kind() {
            ErrorKind::NotFound => ActionErrorKind::NotFound,
            ErrorKind::PermissionDenied => ActionErrorKind::PermissionDenied,
            ErrorKind::AlreadyExists => ActionErrorKind::AlreadyExists,
            ErrorKind::InvalidData => ActionErrorKind::Decode,
            _ => ActionErrorKind::Io,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<serde_json::Error> for StepActionError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ActionErrorKind::Codec, err.to_string())
    }
}

/// Result of resolving a single step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    /// Step name.
    pub name: String,

    /// How the step resolved.
    pub status: StepStatus,

    /// Payload of a completed step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<StepOutput>,

    /// Cause of a failed step. Present iff `status` is `Failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<StepActionError>,

    /// Time spent in the action.
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl StepResult {
    /// Create a completed result.
    pub fn success(name: &str, duration: Duration, output: StepOutput) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Completed,
            output: Some(output),
            error: None,
            duration,
        }
    }

    /// Create a failure result.
    pub fn failure(name: &str, duration: Duration, error: StepActionError) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Failed,
            output: None,
            error: Some(error),
            duration,
        }
    }

    /// Create a skipped result.
    pub fn skipped(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Skipped,
            output: None,
            error: None,
            duration: Duration::ZERO,
        }
    }

    /// Whether the step's action ran and succeeded.
    pub fn succeeded(&self) -> bool {
        self.status == StepStatus::Completed
    }
}

pub(crate) fn serialize_millis<S: Serializer>(
    duration: &Duration,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_u64(duration.as_millis() as u64)
}

/// Format a duration for display.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs == 0 {
        format!("{}ms", millis)
    } else if secs < 60 {
        format!("{}.{}s", secs, millis / 100)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    }
}
