//! Result of one downloader attempt, and the exit-status contract behind it.

use serde::Serialize;
use std::fmt;

/// Exit status for a completed download.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status for a metadata-type error (non-retryable).
pub const EXIT_METADATA_ERROR: i32 = 100;
/// Exit status for a lookup / no-result error (non-retryable).
pub const EXIT_LOOKUP_ERROR: i32 = 101;

/// Outcome of exactly one download attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum AttemptResult {
    Success,
    MetadataError,
    LookupError,
    /// Any other exit status, a crash, or a failure to start the tool.
    UnknownFailure(String),
}

impl AttemptResult {
    /// Map a process exit code. `None` means the process was killed by a signal.
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(EXIT_SUCCESS) => AttemptResult::Success,
            Some(EXIT_METADATA_ERROR) => AttemptResult::MetadataError,
            Some(EXIT_LOOKUP_ERROR) => AttemptResult::LookupError,
            Some(other) => {
                AttemptResult::UnknownFailure(format!("downloader exited with status {other}"))
            }
            None => AttemptResult::UnknownFailure("downloader terminated by signal".to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AttemptResult::Success)
    }
}

impl fmt::Display for AttemptResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptResult::Success => write!(f, "Download Completed"),
            AttemptResult::MetadataError => write!(f, "Error: Metadata TypeError"),
            AttemptResult::LookupError => write!(f, "Error: Lookup Error"),
            AttemptResult::UnknownFailure(msg) => write!(f, "Download failed: {msg}"),
        }
    }
}
