//! Progress/log events sent from the runner to whatever front end is attached.
//!
//! Events are emitted in order from the runner thread through an `EventSink`.
//! Sinks must not block: the runner owns the only thread that does work.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::batch::BatchSummary;
use crate::downloader::AttemptResult;
use crate::job::{JobKind, JobOutcome};

/// How a front end should present an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// The batch file could not be read; nothing was processed.
    FileReadError { path: PathBuf, message: String },
    /// The batch file had no jobs after dropping blanks and comments.
    NoJobs,
    JobStarted {
        index: usize,
        total: usize,
        url: String,
        kind: JobKind,
    },
    AttemptStarted {
        url: String,
        attempt: u32,
        max_attempts: u32,
    },
    AttemptFinished {
        url: String,
        attempt: u32,
        result: AttemptResult,
    },
    /// The runner is about to pause before the next attempt.
    RetryScheduled {
        url: String,
        attempt: u32,
        delay_secs: u64,
    },
    JobFinished {
        index: usize,
        total: usize,
        outcome: JobOutcome,
    },
    /// Cancellation was observed; `completed` jobs ran before it.
    Cancelled { completed: usize, total: usize },
    /// Always the last event of a batch run.
    BatchFinished { summary: BatchSummary },
}

impl Event {
    pub fn severity(&self) -> Severity {
        match self {
            Event::FileReadError { .. } => Severity::Error,
            Event::NoJobs | Event::RetryScheduled { .. } | Event::Cancelled { .. } => {
                Severity::Warning
            }
            Event::JobStarted { .. } | Event::AttemptStarted { .. } => Severity::Info,
            Event::AttemptFinished { result, .. } => match result {
                AttemptResult::Success => Severity::Success,
                _ => Severity::Error,
            },
            Event::JobFinished { outcome, .. } => {
                if outcome.succeeded {
                    Severity::Success
                } else {
                    Severity::Error
                }
            }
            Event::BatchFinished { summary } => {
                if summary.file_read_failed {
                    Severity::Error
                } else if summary.total_count == 0 {
                    Severity::Info
                } else if summary.all_succeeded() {
                    Severity::Success
                } else {
                    Severity::Warning
                }
            }
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::FileReadError { path, message } => {
                write!(f, "Couldn't read the file {}: {}", path.display(), message)
            }
            Event::NoJobs => write!(f, "No URLs in the file"),
            Event::JobStarted {
                index, total, url, ..
            } => write!(f, "Processing {index}/{total}: {url}"),
            Event::AttemptStarted {
                attempt,
                max_attempts,
                ..
            } => write!(f, "Download Attempt {attempt}/{max_attempts}"),
            Event::AttemptFinished { result, .. } => write!(f, "{result}"),
            Event::RetryScheduled { delay_secs, .. } => {
                write!(f, "Retrying in {delay_secs}s")
            }
            Event::JobFinished { outcome, .. } => {
                if outcome.succeeded {
                    write!(f, "Downloaded {}", outcome.job.url())
                } else {
                    write!(
                        f,
                        "Download failed after {} attempt(s): {}",
                        outcome.attempts_used,
                        outcome.job.url()
                    )
                }
            }
            Event::Cancelled { completed, total } => {
                write!(f, "Cancelled after {completed}/{total} jobs")
            }
            Event::BatchFinished { summary } if summary.file_read_failed => {
                write!(f, "Batch aborted: nothing was downloaded")
            }
            Event::BatchFinished { summary } => write!(
                f,
                "Batch Download Complete! Successfully downloaded: {}/{}",
                summary.success_count, summary.total_count
            ),
        }
    }
}

/// Receiver of runner events.
pub trait EventSink {
    fn emit(&self, event: Event);
}

impl EventSink for tokio::sync::mpsc::UnboundedSender<Event> {
    fn emit(&self, event: Event) {
        // Closed receiver: front end is gone, keep running.
        if self.send(event).is_err() {
            tracing::debug!("event receiver dropped");
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: Event) {}
}
