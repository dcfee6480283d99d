use std::time::Duration;

use crate::settings::DownloadSettings;

/// Failure class of an attempt, for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Downloader reported bad metadata (status 100).
    Metadata,
    /// Downloader found nothing for the query (status 101).
    Lookup,
    /// Anything else, including crashes and launch failures.
    Unknown,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Fixed-delay policy: same pause before every retry.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). Never below 1.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// `max_retries` of 0 is clamped to a single attempt.
    pub fn from_settings(settings: &DownloadSettings) -> Self {
        Self {
            max_attempts: settings.max_retries.max(1),
            delay: settings.retry_delay(),
        }
    }

    /// `attempt` is 1-based (1 = first attempt).
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        match kind {
            ErrorKind::Metadata | ErrorKind::Lookup => RetryDecision::NoRetry,
            ErrorKind::Unknown => RetryDecision::RetryAfter(self.delay),
        }
    }
}
