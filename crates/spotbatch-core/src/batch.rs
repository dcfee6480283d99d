//! Batch runner: sequential pipeline over the jobs of a batch file.
//!
//! Jobs run strictly one at a time in file order. Each job goes through the
//! retry controller; failures are reported per job and never abort the
//! batch. Only an unreadable batch file stops the run before any download.

use serde::Serialize;
use std::path::Path;

use crate::control::CancelToken;
use crate::downloader::Downloader;
use crate::events::{Event, EventSink};
use crate::job::{self, Job};
use crate::retry::run_with_retries;
use crate::settings::DownloadSettings;

/// Terminal result of a batch run.
///
/// An unreadable batch file yields `{0, 0}` with `file_read_failed` set, so
/// callers can tell it apart from an empty file (a no-op completion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BatchSummary {
    pub success_count: usize,
    pub total_count: usize,
    pub file_read_failed: bool,
}

impl BatchSummary {
    pub fn new(success_count: usize, total_count: usize) -> Self {
        Self {
            success_count,
            total_count,
            file_read_failed: false,
        }
    }

    /// Summary of a batch whose file could not be read.
    pub fn read_failure() -> Self {
        Self {
            file_read_failed: true,
            ..Self::default()
        }
    }

    pub fn failed_count(&self) -> usize {
        self.total_count.saturating_sub(self.success_count)
    }

    /// True when the file was read and every job succeeded (vacuously for an empty file).
    pub fn all_succeeded(&self) -> bool {
        !self.file_read_failed && self.success_count == self.total_count
    }
}

/// Runs batches against one downloader, reporting to one event sink.
pub struct BatchRunner<'a> {
    downloader: &'a dyn Downloader,
    events: &'a dyn EventSink,
    cancel: CancelToken,
}

impl<'a> BatchRunner<'a> {
    pub fn new(downloader: &'a dyn Downloader, events: &'a dyn EventSink) -> Self {
        Self {
            downloader,
            events,
            cancel: CancelToken::new(),
        }
    }

    /// Honor `cancel` at job and attempt boundaries.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Read `path` and run its jobs. An unreadable file yields `BatchSummary::read_failure()`.
    pub fn run_file(&self, path: &Path, settings: &DownloadSettings) -> BatchSummary {
        match job::read_jobs(path) {
            Ok(jobs) => self.run_jobs(&jobs, settings),
            Err(e) => {
                tracing::warn!(path = %path.display(), "couldn't read batch file: {}", e);
                self.events.emit(Event::FileReadError {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
                self.finish(BatchSummary::read_failure())
            }
        }
    }

    /// Run raw batch lines (blank and `#` lines are skipped).
    pub fn run_lines<I, S>(&self, lines: I, settings: &DownloadSettings) -> BatchSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let jobs: Vec<Job> = lines
            .into_iter()
            .filter_map(|line| Job::from_batch_line(line.as_ref()))
            .collect();
        self.run_jobs(&jobs, settings)
    }

    /// Run already-parsed jobs in order.
    pub fn run_jobs(&self, jobs: &[Job], settings: &DownloadSettings) -> BatchSummary {
        if jobs.is_empty() {
            tracing::warn!("batch has no jobs");
            self.events.emit(Event::NoJobs);
            return self.finish(BatchSummary::default());
        }

        let total = jobs.len();
        let mut success_count = 0usize;
        tracing::info!(total, "starting batch");

        for (i, job) in jobs.iter().enumerate() {
            if self.cancel.is_cancelled() {
                tracing::info!(completed = i, total, "batch cancelled");
                self.events.emit(Event::Cancelled {
                    completed: i,
                    total,
                });
                break;
            }

            let index = i + 1;
            self.events.emit(Event::JobStarted {
                index,
                total,
                url: job.url().to_string(),
                kind: job.kind(),
            });
            tracing::info!(index, total, url = job.url(), kind = %job.kind(), "processing job");

            let outcome =
                run_with_retries(job, settings, self.downloader, self.events, &self.cancel);
            if outcome.succeeded {
                success_count += 1;
            }
            self.events.emit(Event::JobFinished {
                index,
                total,
                outcome,
            });
        }

        self.finish(BatchSummary::new(success_count, total))
    }

    fn finish(&self, summary: BatchSummary) -> BatchSummary {
        tracing::info!(
            success = summary.success_count,
            total = summary.total_count,
            "batch finished"
        );
        self.events.emit(Event::BatchFinished { summary });
        summary
    }
}
