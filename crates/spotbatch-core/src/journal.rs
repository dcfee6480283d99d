//! Outcome journal: plain-text success/failure/error logs per download.
//!
//! Lines are `<unix-seconds>\t<url>\t<detail>` appended to `success.log`,
//! `failed.log` or `error.log` under the journal directory
//! (`~/.local/state/spotbatch/log` by default).

use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::downloader::AttemptResult;
use crate::events::Event;
use crate::job::{Job, JobOutcome};

pub const SUCCESS_LOG: &str = "success.log";
pub const FAILED_LOG: &str = "failed.log";
pub const ERROR_LOG: &str = "error.log";

#[derive(Debug, Clone)]
pub struct OutcomeJournal {
    dir: PathBuf,
}

impl OutcomeJournal {
    /// Journal under the XDG state dir.
    pub fn open_default() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("spotbatch")?;
        let dir = xdg_dirs.create_state_directory("log")?;
        Ok(Self { dir })
    }

    /// Journal in `dir`, created if missing.
    pub fn open_at(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_outcome(&self, outcome: &JobOutcome) -> Result<()> {
        if outcome.succeeded {
            self.append(SUCCESS_LOG, outcome.job.url(), "")
        } else {
            let detail = format!("gave up after {} attempt(s)", outcome.attempts_used);
            self.append(FAILED_LOG, outcome.job.url(), &detail)
        }
    }

    pub fn record_single(&self, job: &Job, result: &AttemptResult) -> Result<()> {
        if result.is_success() {
            self.append(SUCCESS_LOG, job.url(), "")
        } else {
            self.append(FAILED_LOG, job.url(), &result.to_string())
        }
    }

    pub fn record_error(&self, subject: &str, message: &str) -> Result<()> {
        self.append(ERROR_LOG, subject, message)
    }

    /// Record the batch events that carry an outcome; other events are ignored.
    pub fn record_event(&self, event: &Event) -> Result<()> {
        match event {
            Event::JobFinished { outcome, .. } => self.record_outcome(outcome),
            Event::FileReadError { path, message } => {
                self.record_error(&path.display().to_string(), message)
            }
            _ => Ok(()),
        }
    }

    fn append(&self, file: &str, subject: &str, detail: &str) -> Result<()> {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let mut f = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.dir.join(file))?;
        writeln!(f, "{ts}\t{subject}\t{detail}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(dir: &Path, file: &str) -> Vec<String> {
        fs::read_to_string(dir.join(file))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn outcomes_go_to_success_and_failed_logs() {
        let tmp = tempfile::tempdir().unwrap();
        let journal = OutcomeJournal::open_at(&tmp.path().join("log")).unwrap();
        let job = Job::from_batch_line("https://x/track/1").unwrap();
        journal
            .record_outcome(&JobOutcome {
                job: job.clone(),
                succeeded: true,
                attempts_used: 1,
            })
            .unwrap();
        journal
            .record_outcome(&JobOutcome {
                job,
                succeeded: false,
                attempts_used: 3,
            })
            .unwrap();

        let ok = read(journal.dir(), SUCCESS_LOG);
        assert_eq!(ok.len(), 1);
        assert!(ok[0].contains("\thttps://x/track/1\t"));
        let failed = read(journal.dir(), FAILED_LOG);
        assert_eq!(failed.len(), 1);
        assert!(failed[0].ends_with("gave up after 3 attempt(s)"));
    }

    #[test]
    fn file_read_error_event_goes_to_error_log() {
        let tmp = tempfile::tempdir().unwrap();
        let journal = OutcomeJournal::open_at(tmp.path()).unwrap();
        journal
            .record_event(&Event::FileReadError {
                path: "/missing/batch.txt".into(),
                message: "No such file or directory".into(),
            })
            .unwrap();
        journal.record_event(&Event::NoJobs).unwrap();
        let errors = read(tmp.path(), ERROR_LOG);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("/missing/batch.txt"));
        assert!(!tmp.path().join(SUCCESS_LOG).exists());
    }

    #[test]
    fn single_failure_records_result_text() {
        let tmp = tempfile::tempdir().unwrap();
        let journal = OutcomeJournal::open_at(tmp.path()).unwrap();
        let job = Job::interactive("some query", true).unwrap();
        journal
            .record_single(&job, &AttemptResult::LookupError)
            .unwrap();
        let failed = read(tmp.path(), FAILED_LOG);
        assert!(failed[0].ends_with("Error: Lookup Error"));
    }
}
