//! Jobs: one URL (or search query) with a kind decided once, at parse time.

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::classify::{self, Route, ValidationError};

/// Routing kind of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Track,
    Album,
    Playlist,
    Search,
    /// Interactive input that is neither a recognized link nor a search.
    Unknown,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JobKind::Track => "track",
            JobKind::Album => "album",
            JobKind::Playlist => "playlist",
            JobKind::Search => "search",
            JobKind::Unknown => "unknown",
        })
    }
}

/// One unit of work. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    url: String,
    kind: JobKind,
}

impl Job {
    /// Parse one line of a batch file. Blank lines and `#` comments yield `None`.
    pub fn from_batch_line(line: &str) -> Option<Self> {
        let url = line.trim();
        if url.is_empty() || url.starts_with('#') {
            return None;
        }
        Some(Self {
            url: url.to_string(),
            kind: classify::kind_of_link(url),
        })
    }

    /// Build a job from interactive input (a link, or a query when `search` is set).
    pub fn interactive(input: &str, search: bool) -> Result<Self, ValidationError> {
        let route = classify::classify_interactive(input, search)?;
        Ok(Self {
            url: input.trim().to_string(),
            kind: route.kind,
        })
    }

    /// URL, or the raw query for search jobs.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }

    pub fn route(&self) -> Route {
        Route::for_kind(self.kind)
    }
}

/// Result of running one job through the retry loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOutcome {
    pub job: Job,
    pub succeeded: bool,
    pub attempts_used: u32,
}

/// Jobs in file order, skipping blank and comment lines.
pub fn parse_jobs(text: &str) -> Vec<Job> {
    text.lines().filter_map(Job::from_batch_line).collect()
}

/// Read and parse a UTF-8 batch file.
pub fn read_jobs(path: &Path) -> std::io::Result<Vec<Job>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_jobs(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_blank_and_comment_lines() {
        let text = "https://x/playlist/1\n# comment\n\n   \n  # indented comment\n  https://x/album/2  \n";
        let jobs = parse_jobs(text);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].url(), "https://x/playlist/1");
        assert_eq!(jobs[0].kind(), JobKind::Playlist);
        assert_eq!(jobs[1].url(), "https://x/album/2");
        assert_eq!(jobs[1].kind(), JobKind::Album);
    }

    #[test]
    fn parse_keeps_file_order_and_duplicates() {
        let text = "https://b/track/1\r\nhttps://a/track/2\r\nhttps://b/track/1\r\n";
        let urls: Vec<_> = parse_jobs(text).iter().map(|j| j.url().to_string()).collect();
        assert_eq!(
            urls,
            vec!["https://b/track/1", "https://a/track/2", "https://b/track/1"]
        );
    }

    #[test]
    fn interactive_search_keeps_query_verbatim() {
        let job = Job::interactive("  Daft Punk - One More Time ", true).unwrap();
        assert_eq!(job.kind(), JobKind::Search);
        assert_eq!(job.url(), "Daft Punk - One More Time");
    }

    #[test]
    fn interactive_rejects_plain_text_without_search() {
        assert!(matches!(
            Job::interactive("Daft Punk", false),
            Err(ValidationError::UnrecognizedLink(_))
        ));
    }

    #[test]
    fn read_jobs_reports_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_jobs(&tmp.path().join("missing.txt")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
