//! Tracing setup for the CLI.
//!
//! Events are appended to `spotbatch.log` in the XDG state directory
//! (`~/.local/state/spotbatch/`). When that file can't be opened the CLI
//! calls [`init_logging_stderr`] instead. The filter comes from
//! `SPOTBATCH_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`].

use anyhow::{anyhow, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "spotbatch.log";
pub const LOG_ENV: &str = "SPOTBATCH_LOG";
pub const DEFAULT_FILTER: &str = "info,spotbatch=debug,spotbatch_core=debug";

/// Hands every event its own duplicate of the open log file.
struct LogFile(File);

/// Per-event destination. Falls back to stderr when the log handle can't be duplicated.
enum EventWriter {
    Log(File),
    Stderr(io::Stderr),
}

impl Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            EventWriter::Log(f) => f.write(buf),
            EventWriter::Stderr(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            EventWriter::Log(f) => f.flush(),
            EventWriter::Stderr(e) => e.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> EventWriter {
        match self.0.try_clone() {
            Ok(f) => EventWriter::Log(f),
            Err(_) => EventWriter::Stderr(io::stderr()),
        }
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Where file logging goes; the state directory is created if needed.
pub fn log_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("spotbatch")?;
    Ok(dirs.place_state_file(LOG_FILE)?)
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber writing to [`log_path`]. Returns the log path.
///
/// Errors if the file can't be opened or a subscriber is already set.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_path()?;
    let file = open_append(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(LogFile(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))?;
    tracing::info!(path = %path.display(), "logging to file");
    Ok(path)
}

/// Install a stderr-only subscriber. A no-op if one is already set.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
