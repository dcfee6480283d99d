//! `spotdl` adapter: one attempt = one child process.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{AttemptResult, Downloader};
use crate::settings::DownloadSettings;

/// Default program name looked up in PATH.
pub const DEFAULT_PROGRAM: &str = "spotdl";

/// Runs `spotdl download <url> --output <template> --format <fmt> --bitrate <rate> [args...]`.
#[derive(Debug, Clone)]
pub struct SpotdlDownloader {
    program: PathBuf,
    extra_args: Vec<String>,
}

impl SpotdlDownloader {
    /// Use an explicit program path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    /// Find `name` in PATH.
    pub fn from_path(name: &str) -> Option<Self> {
        which::which(name).ok().map(Self::new)
    }

    /// Resolve `name` through PATH when possible, otherwise keep it as given
    /// (so the spawn error surfaces per attempt instead of at startup).
    pub fn locate(name: &str) -> Self {
        Self::from_path(name).unwrap_or_else(|| Self::new(name))
    }

    /// Arguments appended to every invocation (from config).
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Full argument list for one attempt.
    pub fn build_args(
        &self,
        url: &str,
        output_template: &str,
        extra_args: &[&str],
        settings: &DownloadSettings,
    ) -> Vec<String> {
        let mut args = vec![
            "download".to_string(),
            url.to_string(),
            "--output".to_string(),
            output_template.to_string(),
            "--format".to_string(),
            settings.audio_format.to_string(),
            "--bitrate".to_string(),
            settings.bitrate.to_string(),
        ];
        args.extend(self.extra_args.iter().cloned());
        args.extend(extra_args.iter().map(|a| a.to_string()));
        args
    }

    /// `<program> --version`, trimmed. Errors when the program is missing or fails.
    pub fn version(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to run {}", self.program.display()))?;
        if !output.status.success() {
            bail!(
                "{} --version exited with {}",
                self.program.display(),
                output.status
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Downloader for SpotdlDownloader {
    fn run(
        &self,
        url: &str,
        output_template: &str,
        extra_args: &[&str],
        settings: &DownloadSettings,
    ) -> AttemptResult {
        let args = self.build_args(url, output_template, extra_args, settings);
        tracing::debug!(program = %self.program.display(), ?args, "spawning downloader");

        let output = match Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                return AttemptResult::UnknownFailure(format!(
                    "failed to start {}: {}",
                    self.program.display(),
                    e
                ))
            }
        };

        match AttemptResult::from_exit_code(output.status.code()) {
            AttemptResult::UnknownFailure(msg) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                match stderr.lines().rev().find(|l| !l.trim().is_empty()) {
                    Some(last) => AttemptResult::UnknownFailure(format!("{msg}: {}", last.trim())),
                    None => AttemptResult::UnknownFailure(msg),
                }
            }
            result => result,
        }
    }
}
