//! Per-run download settings: output directory, audio format, bitrate, retry bounds.
//!
//! A `DownloadSettings` value is built once by the caller (config + CLI flags)
//! and passed read-only into every run; nothing mutates it mid-batch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Accepted range for the number of attempts per job.
pub const MAX_RETRIES_RANGE: RangeInclusive<u32> = 1..=10;

/// Accepted range for the pause between attempts, in seconds.
pub const RETRY_DELAY_RANGE: RangeInclusive<u64> = 1..=60;

/// Invalid settings value (unknown enum name or out-of-range bound).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown audio format `{0}` (expected one of mp3, flac, ogg, opus, m4a, wav)")]
    UnknownAudioFormat(String),
    #[error("unknown bitrate `{0}` (expected one of 320k, 256k, 192k, 160k, 128k, 96k, 64k)")]
    UnknownBitrate(String),
    #[error("max retries must be between 1 and 10, got {0}")]
    MaxRetriesOutOfRange(u32),
    #[error("retry delay must be between 1 and 60 seconds, got {0}")]
    RetryDelayOutOfRange(u64),
}

/// Output audio container/codec passed to the downloader as `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    Flac,
    Ogg,
    Opus,
    M4a,
    Wav,
}

impl AudioFormat {
    pub const ALL: [AudioFormat; 6] = [
        AudioFormat::Mp3,
        AudioFormat::Flac,
        AudioFormat::Ogg,
        AudioFormat::Opus,
        AudioFormat::M4a,
        AudioFormat::Wav,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Flac => "flac",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Opus => "opus",
            AudioFormat::M4a => "m4a",
            AudioFormat::Wav => "wav",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        AudioFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| SettingsError::UnknownAudioFormat(s.to_string()))
    }
}

/// Target bitrate passed to the downloader as `--bitrate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Bitrate {
    #[default]
    #[serde(rename = "320k")]
    K320,
    #[serde(rename = "256k")]
    K256,
    #[serde(rename = "192k")]
    K192,
    #[serde(rename = "160k")]
    K160,
    #[serde(rename = "128k")]
    K128,
    #[serde(rename = "96k")]
    K96,
    #[serde(rename = "64k")]
    K64,
}

impl Bitrate {
    pub const ALL: [Bitrate; 7] = [
        Bitrate::K320,
        Bitrate::K256,
        Bitrate::K192,
        Bitrate::K160,
        Bitrate::K128,
        Bitrate::K96,
        Bitrate::K64,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Bitrate::K320 => "320k",
            Bitrate::K256 => "256k",
            Bitrate::K192 => "192k",
            Bitrate::K160 => "160k",
            Bitrate::K128 => "128k",
            Bitrate::K96 => "96k",
            Bitrate::K64 => "64k",
        }
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bitrate {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Bitrate::ALL
            .into_iter()
            .find(|b| b.as_str() == wanted)
            .ok_or_else(|| SettingsError::UnknownBitrate(s.to_string()))
    }
}

/// Immutable settings for one batch run or one single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSettings {
    /// Root directory that output templates are placed under.
    pub output_dir: PathBuf,
    pub audio_format: AudioFormat,
    pub bitrate: Bitrate,
    /// Maximum number of attempts per job (including the first).
    ///
    /// `validate()` rejects 0. The retry loop does not call `validate()` and
    /// treats 0 as 1, so a job always gets one attempt.
    pub max_retries: u32,
    /// Fixed pause between attempts of the same job.
    pub retry_delay_secs: u64,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("Downloads"),
            audio_format: AudioFormat::default(),
            bitrate: Bitrate::default(),
            max_retries: 5,
            retry_delay_secs: 20,
        }
    }
}

impl DownloadSettings {
    /// Check the retry bounds accepted from callers.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !MAX_RETRIES_RANGE.contains(&self.max_retries) {
            return Err(SettingsError::MaxRetriesOutOfRange(self.max_retries));
        }
        if !RETRY_DELAY_RANGE.contains(&self.retry_delay_secs) {
            return Err(SettingsError::RetryDelayOutOfRange(self.retry_delay_secs));
        }
        Ok(())
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Create the output directory if it does not exist yet.
    pub fn prepare_output_dir(&self) -> std::io::Result<&Path> {
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(&self.output_dir)
    }
}
