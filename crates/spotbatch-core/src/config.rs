use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::downloader::{SpotdlDownloader, DEFAULT_PROGRAM};
use crate::settings::{AudioFormat, Bitrate, DownloadSettings};

/// Retry parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per job (including the first).
    pub max_retries: u32,
    /// Fixed pause between attempts, in seconds.
    pub retry_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            retry_delay_secs: 20,
        }
    }
}

/// External downloader invocation (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloaderConfig {
    /// Program name (looked up in PATH) or absolute path.
    pub program: String,
    /// Extra arguments appended to every download invocation.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl DownloaderConfig {
    pub fn build(&self) -> SpotdlDownloader {
        SpotdlDownloader::locate(&self.program).with_extra_args(self.extra_args.clone())
    }
}

/// Global configuration loaded from `~/.config/spotbatch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotbatchConfig {
    /// Default output directory (relative paths resolve against the working dir).
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub audio_format: AudioFormat,
    #[serde(default)]
    pub bitrate: Bitrate,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub downloader: DownloaderConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("Downloads")
}

impl Default for SpotbatchConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            audio_format: AudioFormat::default(),
            bitrate: Bitrate::default(),
            retry: RetryConfig::default(),
            downloader: DownloaderConfig::default(),
        }
    }
}

impl SpotbatchConfig {
    /// Settings for a run before any CLI overrides.
    pub fn settings(&self) -> DownloadSettings {
        DownloadSettings {
            output_dir: self.output_dir.clone(),
            audio_format: self.audio_format,
            bitrate: self.bitrate,
            max_retries: self.retry.max_retries,
            retry_delay_secs: self.retry.retry_delay_secs,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("spotbatch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SpotbatchConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<SpotbatchConfig> {
    if !path.exists() {
        let default_cfg = SpotbatchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: SpotbatchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
