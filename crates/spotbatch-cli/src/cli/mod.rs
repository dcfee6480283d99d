//! CLI for the spotbatch download runner.

mod commands;
mod render;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use spotbatch_core::batch::BatchSummary;
use spotbatch_core::config;
use spotbatch_core::settings::{AudioFormat, Bitrate, DownloadSettings};
use std::path::PathBuf;

use commands::{run_batch, run_check, run_completions, run_get, run_man};

/// Exit code when a batch or single download finished with failures.
pub const EXIT_PARTIAL_FAILURE: i32 = 2;

/// Exit code when the batch could not run at all (unreadable file).
pub const EXIT_ERROR: i32 = 1;

/// Process exit code for a finished batch. An empty file exits 0.
pub fn batch_exit_code(summary: &BatchSummary) -> i32 {
    if summary.file_read_failed {
        EXIT_ERROR
    } else if summary.failed_count() > 0 {
        EXIT_PARTIAL_FAILURE
    } else {
        0
    }
}

/// Top-level CLI for spotbatch.
#[derive(Debug, Parser)]
#[command(name = "spotbatch")]
#[command(about = "spotbatch: sequential spotdl downloads with retries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Settings shared by `batch` and `get`; unset flags fall back to config.toml.
#[derive(Debug, Clone, Default, Args)]
pub struct SettingsArgs {
    /// Directory downloads are written under (created if missing).
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
    /// Audio format: mp3, flac, ogg, opus, m4a or wav.
    #[arg(long, short = 'f', value_name = "FORMAT")]
    pub format: Option<AudioFormat>,
    /// Bitrate: 320k, 256k, 192k, 160k, 128k, 96k or 64k.
    #[arg(long, short = 'b', value_name = "RATE")]
    pub bitrate: Option<Bitrate>,
}

impl SettingsArgs {
    pub fn apply(&self, mut settings: DownloadSettings) -> DownloadSettings {
        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(format) = self.format {
            settings.audio_format = format;
        }
        if let Some(bitrate) = self.bitrate {
            settings.bitrate = bitrate;
        }
        settings
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every URL in a batch file (one per line, `#` comments).
    Batch {
        /// Path to the batch file.
        file: PathBuf,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Maximum attempts per URL (1-10).
        #[arg(long, value_name = "N")]
        max_retries: Option<u32>,
        /// Seconds to wait between attempts (1-60).
        #[arg(long, value_name = "SECS")]
        retry_delay: Option<u64>,
        /// Print events as JSON lines instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Download a single Spotify URL, or search by name with --search. No retries.
    Get {
        /// Spotify URL / URI, or a search query with --search.
        input: String,
        /// Treat the input as a song name to search for.
        #[arg(long, short = 's')]
        search: bool,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Print events as JSON lines instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Check that the downloader is installed and print its version.
    Check,

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();

        match &cli.command {
            CliCommand::Completions { shell } => {
                run_completions(*shell);
                return Ok(0);
            }
            CliCommand::Man => {
                run_man()?;
                return Ok(0);
            }
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let code = match cli.command {
            CliCommand::Batch {
                file,
                settings,
                max_retries,
                retry_delay,
                json,
            } => {
                let mut s = settings.apply(cfg.settings());
                if let Some(n) = max_retries {
                    s.max_retries = n;
                }
                if let Some(secs) = retry_delay {
                    s.retry_delay_secs = secs;
                }
                let summary = run_batch(&cfg, &file, s, json).await?;
                batch_exit_code(&summary)
            }
            CliCommand::Get {
                input,
                search,
                settings,
                json,
            } => {
                let result = run_get(&cfg, &input, search, settings.apply(cfg.settings()), json)
                    .await?;
                if result.is_success() {
                    0
                } else {
                    EXIT_PARTIAL_FAILURE
                }
            }
            CliCommand::Check => {
                run_check(&cfg)?;
                0
            }
            CliCommand::Completions { .. } | CliCommand::Man => 0,
        };

        Ok(code)
    }
}

#[cfg(test)]
mod tests;
