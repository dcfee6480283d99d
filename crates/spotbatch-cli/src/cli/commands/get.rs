//! `spotbatch get <url|query>` – one download attempt, no retries.

use anyhow::{Context, Result};
use spotbatch_core::config::SpotbatchConfig;
use spotbatch_core::downloader::AttemptResult;
use spotbatch_core::events::Event;
use spotbatch_core::job::Job;
use spotbatch_core::settings::DownloadSettings;
use spotbatch_core::single::run_single;

use super::open_journal;
use crate::cli::render;

pub async fn run_get(
    cfg: &SpotbatchConfig,
    input: &str,
    search: bool,
    settings: DownloadSettings,
    json: bool,
) -> Result<AttemptResult> {
    let journal = open_journal();
    let job = match Job::interactive(input, search) {
        Ok(job) => job,
        Err(e) => {
            if let Some(journal) = &journal {
                if let Err(je) = journal.record_error(input, &e.to_string()) {
                    tracing::warn!("journal write failed: {:#}", je);
                }
            }
            return Err(e.into());
        }
    };
    settings.prepare_output_dir().with_context(|| {
        format!(
            "could not create output directory {}",
            settings.output_dir.display()
        )
    })?;

    let downloader = cfg.downloader.build();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Event>();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            render::print_event(&event, json);
        }
    });

    let job_for_run = job.clone();
    let result = tokio::task::spawn_blocking(move || {
        run_single(&job_for_run, &settings, &downloader, &tx)
    })
    .await
    .context("download thread failed")?;
    printer.await.context("event printer failed")?;

    if let Some(journal) = &journal {
        if let Err(e) = journal.record_single(&job, &result) {
            tracing::warn!("journal write failed: {:#}", e);
        }
    }
    Ok(result)
}
