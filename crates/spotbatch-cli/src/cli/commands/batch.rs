//! `spotbatch batch <file>` – run every URL of a batch file with retries.

use anyhow::{Context, Result};
use spotbatch_core::batch::{BatchRunner, BatchSummary};
use spotbatch_core::config::SpotbatchConfig;
use spotbatch_core::control::CancelToken;
use spotbatch_core::events::Event;
use spotbatch_core::settings::DownloadSettings;
use std::future::Future;
use std::io;
use std::path::Path;

use super::open_journal;
use crate::cli::render;

/// Exit code after a second interrupt (128 + SIGINT).
const EXIT_INTERRUPTED: i32 = 130;

/// Cancels `cancel` on the first interrupt, then keeps listening.
/// Returns true when a second interrupt arrives.
async fn watch_interrupts<F, Fut>(cancel: CancelToken, mut next_interrupt: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    if let Err(e) = next_interrupt().await {
        tracing::warn!("can't listen for interrupts: {}", e);
        return false;
    }
    tracing::warn!("interrupt received, stopping after the current attempt");
    eprintln!("Interrupted: stopping after the current attempt (Ctrl-C again to quit now)...");
    cancel.cancel();
    next_interrupt().await.is_ok()
}

pub async fn run_batch(
    cfg: &SpotbatchConfig,
    file: &Path,
    settings: DownloadSettings,
    json: bool,
) -> Result<BatchSummary> {
    settings.validate()?;
    let out = settings.prepare_output_dir().with_context(|| {
        format!(
            "could not create output directory {}",
            settings.output_dir.display()
        )
    })?;
    tracing::info!(file = %file.display(), output_dir = %out.display(), "batch requested");

    let downloader = cfg.downloader.build();
    let journal = open_journal();
    let cancel = CancelToken::new();

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Event>();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            render::print_event(&event, json);
            if let Some(journal) = &journal {
                if let Err(e) = journal.record_event(&event) {
                    tracing::warn!("journal write failed: {:#}", e);
                }
            }
        }
    });

    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if watch_interrupts(cancel, tokio::signal::ctrl_c).await {
                tracing::warn!("second interrupt, exiting");
                eprintln!("Interrupted again: exiting.");
                std::process::exit(EXIT_INTERRUPTED);
            }
        })
    };

    let file = file.to_path_buf();
    let summary = tokio::task::spawn_blocking(move || {
        BatchRunner::new(&downloader, &tx)
            .with_cancel(cancel)
            .run_file(&file, &settings)
    })
    .await
    .context("batch runner thread failed")?;

    ctrl_c.abort();
    printer.await.context("event printer failed")?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::future::{ready, Ready};

    /// Interrupt source that yields `results` in order, then fails.
    fn interrupts(results: Vec<io::Result<()>>) -> impl FnMut() -> Ready<io::Result<()>> {
        let mut results = VecDeque::from(results);
        move || ready(results.pop_front().unwrap_or_else(|| Err(io::Error::other("closed"))))
    }

    #[tokio::test]
    async fn second_interrupt_requests_exit() {
        let cancel = CancelToken::new();
        let exit = watch_interrupts(cancel.clone(), interrupts(vec![Ok(()), Ok(())])).await;
        assert!(exit);
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn single_interrupt_only_cancels() {
        let cancel = CancelToken::new();
        let exit = watch_interrupts(cancel.clone(), interrupts(vec![Ok(())])).await;
        assert!(!exit);
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn listener_failure_leaves_batch_running() {
        let cancel = CancelToken::new();
        let exit = watch_interrupts(cancel.clone(), interrupts(vec![])).await;
        assert!(!exit);
        assert!(!cancel.is_cancelled());
    }
}
