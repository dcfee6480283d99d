//! Retry loop: run one job until success, a classified failure, or the budget is spent.

use super::classify::classify;
use super::policy::{RetryDecision, RetryPolicy};
use crate::control::CancelToken;
use crate::downloader::Downloader;
use crate::events::{Event, EventSink};
use crate::job::{Job, JobOutcome};
use crate::settings::DownloadSettings;

/// Runs `job` through the downloader, retrying transient failures.
///
/// The route (template and extra args) is derived once from the job's kind
/// and reused for every attempt. `settings.max_retries` of 0 still runs one
/// attempt (see [`RetryPolicy::from_settings`]). Cancellation is honored during the pause
/// between attempts; the outcome then reports the attempts actually made.
pub fn run_with_retries(
    job: &Job,
    settings: &DownloadSettings,
    downloader: &dyn Downloader,
    events: &dyn EventSink,
    cancel: &CancelToken,
) -> JobOutcome {
    let policy = RetryPolicy::from_settings(settings);
    let route = job.route();
    let template = route.output_template(&settings.output_dir);
    let finish = |succeeded: bool, attempts_used: u32| JobOutcome {
        job: job.clone(),
        succeeded,
        attempts_used,
    };

    let mut attempt = 1u32;
    loop {
        events.emit(Event::AttemptStarted {
            url: job.url().to_string(),
            attempt,
            max_attempts: policy.max_attempts,
        });
        tracing::info!(url = job.url(), attempt, max = policy.max_attempts, "download attempt");

        let result = downloader.run(job.url(), &template, route.extra_args, settings);
        events.emit(Event::AttemptFinished {
            url: job.url().to_string(),
            attempt,
            result: result.clone(),
        });

        let Some(kind) = classify(&result) else {
            tracing::info!(url = job.url(), attempt, "download completed");
            return finish(true, attempt);
        };

        match policy.decide(attempt, kind) {
            RetryDecision::NoRetry => {
                tracing::warn!(url = job.url(), attempt, ?kind, "giving up: {}", result);
                return finish(false, attempt);
            }
            RetryDecision::RetryAfter(delay) => {
                tracing::warn!(url = job.url(), attempt, ?delay, "retrying: {}", result);
                events.emit(Event::RetryScheduled {
                    url: job.url().to_string(),
                    attempt,
                    delay_secs: delay.as_secs(),
                });
                if cancel.sleep(delay) {
                    tracing::info!(url = job.url(), attempt, "cancelled before next attempt");
                    return finish(false, attempt);
                }
                attempt += 1;
            }
        }
    }
}
