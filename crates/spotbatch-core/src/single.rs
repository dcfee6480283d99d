//! Single-job runner for interactive downloads: exactly one attempt, no retries.

use crate::downloader::{AttemptResult, Downloader};
use crate::events::{Event, EventSink};
use crate::job::Job;
use crate::settings::DownloadSettings;

/// Run `job` once and pass the downloader's result straight through.
pub fn run_single(
    job: &Job,
    settings: &DownloadSettings,
    downloader: &dyn Downloader,
    events: &dyn EventSink,
) -> AttemptResult {
    let route = job.route();
    let template = route.output_template(&settings.output_dir);

    events.emit(Event::AttemptStarted {
        url: job.url().to_string(),
        attempt: 1,
        max_attempts: 1,
    });
    tracing::info!(url = job.url(), kind = %job.kind(), "starting single download");

    let result = downloader.run(job.url(), &template, route.extra_args, settings);
    if result.is_success() {
        tracing::info!(url = job.url(), "download completed");
    } else {
        tracing::warn!(url = job.url(), "download failed: {}", result);
    }

    events.emit(Event::AttemptFinished {
        url: job.url().to_string(),
        attempt: 1,
        result: result.clone(),
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullSink;
    use crate::testing::{fast_settings, Recorder, Scripted};

    #[test]
    fn unknown_failure_is_not_retried() {
        let d = Scripted::new(vec![
            AttemptResult::UnknownFailure("exit 1".into()),
            AttemptResult::Success,
        ]);
        let job = Job::interactive("https://open.spotify.com/track/1", false).unwrap();
        let result = run_single(&job, &fast_settings(5), &d, &NullSink);
        assert_eq!(result, AttemptResult::UnknownFailure("exit 1".into()));
        assert_eq!(d.calls().len(), 1);
    }

    #[test]
    fn search_query_is_passed_verbatim_with_track_template() {
        let d = Scripted::always(AttemptResult::Success);
        let events = Recorder::default();
        let job = Job::interactive("Queen - Bohemian Rhapsody", true).unwrap();
        let result = run_single(&job, &fast_settings(1), &d, &events);
        assert!(result.is_success());
        let calls = d.calls();
        assert_eq!(calls[0].url, "Queen - Bohemian Rhapsody");
        assert!(calls[0].output_template.ends_with("{artist} - {title}.{output-ext}"));
        assert!(calls[0].extra_args.is_empty());
        assert_eq!(events.events().len(), 2);
    }

    #[test]
    fn classified_errors_pass_through() {
        let d = Scripted::always(AttemptResult::MetadataError);
        let job = Job::interactive("https://open.spotify.com/album/9", false).unwrap();
        assert_eq!(
            run_single(&job, &fast_settings(3), &d, &NullSink),
            AttemptResult::MetadataError
        );
    }
}
