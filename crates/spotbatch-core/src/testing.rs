//! Test doubles shared by unit tests: scripted downloader and event recorder.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::downloader::{AttemptResult, Downloader};
use crate::events::{Event, EventSink};
use crate::settings::DownloadSettings;

/// One recorded downloader call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub url: String,
    pub output_template: String,
    pub extra_args: Vec<String>,
}

/// Returns queued results in order; the last one repeats forever.
pub struct Scripted {
    results: Mutex<VecDeque<AttemptResult>>,
    calls: Mutex<Vec<Call>>,
}

impl Scripted {
    pub fn new(results: Vec<AttemptResult>) -> Self {
        assert!(!results.is_empty());
        Self {
            results: Mutex::new(results.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always(result: AttemptResult) -> Self {
        Self::new(vec![result])
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl Downloader for Scripted {
    fn run(
        &self,
        url: &str,
        output_template: &str,
        extra_args: &[&str],
        _settings: &DownloadSettings,
    ) -> AttemptResult {
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            output_template: output_template.to_string(),
            extra_args: extra_args.iter().map(|a| a.to_string()).collect(),
        });
        let mut results = self.results.lock().unwrap();
        if results.len() > 1 {
            results.pop_front().unwrap()
        } else {
            results.front().cloned().unwrap()
        }
    }
}

#[derive(Default)]
pub struct Recorder(Mutex<Vec<Event>>);

impl Recorder {
    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.0.lock().unwrap().iter().filter(|e| pred(*e)).count()
    }
}

impl EventSink for Recorder {
    fn emit(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }
}

/// Settings with no pause between attempts.
pub fn fast_settings(max_retries: u32) -> DownloadSettings {
    DownloadSettings {
        output_dir: "out".into(),
        max_retries,
        retry_delay_secs: 0,
        ..DownloadSettings::default()
    }
}
