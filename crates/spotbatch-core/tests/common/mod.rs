//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod fake_spotdl;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use spotbatch_core::downloader::{AttemptResult, Downloader};
use spotbatch_core::events::{Event, EventSink};
use spotbatch_core::settings::DownloadSettings;

/// Downloader stub that maps a call number (1-based) to a result.
pub struct StubDownloader<F> {
    calls: AtomicUsize,
    templates: Mutex<Vec<(String, String, Vec<String>)>>,
    respond: F,
}

impl<F> StubDownloader<F>
where
    F: Fn(usize, &str) -> AttemptResult,
{
    pub fn new(respond: F) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            templates: Mutex::new(Vec::new()),
            respond,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (url, output template, extra args) per call.
    pub fn invocations(&self) -> Vec<(String, String, Vec<String>)> {
        self.templates.lock().unwrap().clone()
    }
}

impl<F> Downloader for StubDownloader<F>
where
    F: Fn(usize, &str) -> AttemptResult,
{
    fn run(
        &self,
        url: &str,
        output_template: &str,
        extra_args: &[&str],
        _settings: &DownloadSettings,
    ) -> AttemptResult {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.templates.lock().unwrap().push((
            url.to_string(),
            output_template.to_string(),
            extra_args.iter().map(|a| a.to_string()).collect(),
        ));
        (self.respond)(n, url)
    }
}

#[derive(Default)]
pub struct CollectingSink(Mutex<Vec<Event>>);

impl CollectingSink {
    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }
}

pub fn settings_in(dir: &std::path::Path, max_retries: u32) -> DownloadSettings {
    DownloadSettings {
        output_dir: dir.to_path_buf(),
        max_retries,
        retry_delay_secs: 0,
        ..DownloadSettings::default()
    }
}
