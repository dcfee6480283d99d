//! The external downloader boundary.
//!
//! The core never downloads or transcodes anything itself: it hands a URL,
//! an output template and extra arguments to a `Downloader` and gets back an
//! `AttemptResult`. `SpotdlDownloader` is the process-spawning adapter.

mod result;
mod spotdl;

pub use result::{AttemptResult, EXIT_LOOKUP_ERROR, EXIT_METADATA_ERROR, EXIT_SUCCESS};
pub use spotdl::{SpotdlDownloader, DEFAULT_PROGRAM};

use crate::settings::DownloadSettings;

/// Performs one download attempt.
///
/// Implementations may block for as long as the external work takes; there
/// is no timeout. Any failure, including a failure to launch, must be
/// reported as `AttemptResult::UnknownFailure` rather than a panic.
pub trait Downloader {
    fn run(
        &self,
        url: &str,
        output_template: &str,
        extra_args: &[&str],
        settings: &DownloadSettings,
    ) -> AttemptResult;
}
