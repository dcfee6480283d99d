//! URL classification: which kind of job a link is, and how to route it.
//!
//! Classification is a case-insensitive substring match, checked in priority
//! order (first match wins): `playlist`, then `album`, otherwise a track.
//! Interactive input can bypass it with search mode, which passes the raw
//! query to the downloader. Everything here is a pure function of the input
//! string and the search flag.

mod error;
mod route;

pub use error::ValidationError;
pub use route::{Route, PLAYLIST_EXTRA_ARGS};

use crate::job::JobKind;

/// Kind of a link, by substring priority. Never fails; unrecognized links are tracks.
pub fn kind_of_link(url: &str) -> JobKind {
    let lower = url.to_ascii_lowercase();
    if lower.contains("playlist") {
        JobKind::Playlist
    } else if lower.contains("album") {
        JobKind::Album
    } else {
        JobKind::Track
    }
}

/// True for `https://open.spotify.com/...` style links and `spotify:` URIs.
pub fn is_recognized_link(input: &str) -> bool {
    input.to_ascii_lowercase().contains("spotify.com") || input.starts_with("spotify:")
}

/// Kind of interactive input. `Unknown` means it would be rejected.
pub fn detect_kind(input: &str, search: bool) -> JobKind {
    if search {
        JobKind::Search
    } else if is_recognized_link(input) {
        kind_of_link(input)
    } else {
        JobKind::Unknown
    }
}

/// Route for a batch line.
pub fn classify(url: &str) -> Route {
    Route::for_kind(kind_of_link(url))
}

/// Route for interactive input, rejecting empty input and unrecognized links.
pub fn classify_interactive(input: &str, search: bool) -> Result<Route, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }
    match detect_kind(input, search) {
        JobKind::Unknown => Err(ValidationError::UnrecognizedLink(input.to_string())),
        kind => Ok(Route::for_kind(kind)),
    }
}
