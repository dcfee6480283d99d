//! Validation errors for interactive input.

/// Input rejected before any download attempt is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Nothing to download: empty or whitespace-only input.
    #[error("please enter a URL or search query")]
    Empty,
    /// Not a Spotify link, and search mode is off.
    #[error("`{0}` is not a valid Spotify URL; enable search mode to look it up by name")]
    UnrecognizedLink(String),
}
