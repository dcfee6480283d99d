//! Map attempt results into retry error kinds.

use super::policy::ErrorKind;
use crate::downloader::AttemptResult;

/// `None` for a successful attempt.
pub fn classify(result: &AttemptResult) -> Option<ErrorKind> {
    match result {
        AttemptResult::Success => None,
        AttemptResult::MetadataError => Some(ErrorKind::Metadata),
        AttemptResult::LookupError => Some(ErrorKind::Lookup),
        AttemptResult::UnknownFailure(_) => Some(ErrorKind::Unknown),
    }
}
