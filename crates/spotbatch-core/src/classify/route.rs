//! Output templates and extra downloader arguments per job kind.

use std::path::Path;

use crate::job::JobKind;

/// Extra downloader flags for playlist jobs.
pub const PLAYLIST_EXTRA_ARGS: &[&str] = &["--playlist-numbering", "--playlist-retain-track-cover"];

const TRACK_PATTERN: &str = "{artist} - {title}.{output-ext}";
const ALBUM_PATTERN: &str = "{artist}/{album}/{title}.{output-ext}";
const PLAYLIST_PATTERN: &str = "{playlist}/{title}.{output-ext}";

/// Where and how the downloader should write a job's files.
///
/// `pattern` is relative to the output directory; the placeholders are
/// substituted by the downloader, never by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub kind: JobKind,
    pub pattern: &'static str,
    pub extra_args: &'static [&'static str],
}

impl Route {
    pub fn for_kind(kind: JobKind) -> Self {
        match kind {
            JobKind::Playlist => Route {
                kind,
                pattern: PLAYLIST_PATTERN,
                extra_args: PLAYLIST_EXTRA_ARGS,
            },
            JobKind::Album => Route {
                kind,
                pattern: ALBUM_PATTERN,
                extra_args: &[],
            },
            JobKind::Track | JobKind::Search | JobKind::Unknown => Route {
                kind,
                pattern: TRACK_PATTERN,
                extra_args: &[],
            },
        }
    }

    /// Full output template for the downloader, rooted at `output_dir`.
    pub fn output_template(&self, output_dir: &Path) -> String {
        output_dir.join(self.pattern).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_route_has_numbering_args() {
        let r = Route::for_kind(JobKind::Playlist);
        assert!(r.pattern.contains("{playlist}"));
        assert_eq!(
            r.extra_args,
            &["--playlist-numbering", "--playlist-retain-track-cover"]
        );
    }

    #[test]
    fn album_and_track_routes_have_no_extra_args() {
        let album = Route::for_kind(JobKind::Album);
        assert_eq!(album.pattern, "{artist}/{album}/{title}.{output-ext}");
        assert!(album.extra_args.is_empty());

        let track = Route::for_kind(JobKind::Track);
        assert_eq!(track.pattern, "{artist} - {title}.{output-ext}");
        assert!(track.extra_args.is_empty());

        assert_eq!(Route::for_kind(JobKind::Search).pattern, track.pattern);
    }

    #[test]
    fn output_template_is_rooted_at_output_dir() {
        let r = Route::for_kind(JobKind::Album);
        let t = r.output_template(Path::new("music"));
        assert!(t.starts_with("music"));
        assert!(t.ends_with("{artist}/{album}/{title}.{output-ext}"));
    }
}
