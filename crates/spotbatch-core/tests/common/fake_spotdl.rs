//! Writes a shell script that mimics the downloader's exit-status contract.

use std::path::{Path, PathBuf};

/// Script keyed on the URL argument:
/// `*lookup*` → 101, `*meta*` → 100, `*flaky*` → fails twice then succeeds,
/// `*broken*` → exit 7 with a stderr line, anything else → 0.
/// Every invocation is appended to `calls.log` in `dir`.
#[cfg(unix)]
pub fn write(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let d = dir.display();
    let script = format!(
        r#"#!/bin/sh
echo "$*" >> "{d}/calls.log"
case "$2" in
  *lookup*) exit 101 ;;
  *meta*) exit 100 ;;
  *flaky*)
    n=$(cat "{d}/flaky.count" 2>/dev/null || echo 0)
    n=$((n + 1))
    echo "$n" > "{d}/flaky.count"
    if [ "$n" -lt 3 ]; then echo "connection reset" >&2; exit 1; fi
    exit 0 ;;
  *broken*) echo "boom" >&2; exit 7 ;;
esac
exit 0
"#
    );
    let path = dir.join("fake-spotdl");
    std::fs::write(&path, script).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}
