// SimLog Report - platform/fs.rs
//
// Filesystem helpers for the transformation: reading the whole log and
// preparing the output directory.

use std::io;
use std::path::Path;

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion so a stray byte in
/// one log line cannot fail the whole run.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Create `dir` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}

/// Write `bytes` to `path`, replacing any existing file.
pub fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    std::fs::write(path, bytes)
}
