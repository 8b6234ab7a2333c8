use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{FixtureError, Result};
use crate::source::BufferSource;

/// Locates the directory `name` holding reference files, starting from `start`.
///
/// `start` itself is used when it is already named `name`, then `start/name`,
/// then `start/../test/name`.
pub fn resolve_output_dir(start: &Path, name: &str) -> Result<PathBuf> {
    if start.file_name().is_some_and(|base| base == name) {
        return Ok(start.to_path_buf());
    }
    let candidates = [
        start.join(name),
        start.join("..").join("test").join(name),
    ];
    candidates
        .into_iter()
        .find(|dir| dir.is_dir())
        .ok_or_else(|| FixtureError::NotFound {
            path: start.join(name),
        })
}

/// `resolve_output_dir` from the current working directory.
pub fn output_dir(name: &str) -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|e| FixtureError::io(Path::new("."), e))?;
    resolve_output_dir(&cwd, name)
}

pub fn string_to_file(path: &Path, content: &[u8]) -> Result<()> {
    fs::write(path, content).map_err(|e| FixtureError::io(path, e))
}

/// Writes the unread part of `content` without consuming it.
pub fn buffer_to_file(path: &Path, content: &BufferSource) -> Result<()> {
    string_to_file(path, content.remaining())
}

/// Copies everything left in `content` to `path`, returning the byte count.
pub fn reader_to_file<R: Read>(path: &Path, mut content: R) -> Result<u64> {
    let io_err = |e| FixtureError::io(path, e);
    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    let n = io::copy(&mut content, &mut out).map_err(io_err)?;
    out.flush().map_err(io_err)?;
    Ok(n)
}
