//! Directory creation and file writes for the scaffold.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Create `dir` and every missing parent. Existing directories are fine.
pub fn materialize_dirs(dir: &Path) -> Result<()> {
    debug!(dir = %dir.display(), "create directories");
    fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))
}

/// Write `contents` to `path`, truncating whatever was there.
///
/// The parent directory must already exist. Returns the number of bytes written.
pub fn emit_file(path: &Path, contents: &str) -> Result<usize> {
    debug!(path = %path.display(), bytes = contents.len(), "write file");
    fs::write(path, contents).with_context(|| format!("write file {}", path.display()))?;
    Ok(contents.len())
}
