//! Atomic file replacement for the profile and the config file

use std::io::{self, Write};
use std::path::Path;

use tempfile::Builder;

/// Replace `path` with `contents`.
///
/// The bytes are written to a uniquely named staging file next to `path`
/// (`<name>.<random>.tmp`), synced, and renamed over `path`. Every call
/// stages in its own file, so concurrent writers never share one; readers
/// see either the old or the new contents.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut staged = Builder::new()
        .prefix(&format!("{}.", name))
        .suffix(".tmp")
        .tempfile_in(dir)?;
    staged.write_all(contents)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}
