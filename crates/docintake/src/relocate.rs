//! Move deposit files into the pre-process directory.

use crate::error::{IntakeError, Result};
use std::path::{Path, PathBuf};

/// Move `source` into `dest_dir`, keeping its file name. Returns the staged
/// path.
///
/// An existing file with the same name in `dest_dir` is an error; nothing is
/// overwritten.
pub fn relocate(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let file_name = source.file_name().ok_or_else(|| {
        IntakeError::io(
            source,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let dest = dest_dir.join(file_name);

    if dest.symlink_metadata().is_ok() {
        return Err(IntakeError::DestinationExists(dest));
    }

    std::fs::rename(source, &dest).map_err(|e| IntakeError::io(source, e))?;
    tracing::debug!(from = %source.display(), to = %dest.display(), "Relocated file");
    Ok(dest)
}
