//! Deposit directory selection.
//!
//! A file is eligible when its extension is configured and it has not been
//! modified for at least the minimum age, so files still being written by an
//! upstream producer are left alone until a later run.

use crate::error::{IntakeError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

pub const DEFAULT_MIN_AGE: Duration = Duration::from_secs(60);

/// A deposit file that passed selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Normalized extension of a path: lowercase with a leading dot (`.pdf`).
/// `None` when the file name has no extension.
pub fn normalized_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext))
}

pub fn is_supported(path: &Path, extensions: &BTreeMap<String, String>) -> bool {
    normalized_extension(path)
        .map(|ext| extensions.contains_key(&ext))
        .unwrap_or(false)
}

/// True when `now - modified >= min_age`. A modification time in the future
/// is never old enough.
pub fn is_old_enough(modified: SystemTime, now: SystemTime, min_age: Duration) -> bool {
    now.duration_since(modified)
        .map(|age| age >= min_age)
        .unwrap_or(false)
}

/// Lazily enumerate eligible files directly inside `deposit_dir`.
///
/// Order is whatever the filesystem yields. Entries that cannot be read are
/// logged and skipped.
pub fn select_candidates<'a>(
    deposit_dir: &Path,
    extensions: &'a BTreeMap<String, String>,
    min_age: Duration,
    now: SystemTime,
) -> Result<impl Iterator<Item = Candidate> + 'a> {
    let unavailable = |source: std::io::Error| IntakeError::DepositUnavailable {
        path: deposit_dir.to_path_buf(),
        source,
    };
    let metadata = std::fs::metadata(deposit_dir).map_err(unavailable)?;
    if !metadata.is_dir() {
        return Err(unavailable(std::io::Error::new(
            std::io::ErrorKind::Other,
            "not a directory",
        )));
    }

    // Symlinked deposit files count; their target's type and mtime are used.
    let walker = WalkDir::new(deposit_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true);

    Ok(walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable deposit entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(move |entry| is_supported(entry.path(), extensions))
        .filter_map(|entry| {
            let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
            match modified {
                Some(modified) => Some(Candidate {
                    path: entry.into_path(),
                    modified,
                }),
                None => {
                    tracing::warn!(path = %entry.path().display(), "Cannot read modification time");
                    None
                }
            }
        })
        .filter(move |candidate| {
            let eligible = is_old_enough(candidate.modified, now, min_age);
            if !eligible {
                tracing::debug!(
                    path = %candidate.path.display(),
                    "Skipping file modified too recently"
                );
            }
            eligible
        }))
}
