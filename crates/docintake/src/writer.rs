//! Output file naming and writing.

use crate::error::{IntakeError, Result};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 12-hour clock with AM/PM marker, second resolution.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%I-%M-%S%p";
pub const OUTPUT_EXTENSION: &str = "txt";

/// `{prefix}{sep}{base}{sep}{timestamp}.txt`
pub fn output_file_name<Tz>(prefix: &str, separator: &str, base: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{prefix}{separator}{base}{separator}{}.{}",
        at.format(TIMESTAMP_FORMAT),
        OUTPUT_EXTENSION
    )
}

/// Staged file name without its last extension.
pub fn base_name(staged: &Path) -> String {
    staged
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Result of writing one record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenRecord {
    pub path: PathBuf,
    /// An earlier file with the same name was overwritten.
    pub replaced: bool,
}

/// Write `line` as the entire content of a new output file in `index_dir`.
/// An existing file with the same name is overwritten.
pub fn write_record<Tz>(
    index_dir: &Path,
    line: &str,
    base: &str,
    prefix: &str,
    separator: &str,
    at: &DateTime<Tz>,
) -> Result<WrittenRecord>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let path = index_dir.join(output_file_name(prefix, separator, base, at));
    let replaced = path.symlink_metadata().is_ok();
    if replaced {
        tracing::warn!(path = %path.display(), "Output file already exists; overwriting");
    }
    std::fs::write(&path, line).map_err(|e| IntakeError::io(&path, e))?;
    tracing::info!(path = %path.display(), "Processing complete. Output written");
    Ok(WrittenRecord { path, replaced })
}
