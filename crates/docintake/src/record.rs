//! Filename parsing and index record construction.
//!
//! Deposit files are named `{facility}{sep}{census}{sep}{preparer}{sep}{pages}.{ext}`.
//! The resulting record line is
//! `facility|census|preparer|pages|absolute_path|format_code`.

use crate::config::IntakeSettings;
use crate::error::{IntakeError, Result};
use crate::selector::normalized_extension;
use std::fmt;
use std::path::{Component, Path, PathBuf};

pub const FIELD_COUNT: usize = 4;
pub const RECORD_DELIMITER: char = '|';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub facility: String,
    pub census: String,
    pub preparer: String,
    pub pages: String,
    pub full_path: PathBuf,
    pub format: String,
}

impl ParsedRecord {
    /// Parse a staged file's name into a record.
    pub fn from_path(path: &Path, settings: &IntakeSettings) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let [facility, census, preparer, last] = split_keywords(&file_name, &settings.separator)?;

        let extension = normalized_extension(path).unwrap_or_default();
        let format = settings
            .format_code(&extension)
            .ok_or_else(|| IntakeError::UnknownExtension {
                extension: extension.clone(),
                path: path.to_path_buf(),
            })?
            .to_string();

        let full_path = absolute_path(path).map_err(|e| IntakeError::io(path, e))?;

        Ok(Self {
            facility: facility.to_string(),
            census: census.to_string(),
            preparer: preparer.to_string(),
            pages: strip_extension(last).to_string(),
            full_path,
            format,
        })
    }

    /// The pipe-delimited record line. No escaping is applied.
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ParsedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = RECORD_DELIMITER;
        write!(
            f,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            self.facility,
            self.census,
            self.preparer,
            self.pages,
            self.full_path.display(),
            self.format,
        )
    }
}

/// Split on the literal separator; exactly four pieces are required.
fn split_keywords<'a>(file_name: &'a str, separator: &str) -> Result<[&'a str; FIELD_COUNT]> {
    let pieces: Vec<&str> = file_name.split(separator).collect();
    let count = pieces.len();
    <[&str; FIELD_COUNT]>::try_from(pieces).map_err(|_| IntakeError::Format {
        file_name: file_name.to_string(),
        pieces: count,
    })
}

/// Drop the last `.ext` from a keyword. `3.pdf` -> `3`, `3` -> `3`.
fn strip_extension(piece: &str) -> &str {
    match piece.rfind('.') {
        Some(idx) => &piece[..idx],
        None => piece,
    }
}

/// Absolute form of `path` without touching the filesystem beyond the
/// current directory lookup. `.` and `..` are resolved lexically.
pub fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn settings(separator: &str) -> IntakeSettings {
        IntakeSettings {
            extensions: BTreeMap::from([
                (".pdf".to_string(), "PDF".to_string()),
                (".tif".to_string(), "TIFF".to_string()),
            ]),
            separator: separator.to_string(),
            prefix: "data".to_string(),
        }
    }

    #[test]
    fn test_builds_record_line() {
        let path = Path::new("/srv/intake/docs_pre/A_B_C_D.pdf");
        let record = ParsedRecord::from_path(path, &settings("_")).unwrap();

        assert_eq!(record.facility, "A");
        assert_eq!(record.census, "B");
        assert_eq!(record.preparer, "C");
        assert_eq!(record.pages, "D");
        assert_eq!(record.to_line(), "A|B|C|D|/srv/intake/docs_pre/A_B_C_D.pdf|PDF");
    }

    #[test]
    fn test_three_keywords_is_format_error() {
        let err = ParsedRecord::from_path(Path::new("/x/A_B_C.pdf"), &settings("_")).unwrap_err();
        match err {
            IntakeError::Format { file_name, pieces } => {
                assert_eq!(file_name, "A_B_C.pdf");
                assert_eq!(pieces, 3);
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_five_keywords_is_format_error() {
        let result = ParsedRecord::from_path(Path::new("/x/A_B_C_D_E.pdf"), &settings("_"));
        assert!(matches!(result, Err(IntakeError::Format { pieces: 5, .. })));
    }

    #[test]
    fn test_multi_char_separator_is_literal() {
        let path = Path::new("/x/F1--2023_Q1--JD--12.tif");
        let record = ParsedRecord::from_path(path, &settings("--")).unwrap();
        assert_eq!(record.census, "2023_Q1");
        assert_eq!(record.pages, "12");
        assert_eq!(record.format, "TIFF");
    }

    #[test]
    fn test_only_last_extension_stripped_from_pages() {
        let record = ParsedRecord::from_path(Path::new("/x/A_B.v2_C_3.scan.pdf"), &settings("_")).unwrap();
        assert_eq!(record.census, "B.v2");
        assert_eq!(record.pages, "3.scan");
    }

    #[test]
    fn test_uppercase_extension_maps() {
        let record = ParsedRecord::from_path(Path::new("/x/A_B_C_1.PDF"), &settings("_")).unwrap();
        assert_eq!(record.format, "PDF");
    }

    #[test]
    fn test_unknown_extension() {
        let result = ParsedRecord::from_path(Path::new("/x/A_B_C_1.doc"), &settings("_"));
        assert!(matches!(result, Err(IntakeError::UnknownExtension { .. })));
    }

    #[test]
    fn test_absolute_path_resolves_relative() {
        let cwd = std::env::current_dir().unwrap();
        let resolved = absolute_path(Path::new("./docs_pre/../docs_pre/A_B_C_D.pdf")).unwrap();
        assert_eq!(resolved, cwd.join("docs_pre").join("A_B_C_D.pdf"));
        assert!(resolved.is_absolute());
    }
}
