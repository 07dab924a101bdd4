//! Configuration for the intake pipeline
//!
//! The configuration file is a small sectioned `key=value` format:
//!
//! ```text
//! [FileExtensions]
//! .pdf=PDF
//! .tif=TIFF
//! [Settings]
//! FILENAME_KEYWORD_SEPARATOR_CHARACTER=_
//! FILENAME_PREFIX=data
//! ```

use crate::error::{IntakeError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Section mapping file extensions (with leading dot) to format codes.
pub const FILE_EXTENSIONS_SECTION: &str = "FileExtensions";
/// Section holding named settings.
pub const SETTINGS_SECTION: &str = "Settings";

pub const SEPARATOR_KEY: &str = "FILENAME_KEYWORD_SEPARATOR_CHARACTER";
pub const PREFIX_KEY: &str = "FILENAME_PREFIX";

pub const DEFAULT_SEPARATOR: &str = "_";
pub const DEFAULT_PREFIX: &str = "data";

pub type Section = BTreeMap<String, String>;

/// Parsed configuration file: section name -> (key -> value).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IniDocument {
    sections: BTreeMap<String, Section>,
}

/// Accumulator threaded through the line fold.
#[derive(Default)]
struct ParseState {
    sections: BTreeMap<String, Section>,
    current: Option<String>,
}

impl ParseState {
    fn accept(mut self, raw: &str) -> Self {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            return self;
        }

        if line.len() >= 2 && line.starts_with('[') && line.ends_with(']') {
            let name = &line[1..line.len() - 1];
            self.sections.insert(name.to_string(), Section::new());
            // Keys under an unnamed header are dropped, same as before any header.
            self.current = (!name.is_empty()).then(|| name.to_string());
            return self;
        }

        let Some(section) = self.current.as_ref() else {
            return self;
        };

        match line.find('=') {
            Some(idx) if idx > 0 => {
                let key = line[..idx].trim().to_string();
                let value = line[idx + 1..].trim().to_string();
                self.sections
                    .entry(section.clone())
                    .or_default()
                    .insert(key, value);
            }
            _ => {}
        }
        self
    }
}

impl IniDocument {
    /// Parse configuration text. Never fails: malformed lines are skipped.
    pub fn parse(content: &str) -> Self {
        let state = content.lines().fold(ParseState::default(), ParseState::accept);
        Self {
            sections: state.sections,
        }
    }

    /// Load and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "Error reading config file");
            IntakeError::ConfigUnreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let doc = Self::parse(&content);
        tracing::debug!(
            path = %path.display(),
            sections = doc.sections.len(),
            "Loaded configuration"
        );
        Ok(doc)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(String::as_str)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

/// Typed settings resolved from an [`IniDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeSettings {
    /// Lowercase-matched extension (e.g. `.pdf`) to format code (e.g. `PDF`).
    pub extensions: BTreeMap<String, String>,
    /// Literal keyword separator used in input and output file names.
    pub separator: String,
    /// Prefix for output file names.
    pub prefix: String,
}

impl IntakeSettings {
    pub fn from_document(doc: &IniDocument) -> Result<Self> {
        let extensions = doc.section(FILE_EXTENSIONS_SECTION).cloned().ok_or_else(|| {
            IntakeError::Config(format!("missing [{}] section", FILE_EXTENSIONS_SECTION))
        })?;

        let separator = doc
            .get(SETTINGS_SECTION, SEPARATOR_KEY)
            .unwrap_or(DEFAULT_SEPARATOR)
            .to_string();
        if separator.is_empty() {
            return Err(IntakeError::Config(format!(
                "{} must not be empty",
                SEPARATOR_KEY
            )));
        }

        let prefix = doc
            .get(SETTINGS_SECTION, PREFIX_KEY)
            .unwrap_or(DEFAULT_PREFIX)
            .to_string();

        if extensions.is_empty() {
            tracing::warn!("[{}] is empty; no files will be selected", FILE_EXTENSIONS_SECTION);
        }

        Ok(Self {
            extensions,
            separator,
            prefix,
        })
    }

    /// Load the configuration file and resolve settings in one step.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_document(&IniDocument::load(path)?)
    }

    /// Format code for an extension already normalized to `.ext` lowercase.
    pub fn format_code(&self, extension: &str) -> Option<&str> {
        self.extensions.get(extension).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[FileExtensions]
.pdf=PDF
.tif=TIFF
[Settings]
FILENAME_KEYWORD_SEPARATOR_CHARACTER=_
FILENAME_PREFIX=data
";

    #[test]
    fn test_parse_sample() {
        let doc = IniDocument::parse(SAMPLE);
        assert_eq!(doc.get("FileExtensions", ".pdf"), Some("PDF"));
        assert_eq!(doc.get("FileExtensions", ".tif"), Some("TIFF"));
        assert_eq!(doc.get("Settings", SEPARATOR_KEY), Some("_"));
        assert_eq!(doc.get("Settings", PREFIX_KEY), Some("data"));
        assert_eq!(doc.section_names().collect::<Vec<_>>(), vec!["FileExtensions", "Settings"]);
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(IniDocument::parse(SAMPLE), IniDocument::parse(SAMPLE));
    }

    #[test]
    fn test_comments_blank_and_orphan_lines_ignored() {
        let doc = IniDocument::parse(
            "orphan=1\n\n; comment\n# another=2\n[A]\n  ; indented comment\nkey = value \n",
        );
        assert_eq!(doc.section_names().collect::<Vec<_>>(), vec!["A"]);
        let section = doc.section("A").unwrap();
        assert_eq!(section.len(), 1);
        assert_eq!(section.get("key").map(String::as_str), Some("value"));
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let doc = IniDocument::parse("[A]\nno_equals\n=value\n  =value\nok=1\n");
        let section = doc.section("A").unwrap();
        assert_eq!(section.len(), 1);
        assert_eq!(doc.get("A", "ok"), Some("1"));
    }

    #[test]
    fn test_duplicate_keys_overwrite_and_value_keeps_equals() {
        let doc = IniDocument::parse("[A]\nk=1\nk=2\nexpr=a=b\n");
        assert_eq!(doc.get("A", "k"), Some("2"));
        assert_eq!(doc.get("A", "expr"), Some("a=b"));
    }

    #[test]
    fn test_reopened_section_starts_empty() {
        let doc = IniDocument::parse("[A]\nold=1\n[B]\nx=1\n[A]\nnew=2\n");
        assert_eq!(doc.get("A", "old"), None);
        assert_eq!(doc.get("A", "new"), Some("2"));
        assert_eq!(doc.get("B", "x"), Some("1"));
    }

    #[test]
    fn test_unnamed_section_drops_keys() {
        let doc = IniDocument::parse("[]\nk=v\n[A]\nk=v\n");
        assert_eq!(doc.get("", "k"), None);
        assert_eq!(doc.get("A", "k"), Some("v"));
    }

    #[test]
    fn test_empty_file_is_present_but_empty() {
        let doc = IniDocument::parse("");
        assert_eq!(doc, IniDocument::default());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = IniDocument::load(Path::new("/nonexistent/docintake/config.ini")).unwrap_err();
        assert!(matches!(err, IntakeError::ConfigUnreadable { .. }));
        assert!(err.is_config());
    }

    #[test]
    fn test_settings_from_sample() {
        let settings = IntakeSettings::from_document(&IniDocument::parse(SAMPLE)).unwrap();
        assert_eq!(settings.separator, "_");
        assert_eq!(settings.prefix, "data");
        assert_eq!(settings.format_code(".pdf"), Some("PDF"));
        assert_eq!(settings.format_code(".doc"), None);
    }

    #[test]
    fn test_settings_defaults_when_section_absent() {
        let doc = IniDocument::parse("[FileExtensions]\n.pdf=PDF\n");
        let settings = IntakeSettings::from_document(&doc).unwrap();
        assert_eq!(settings.separator, DEFAULT_SEPARATOR);
        assert_eq!(settings.prefix, DEFAULT_PREFIX);
    }

    #[test]
    fn test_settings_custom_values() {
        let doc = IniDocument::parse(
            "[FileExtensions]\n.pdf=PDF\n[Settings]\nFILENAME_KEYWORD_SEPARATOR_CHARACTER=--\nFILENAME_PREFIX=idx\n",
        );
        let settings = IntakeSettings::from_document(&doc).unwrap();
        assert_eq!(settings.separator, "--");
        assert_eq!(settings.prefix, "idx");
    }

    #[test]
    fn test_settings_missing_extensions_is_config_error() {
        let doc = IniDocument::parse("[Settings]\nFILENAME_PREFIX=x\n");
        let err = IntakeSettings::from_document(&doc).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_settings_empty_separator_rejected() {
        let doc = IniDocument::parse(
            "[FileExtensions]\n.pdf=PDF\n[Settings]\nFILENAME_KEYWORD_SEPARATOR_CHARACTER=\n",
        );
        assert!(IntakeSettings::from_document(&doc).is_err());
    }
}
