//! The intake run: select, relocate, parse, write.
//!
//! Each file moves through [`FileStage`]s independently. A failure stops that
//! file at the stage it reached and is recorded in the [`RunSummary`]; the
//! batch continues. Nothing is rolled back, so a file that fails to parse
//! stays in the pre-process directory.

use crate::config::IntakeSettings;
use crate::error::{IntakeError, Result};
use crate::layout::IntakeLayout;
use crate::record::ParsedRecord;
use crate::relocate::relocate;
use crate::selector::{select_candidates, Candidate, DEFAULT_MIN_AGE};
use crate::writer::{base_name, write_record};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Last stage a file reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStage {
    Discovered,
    Relocated,
    Parsed,
    Written,
}

impl FileStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStage::Discovered => "discovered",
            FileStage::Relocated => "relocated",
            FileStage::Parsed => "parsed",
            FileStage::Written => "written",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedFile {
    pub source: PathBuf,
    pub staged: PathBuf,
    pub output: PathBuf,
    pub record: String,
    /// The output name was already taken (e.g. `x.pdf` and `x.tif` in the
    /// same second) and the earlier record was overwritten.
    pub replaced_output: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedFile {
    /// Where the file is now: the deposit path if it was never moved,
    /// otherwise its staged path.
    pub file: PathBuf,
    /// Stage the file had reached when it failed.
    pub stage: FileStage,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub processed: Vec<ProcessedFile>,
    pub failed: Vec<FailedFile>,
}

impl RunSummary {
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

/// One configured intake run.
#[derive(Debug, Clone)]
pub struct Intake {
    settings: IntakeSettings,
    layout: IntakeLayout,
    min_age: Duration,
}

impl Intake {
    pub fn new(settings: IntakeSettings, layout: IntakeLayout) -> Self {
        Self {
            settings,
            layout,
            min_age: DEFAULT_MIN_AGE,
        }
    }

    pub fn with_min_age(mut self, min_age: Duration) -> Self {
        self.min_age = min_age;
        self
    }

    pub fn settings(&self) -> &IntakeSettings {
        &self.settings
    }

    pub fn layout(&self) -> &IntakeLayout {
        &self.layout
    }

    pub fn min_age(&self) -> Duration {
        self.min_age
    }

    /// Eligible deposit files as of `now`. Does not touch the filesystem
    /// beyond listing.
    pub fn candidates(&self, now: SystemTime) -> Result<impl Iterator<Item = Candidate> + '_> {
        select_candidates(
            &self.layout.deposit_dir,
            &self.settings.extensions,
            self.min_age,
            now,
        )
    }

    pub fn run(&self) -> Result<RunSummary> {
        self.run_at(SystemTime::now())
    }

    /// Process every file eligible at `now`. Only a deposit directory that
    /// cannot be listed fails the whole run.
    ///
    /// `now` also stamps every output file name of the run.
    pub fn run_at(&self, now: SystemTime) -> Result<RunSummary> {
        let stamp: DateTime<Local> = DateTime::from(now);
        let mut summary = RunSummary::default();

        for candidate in self.candidates(now)? {
            match self.process_file(&candidate, &stamp) {
                Ok(processed) => summary.processed.push(processed),
                Err(failure) => {
                    tracing::error!(
                        file = %failure.location.display(),
                        stage = failure.stage.as_str(),
                        error = %failure.error,
                        "Error processing file"
                    );
                    summary.failed.push(FailedFile {
                        file: failure.location,
                        stage: failure.stage,
                        error: failure.error.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            processed = summary.processed_count(),
            failed = summary.failed_count(),
            "All files processed"
        );
        Ok(summary)
    }

    fn process_file(
        &self,
        candidate: &Candidate,
        stamp: &DateTime<Local>,
    ) -> std::result::Result<ProcessedFile, FileFailure> {
        let staged = relocate(&candidate.path, &self.layout.pre_process_dir)
            .map_err(|e| FileFailure::new(FileStage::Discovered, &candidate.path, e))?;

        let record = ParsedRecord::from_path(&staged, &self.settings)
            .map_err(|e| FileFailure::new(FileStage::Relocated, &staged, e))?;
        let line = record.to_line();

        let written = write_record(
            &self.layout.index_dir,
            &line,
            &base_name(&staged),
            &self.settings.prefix,
            &self.settings.separator,
            stamp,
        )
        .map_err(|e| FileFailure::new(FileStage::Parsed, &staged, e))?;

        Ok(ProcessedFile {
            source: candidate.path.clone(),
            staged,
            output: written.path,
            record: line,
            replaced_output: written.replaced,
        })
    }
}

struct FileFailure {
    stage: FileStage,
    location: PathBuf,
    error: IntakeError,
}

impl FileFailure {
    fn new(stage: FileStage, location: &Path, error: IntakeError) -> Self {
        Self {
            stage,
            location: location.to_path_buf(),
            error,
        }
    }
}
