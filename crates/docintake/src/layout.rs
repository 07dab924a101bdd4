//! Directory layout for a run: deposit (input), pre-process (staging) and
//! index (output).

use crate::error::{IntakeError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DEPOSIT_DIR: &str = "docs_deposit";
pub const DEFAULT_PRE_PROCESS_DIR: &str = "docs_pre";
pub const DEFAULT_INDEX_DIR: &str = "index_files";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeLayout {
    pub deposit_dir: PathBuf,
    pub pre_process_dir: PathBuf,
    pub index_dir: PathBuf,
}

impl Default for IntakeLayout {
    fn default() -> Self {
        Self {
            deposit_dir: PathBuf::from(DEFAULT_DEPOSIT_DIR),
            pre_process_dir: PathBuf::from(DEFAULT_PRE_PROCESS_DIR),
            index_dir: PathBuf::from(DEFAULT_INDEX_DIR),
        }
    }
}

impl IntakeLayout {
    /// Layout with all three directories under one root.
    pub fn under(root: &Path) -> Self {
        Self {
            deposit_dir: root.join(DEFAULT_DEPOSIT_DIR),
            pre_process_dir: root.join(DEFAULT_PRE_PROCESS_DIR),
            index_dir: root.join(DEFAULT_INDEX_DIR),
        }
    }

    /// Create the pre-process and index directories if missing. Idempotent.
    ///
    /// The deposit directory belongs to the upstream producer and is never
    /// created here.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.pre_process_dir, &self.index_dir] {
            std::fs::create_dir_all(dir).map_err(|e| IntakeError::io(dir.as_path(), e))?;
        }
        Ok(())
    }
}
