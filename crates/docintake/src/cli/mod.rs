//! CLI module for Docintake
//!
//! `run` performs the intake pass; `check` is its dry-run counterpart.

pub mod check;
pub mod run;

use docintake::layout::{DEFAULT_DEPOSIT_DIR, DEFAULT_INDEX_DIR, DEFAULT_PRE_PROCESS_DIR};
use docintake::{IntakeError, IntakeLayout};
use std::path::PathBuf;
use std::time::Duration;

/// Paths and thresholds shared by every command.
#[derive(Debug, clap::Args)]
pub struct IntakeArgs {
    /// Configuration file ([FileExtensions] and [Settings] sections)
    #[arg(long, env = "DOCINTAKE_CONFIG", default_value = "config.ini")]
    pub config: PathBuf,

    /// Inbound directory populated by the upstream producer
    #[arg(long, env = "DOCINTAKE_DEPOSIT_DIR", default_value = DEFAULT_DEPOSIT_DIR)]
    pub deposit_dir: PathBuf,

    /// Staging directory that receives moved files (created if missing)
    #[arg(long, env = "DOCINTAKE_PRE_PROCESS_DIR", default_value = DEFAULT_PRE_PROCESS_DIR)]
    pub pre_process_dir: PathBuf,

    /// Directory that receives index record files (created if missing)
    #[arg(long, env = "DOCINTAKE_INDEX_DIR", default_value = DEFAULT_INDEX_DIR)]
    pub index_dir: PathBuf,

    /// Minimum seconds since last modification before a file is picked up
    #[arg(long, env = "DOCINTAKE_MIN_AGE_SECS", default_value_t = 60)]
    pub min_age_secs: u64,
}

impl IntakeArgs {
    pub fn layout(&self) -> IntakeLayout {
        IntakeLayout {
            deposit_dir: self.deposit_dir.clone(),
            pre_process_dir: self.pre_process_dir.clone(),
            index_dir: self.index_dir.clone(),
        }
    }

    pub fn min_age(&self) -> Duration {
        Duration::from_secs(self.min_age_secs)
    }
}

/// Print a fatal error as a JSON object on stdout.
pub fn print_json_error(err: &anyhow::Error) {
    let kind = match err.downcast_ref::<IntakeError>() {
        Some(e) if e.is_config() => "config",
        _ => "fatal",
    };
    let payload = serde_json::json!({
        "error": {
            "kind": kind,
            "message": format!("{:#}", err),
        }
    });
    match serde_json::to_string_pretty(&payload) {
        Ok(text) => println!("{}", text),
        Err(_) => eprintln!("{:#}", err),
    }
}
