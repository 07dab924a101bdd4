//! Check command - validate configuration and preview the next run
//!
//! Nothing is moved, written or created.

use super::IntakeArgs;
use anyhow::Context;
use docintake::{Intake, IntakeSettings};
use serde::Serialize;
use std::path::PathBuf;
use std::time::SystemTime;

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    config: &'a std::path::Path,
    settings: &'a IntakeSettings,
    layout: &'a docintake::IntakeLayout,
    min_age_secs: u64,
    eligible: Vec<PathBuf>,
}

pub fn run(args: &IntakeArgs, json: bool) -> anyhow::Result<()> {
    let settings = IntakeSettings::load(&args.config)
        .with_context(|| format!("Configuration file not usable: {}", args.config.display()))?;
    let intake = Intake::new(settings, args.layout()).with_min_age(args.min_age());

    let eligible: Vec<PathBuf> = intake
        .candidates(SystemTime::now())
        .context("Cannot list deposit directory")?
        .map(|c| c.path)
        .collect();

    let report = CheckReport {
        config: &args.config,
        settings: intake.settings(),
        layout: intake.layout(),
        min_age_secs: intake.min_age().as_secs(),
        eligible,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("DOCINTAKE CONFIGURATION");
    println!("=======================");
    println!();
    println!("Config:        {}", report.config.display());
    println!("Separator:     {:?}", report.settings.separator);
    println!("Prefix:        {}", report.settings.prefix);
    println!("Min age:       {}s", report.min_age_secs);
    println!("Extensions:");
    for (ext, code) in &report.settings.extensions {
        println!("  {:<10} {}", ext, code);
    }
    println!();
    println!("Deposit:       {}", report.layout.deposit_dir.display());
    println!("Pre-process:   {}", report.layout.pre_process_dir.display());
    println!("Index:         {}", report.layout.index_dir.display());
    println!();
    if report.eligible.is_empty() {
        println!("No eligible files.");
    } else {
        println!("Eligible files ({}):", report.eligible.len());
        for path in &report.eligible {
            println!("  {}", path.display());
        }
    }
    Ok(())
}
