//! Run command - one intake pass over the deposit directory

use super::IntakeArgs;
use anyhow::Context;
use docintake::{Intake, IntakeSettings, RunSummary};

pub fn run(args: &IntakeArgs, json: bool) -> anyhow::Result<()> {
    let layout = args.layout();

    // Staging and index directories exist even when the config is missing.
    layout
        .ensure_dirs()
        .context("Failed to prepare pre-process and index directories")?;

    let settings = IntakeSettings::load(&args.config)
        .with_context(|| format!("Configuration file not usable: {}", args.config.display()))?;

    let intake = Intake::new(settings, layout).with_min_age(args.min_age());
    let summary = intake.run().context("Intake run failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    for file in &summary.processed {
        println!("Output written to {}", file.output.display());
    }
    for file in &summary.failed {
        println!("Error processing file '{}': {}", file.file.display(), file.error);
    }
    println!(
        "All files processed. {} processed, {} failed.",
        summary.processed_count(),
        summary.failed_count()
    );
}
