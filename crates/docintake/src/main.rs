//! Docintake launcher
//!
//! Runs one intake pass over the deposit directory and exits:
//! - `0` when the run completed, even if individual files failed
//! - `2` when the configuration could not be loaded
//! - `1` for any other fatal error

use clap::{Parser, Subcommand};
use docintake::IntakeError;
use docintake_logging::{init_logging, LogConfig};
use std::path::PathBuf;
use std::process::ExitCode;

mod cli;

const EXIT_FAILURE: u8 = 1;
const EXIT_CONFIG: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "docintake", version, about = "Stage deposited documents and write index records")]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Also write logs to a rolling file in this directory
    #[arg(long, global = true, env = "DOCINTAKE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Print the result as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    intake: cli::IntakeArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Process eligible deposit files (default)
    Run,
    /// Validate configuration and list eligible files without moving anything
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match init_logging(LogConfig {
        app_name: "docintake",
        verbose: cli.verbose,
        log_dir: cli.log_dir.as_deref(),
    }) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Warning: failed to initialize logging: {:?}", err);
            None
        }
    };

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cli::run::run(&cli.intake, cli.json),
        Commands::Check => cli::check::run(&cli.intake, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let is_config = err
                .downcast_ref::<IntakeError>()
                .map(IntakeError::is_config)
                .unwrap_or(false);
            if cli.json {
                cli::print_json_error(&err);
            } else {
                eprintln!("An error occurred: {:?}", err);
            }
            if is_config {
                ExitCode::from(EXIT_CONFIG)
            } else {
                ExitCode::from(EXIT_FAILURE)
            }
        }
    }
}
