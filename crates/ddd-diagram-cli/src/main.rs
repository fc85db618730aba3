//! DDD diagram CLI entry point.
//!
//! Exit codes: 0 when every checked page passes, 1 when a report has errors
//! (or warnings under `deny_warnings`), 2 when the check could not run.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use ddd_diagram_cli::{Args, error_adapter::ErrorAdapter};

const EXIT_INVALID: i32 = 1;
const EXIT_FATAL: i32 = 2;

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    // Initialize the logger with the specified log level
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting DDD diagram checker");
    debug!(args:?; "Parsed arguments");

    match ddd_diagram_cli::run(&args) {
        Ok(outcome) => {
            print!("{}", outcome.output());
            if !outcome.passed() {
                process::exit(EXIT_INVALID);
            }
            info!("Completed successfully");
        }
        Err(err) => {
            let reporter = miette::GraphicalReportHandler::new();
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, &ErrorAdapter(&err))
                .expect("Writing to String buffer is infallible");

            error!("Failed\n{writer}");
            process::exit(EXIT_FATAL);
        }
    }
}
