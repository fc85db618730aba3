//! Command-line argument definitions for the DDD diagram checker.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the diagram pages to check, the report
//! format, configuration file selection, and logging verbosity.

use clap::Parser;

use ddd_diagram::config::OutputFormat;

/// Command-line arguments for the DDD diagram checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input draw.io file
    #[arg(
        required_unless_present = "list_rules",
        help = "Path to the input .drawio file, or - to read from stdin"
    )]
    pub input: Option<String>,

    /// Zero-based index of the diagram page to check
    #[arg(short, long, default_value_t = 0, conflicts_with = "all")]
    pub diagram: usize,

    /// Check every diagram page in the file
    #[arg(short, long)]
    pub all: bool,

    /// Report format (text, json); overrides the configuration file
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// List the parsed nodes and edges before the report
    #[arg(long)]
    pub show_model: bool,

    /// Print the validation rules and exit
    #[arg(long)]
    pub list_rules: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
