//! DDD diagram CLI library
//!
//! This module contains the core CLI logic for the DDD diagram checker.

pub mod error_adapter;

mod args;
mod config;
mod render;

pub use args::Args;

use std::io;

use log::info;

use ddd_diagram::{
    DiagramChecker, DiagramError,
    config::{OutputConfig, OutputFormat},
    semantic::Model,
};

use render::Checked;

/// Input path that reads the diagram from stdin.
const STDIN_INPUT: &str = "-";

/// Result of a completed check.
#[derive(Debug)]
pub struct Outcome {
    output: String,
    passed: bool,
}

impl Outcome {
    /// The rendered report, ready to be written to stdout.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns `true` if every checked page passed.
    pub fn passed(&self) -> bool {
        self.passed
    }
}

/// Run the DDD diagram checker
///
/// Loads the configuration, reads the requested pages of the input file,
/// validates each of them and renders the reports. With `--list-rules` it
/// only renders the rule catalogue, marking the rules skipped by the
/// configuration.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `DiagramError` for:
/// - Configuration loading errors
/// - File I/O errors
/// - Parsing errors
pub fn run(args: &Args) -> Result<Outcome, DiagramError> {
    let app_config = config::load_config(args.config.as_ref())?;

    // Command-line flags override the configuration file
    let output = OutputConfig::new(
        args.format.unwrap_or(app_config.output().format()),
        args.show_model || app_config.output().show_model(),
    );
    let checker = DiagramChecker::new(app_config.with_output(output))?;

    if args.list_rules {
        return Ok(Outcome {
            output: render::rule_listing(&checker.rule_ids()),
            passed: true,
        });
    }

    let Some(input) = args.input.as_deref() else {
        return Err(DiagramError::Config("No input file given".to_string()));
    };

    info!(
        input_path = input,
        all = args.all,
        diagram = args.diagram;
        "Checking diagram"
    );

    let models = load_models(&checker, input, args)?;

    let pages: Vec<Checked> = models
        .into_iter()
        .map(|model| {
            let report = checker.validate(&model);
            Checked { model, report }
        })
        .collect();

    let passed = pages.iter().all(|page| checker.passes(&page.report));

    let output = checker.config().output();
    let rendered = match output.format() {
        OutputFormat::Text => render::text(&pages, output.show_model()),
        OutputFormat::Json => render::json(&pages, output.show_model()).map_err(io::Error::from)?,
    };

    info!(diagrams = pages.len(), passed; "Check finished");

    Ok(Outcome {
        output: rendered,
        passed,
    })
}

/// Read the requested pages from a file, or from stdin for `-`.
fn load_models(checker: &DiagramChecker, input: &str, args: &Args) -> Result<Vec<Model>, DiagramError> {
    if input == STDIN_INPUT {
        let xml = io::read_to_string(io::stdin())?;
        return if args.all {
            checker.parse_all(&xml)
        } else {
            Ok(vec![checker.parse(&xml, args.diagram)?])
        };
    }

    if args.all {
        checker.load_all(input)
    } else {
        Ok(vec![checker.load(input, args.diagram)?])
    }
}
