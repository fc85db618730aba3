//! DDD Diagram - consistency checks for domain-driven design diagrams.
//!
//! Reads diagrams drawn in draw.io, turns the annotated shapes and connectors
//! into a typed graph of domain elements, and checks that graph against a
//! catalogue of modeling rules: required metadata, unique names, legal
//! relationship endpoints, aggregate ownership and bounded context
//! boundaries.

pub mod config;
pub mod validate;

mod error;

pub use ddd_diagram_core::{cell, identifier, property, semantic, vocabulary};
pub use ddd_diagram_parser::{ParseError, build_model};

pub use error::DiagramError;

use std::path::Path;

use log::{debug, info, trace};

use config::AppConfig;
use semantic::Model;
use validate::{RuleId, ValidationReport, Validator};

/// Entry point for loading and checking diagrams.
///
/// Holds the configuration and the validator built from it, so one checker
/// can be reused for any number of diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use ddd_diagram::{DiagramChecker, config::AppConfig};
///
/// let checker = DiagramChecker::new(AppConfig::default())
///     .expect("Invalid configuration");
///
/// let (model, report) = checker.check("sales.drawio", 0)
///     .expect("Failed to read diagram");
///
/// println!("{model}");
/// println!("{report}");
/// ```
pub struct DiagramChecker {
    config: AppConfig,
    validator: Validator,
}

impl DiagramChecker {
    /// Create a checker with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Config`] if the configuration names a rule
    /// that does not exist.
    pub fn new(config: AppConfig) -> Result<Self, DiagramError> {
        let skip = config
            .validation()
            .skipped_rules()
            .map_err(DiagramError::Config)?;
        debug!(skip:?; "Building validator");

        let validator = Validator::new().without(&skip);
        Ok(Self { config, validator })
    }

    /// The configuration this checker was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load one diagram page from a draw.io file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not well-formed XML,
    /// contains no diagram, or has no page at `diagram_index`.
    pub fn load(&self, path: impl AsRef<Path>, diagram_index: usize) -> Result<Model, DiagramError> {
        let path = path.as_ref();
        info!(path:? = path, diagram_index; "Loading diagram");

        let model = ddd_diagram_parser::parse_file(path, diagram_index)?;

        debug!(nodes = model.node_count(), edges = model.edge_count(); "Diagram loaded");
        trace!(model:%; "Loaded model");
        Ok(model)
    }

    /// Load every diagram page of a draw.io file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not well-formed XML or
    /// contains no diagram.
    pub fn load_all(&self, path: impl AsRef<Path>) -> Result<Vec<Model>, DiagramError> {
        let path = path.as_ref();
        info!(path:? = path; "Loading all diagrams");

        let models = ddd_diagram_parser::parse_all(path)?;

        debug!(diagrams = models.len(); "Diagrams loaded");
        Ok(models)
    }

    /// Parse one diagram page from draw.io XML held in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML is malformed, contains no diagram, or has
    /// no page at `diagram_index`.
    pub fn parse(&self, xml: &str, diagram_index: usize) -> Result<Model, DiagramError> {
        info!(diagram_index; "Parsing diagram");

        let model = ddd_diagram_parser::parse_str(xml, diagram_index)?;

        trace!(model:%; "Parsed model");
        Ok(model)
    }

    /// Parse every diagram page from draw.io XML held in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the XML is malformed or contains no diagram.
    pub fn parse_all(&self, xml: &str) -> Result<Vec<Model>, DiagramError> {
        info!("Parsing all diagrams");

        let models = ddd_diagram_parser::parse_all_str(xml)?;

        debug!(diagrams = models.len(); "Diagrams parsed");
        Ok(models)
    }

    /// The rules this checker runs, in catalogue order.
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.validator.rule_ids()
    }

    /// Run the configured rules over `model`.
    pub fn validate(&self, model: &Model) -> ValidationReport {
        self.validator.validate(model)
    }

    /// Load one diagram page and validate it.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`DiagramChecker::load`].
    pub fn check(
        &self,
        path: impl AsRef<Path>,
        diagram_index: usize,
    ) -> Result<(Model, ValidationReport), DiagramError> {
        let model = self.load(path, diagram_index)?;
        let report = self.validate(&model);
        Ok((model, report))
    }

    /// Returns `true` if `report` passes under this configuration.
    ///
    /// A report passes when it holds no errors, and also no warnings when
    /// `deny_warnings` is set.
    pub fn passes(&self, report: &ValidationReport) -> bool {
        report.valid() && !(self.config.validation().deny_warnings() && report.has_warnings())
    }
}

impl Default for DiagramChecker {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            validator: Validator::new(),
        }
    }
}
