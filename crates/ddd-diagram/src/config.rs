//! Configuration types for diagram checking.
//!
//! This module provides the configuration structures that control which
//! rules run and how results are presented. All types implement
//! [`serde::Deserialize`] so they can be loaded from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining validation and output settings.
//! - [`ValidationConfig`] - Rules to skip and whether warnings fail a check.
//! - [`OutputConfig`] - Report format and whether to list the model.
//!
//! # Example
//!
//! ```
//! # use ddd_diagram::config::{AppConfig, OutputFormat};
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [validation]
//!     skip = ["R9", "r14"]
//!
//!     [output]
//!     format = "json"
//!     "#,
//! )
//! .expect("valid config");
//!
//! assert_eq!(config.output().format(), OutputFormat::Json);
//! assert_eq!(config.validation().skipped_rules().unwrap().len(), 2);
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::validate::RuleId;

/// Top-level application configuration.
///
/// Groups [`ValidationConfig`] and [`OutputConfig`] into a single
/// configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Validation configuration section.
    #[serde(default)]
    validation: ValidationConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given sections.
    ///
    /// # Arguments
    ///
    /// * `validation` - Rule selection settings.
    /// * `output` - Presentation settings.
    pub fn new(validation: ValidationConfig, output: OutputConfig) -> Self {
        Self { validation, output }
    }

    /// Returns the validation configuration.
    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Replace the output configuration.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }
}

/// Rule selection.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Rule ids to skip, such as `"R9"`.
    #[serde(default)]
    skip: Vec<String>,

    /// Treat any warning as a failed check.
    #[serde(default)]
    deny_warnings: bool,
}

impl ValidationConfig {
    /// Creates a new [`ValidationConfig`].
    pub fn new(skip: Vec<String>, deny_warnings: bool) -> Self {
        Self {
            skip,
            deny_warnings,
        }
    }

    /// Returns the raw rule ids listed under `skip`.
    pub fn skip(&self) -> &[String] {
        &self.skip
    }

    /// Returns `true` if warnings fail a check.
    pub fn deny_warnings(&self) -> bool {
        self.deny_warnings
    }

    /// Returns the parsed rule ids to skip.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first entry that is not a rule id.
    pub fn skipped_rules(&self) -> Result<Vec<RuleId>, String> {
        self.skip
            .iter()
            .map(|id| id.parse::<RuleId>())
            .collect::<Result<_, _>>()
            .map_err(|err| format!("Invalid rule in [validation] skip: {err}"))
    }
}

/// How reports are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable report.
    #[default]
    Text,
    /// One JSON document for the whole run.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {s} (expected text or json)")),
        }
    }
}

/// Presentation settings.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OutputConfig {
    /// Report format.
    #[serde(default)]
    format: OutputFormat,

    /// List the parsed nodes and edges before the report.
    #[serde(default)]
    show_model: bool,
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    pub fn new(format: OutputFormat, show_model: bool) -> Self {
        Self { format, show_model }
    }

    /// Returns the report format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns `true` if the model listing is requested.
    pub fn show_model(&self) -> bool {
        self.show_model
    }
}
