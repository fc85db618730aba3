//! Error types for diagram checking.
//!
//! [`DiagramError`] wraps everything that stops a check before a report can
//! be produced. Problems in the diagram content itself are never errors;
//! they are reported as [`Issue`](crate::validate::Issue)s.

use std::io;

use thiserror::Error;

use ddd_diagram_parser::ParseError;

/// The main error type for diagram checking.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}
