//! Fatal errors of the parsing step.
//!
//! Everything in here aborts parsing. Problems with the *content* of a
//! diagram (missing tags, dangling edges, unknown relation kinds) are never
//! reported through [`ParseError`]; they flow through to validation instead.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A type alias for `Result<T, ParseError>`.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Error type for reading a diagram file and building models from it.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed XML: <{element}> is never closed")]
    UnclosedElement { element: String },

    #[error("no diagrams found in {}", path.display())]
    NoDiagrams { path: PathBuf },

    #[error("diagram index {index} out of range (found {count} diagrams)")]
    DiagramIndexOutOfRange { index: usize, count: usize },
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_index_out_of_range() {
        let err = ParseError::DiagramIndexOutOfRange { index: 3, count: 2 };
        assert_eq!(
            err.to_string(),
            "diagram index 3 out of range (found 2 diagrams)"
        );
    }

    #[test]
    fn test_display_no_diagrams() {
        let err = ParseError::NoDiagrams {
            path: PathBuf::from("model.drawio"),
        };
        assert_eq!(err.to_string(), "no diagrams found in model.drawio");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = ParseError::Io {
            path: PathBuf::from("missing.drawio"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };

        assert!(err.to_string().starts_with("cannot read `missing.drawio`"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
