//! Error adapter for converting DiagramError to miette diagnostics.
//!
//! This module provides the bridge between the library's error type and
//! miette's report formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use ddd_diagram::{DiagramError, ParseError};

/// Adapter giving a [`DiagramError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a DiagramError);

impl ErrorAdapter<'_> {
    fn help_text(&self) -> Option<String> {
        let help = match self.0 {
            DiagramError::Io(_) => "check that the file exists and is readable".to_string(),
            DiagramError::Parse(ParseError::Io { .. }) => {
                "check that the file exists and is readable".to_string()
            }
            DiagramError::Parse(ParseError::Xml(_) | ParseError::UnclosedElement { .. }) => {
                "save the diagram from draw.io as an uncompressed .drawio file".to_string()
            }
            DiagramError::Parse(ParseError::NoDiagrams { .. }) => {
                "the file needs at least one page holding a graph model".to_string()
            }
            DiagramError::Parse(ParseError::DiagramIndexOutOfRange { count, .. }) => format!(
                "pass --diagram with an index below {count}, or --all to check every page"
            ),
            DiagramError::Config(_) => {
                "check the [validation] and [output] sections of the configuration file"
                    .to_string()
            }
        };
        Some(help)
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            DiagramError::Io(_) => "ddd_diagram::io",
            DiagramError::Parse(_) => "ddd_diagram::parse",
            DiagramError::Config(_) => "ddd_diagram::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: &DiagramError) -> Option<String> {
        ErrorAdapter(err).code().map(|code| code.to_string())
    }

    #[test]
    fn test_codes() {
        let config = DiagramError::Config("bad".to_string());
        let parse = DiagramError::Parse(ParseError::DiagramIndexOutOfRange { index: 4, count: 2 });
        assert_eq!(code(&config).as_deref(), Some("ddd_diagram::config"));
        assert_eq!(code(&parse).as_deref(), Some("ddd_diagram::parse"));
    }

    #[test]
    fn test_index_help_names_page_count() {
        let err = DiagramError::Parse(ParseError::DiagramIndexOutOfRange { index: 4, count: 2 });
        let adapter = ErrorAdapter(&err);

        let help = adapter.help().map(|help| help.to_string());
        assert_eq!(
            help.as_deref(),
            Some("pass --diagram with an index below 2, or --all to check every page")
        );
        assert_eq!(
            adapter.to_string(),
            "diagram index 4 out of range (found 2 diagrams)"
        );
    }

    #[test]
    fn test_renders_with_miette() {
        let err = DiagramError::Config("Invalid rule in [validation] skip".to_string());
        let reporter = miette::GraphicalReportHandler::new();

        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &ErrorAdapter(&err))
            .expect("Writing to String buffer is infallible");

        assert!(writer.contains("ddd_diagram::config"));
        assert!(writer.contains("Invalid rule"));
    }
}
