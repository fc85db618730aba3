//! Parser for domain-modeling diagrams drawn in draw.io.
//!
//! This crate turns a draw.io file into one semantic [`Model`] per diagram
//! page:
//!
//! ```text
//! draw.io XML
//!     ↓ drawio::read_file / drawio::read_str
//! Raw pages (RawDiagram: cells + attribute bags)
//!     ↓ build_model (normalize each cell)
//! Model
//! ```
//!
//! Only structural problems (unreadable file, malformed XML, no pages, a page
//! index out of range) are errors. Anything questionable about the diagram's
//! content ends up in the model as-is.

pub mod drawio;
pub mod error;
pub mod normalize;

mod builder;

use std::path::{Path, PathBuf};

use log::info;

use ddd_diagram_core::{cell::RawDiagram, semantic::Model};

pub use builder::build_model;
pub use error::ParseError;

/// Origin shown in errors for diagrams parsed from a string.
const STRING_ORIGIN: &str = "<string>";

/// Pick one page out of the pages of a file.
fn select(diagrams: &[RawDiagram], index: usize, origin: &Path) -> error::Result<Model> {
    if diagrams.is_empty() {
        return Err(ParseError::NoDiagrams {
            path: origin.to_path_buf(),
        });
    }

    let diagram = diagrams
        .get(index)
        .ok_or(ParseError::DiagramIndexOutOfRange {
            index,
            count: diagrams.len(),
        })?;

    info!(diagram = diagram.name.as_str(), index; "Building model");
    Ok(build_model(diagram))
}

/// Build every page, failing when there is none.
fn build_all(diagrams: &[RawDiagram], origin: &Path) -> error::Result<Vec<Model>> {
    if diagrams.is_empty() {
        return Err(ParseError::NoDiagrams {
            path: origin.to_path_buf(),
        });
    }

    info!(count = diagrams.len(); "Building models for all diagrams");
    Ok(diagrams.iter().map(build_model).collect())
}

/// Parse one page of a draw.io file.
///
/// # Arguments
///
/// * `path` - Path to a `.drawio` / `.drawio.xml` file
/// * `diagram_index` - Zero-based page index
///
/// # Errors
///
/// Returns [`ParseError::Io`] or [`ParseError::Xml`] if the file cannot be
/// read, [`ParseError::NoDiagrams`] if it holds no usable page and
/// [`ParseError::DiagramIndexOutOfRange`] for a bad index.
pub fn parse_file(path: impl AsRef<Path>, diagram_index: usize) -> error::Result<Model> {
    let path = path.as_ref();
    let diagrams = drawio::read_file(path)?;
    select(&diagrams, diagram_index, path)
}

/// Parse every page of a draw.io file.
///
/// # Errors
///
/// Same as [`parse_file`], except that there is no index to be out of range.
pub fn parse_all(path: impl AsRef<Path>) -> error::Result<Vec<Model>> {
    let path = path.as_ref();
    let diagrams = drawio::read_file(path)?;
    build_all(&diagrams, path)
}

/// Parse one page of draw.io XML held in memory.
///
/// # Examples
///
/// ```
/// use ddd_diagram_parser::{ParseError, parse_str};
///
/// let xml = r#"<mxfile><diagram name="Sales"><mxGraphModel><root>
///     <mxCell id="0"/><mxCell id="1" parent="0"/>
///     <object id="2" ddd_type="bounded_context" ddd_name="Sales" context_key="sales">
///         <mxCell vertex="1" parent="1"/>
///     </object>
/// </root></mxGraphModel></diagram></mxfile>"#;
///
/// let model = parse_str(xml, 0).unwrap();
/// assert_eq!(model.node_count(), 1);
///
/// let err = parse_str(xml, 1).unwrap_err();
/// assert!(matches!(err, ParseError::DiagramIndexOutOfRange { index: 1, count: 1 }));
/// ```
pub fn parse_str(xml: &str, diagram_index: usize) -> error::Result<Model> {
    let diagrams = drawio::read_str(xml)?;
    select(&diagrams, diagram_index, &PathBuf::from(STRING_ORIGIN))
}

/// Parse every page of draw.io XML held in memory.
pub fn parse_all_str(xml: &str) -> error::Result<Vec<Model>> {
    let diagrams = drawio::read_str(xml)?;
    build_all(&diagrams, &PathBuf::from(STRING_ORIGIN))
}
