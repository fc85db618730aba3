//! Reader for uncompressed draw.io (`.drawio`, `.drawio.xml`) files.
//!
//! The reader walks the XML once and keeps a stack of open elements. Only
//! the path `mxfile > diagram > mxGraphModel > root > (mxCell | object |
//! UserObject)` is of interest; everything else is skipped over.

use std::{fs, path::Path};

use indexmap::IndexMap;
use log::{debug, info};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use ddd_diagram_core::cell::{Cell, RawDiagram};

use crate::error::{ParseError, Result};

/// Wrapper elements draw.io uses for cells that carry custom data.
const WRAPPER_ELEMENTS: &[&[u8]] = &[b"object", b"UserObject"];

/// Wrapper attributes that are not custom data.
const WRAPPER_RESERVED: &[&str] = &["id", "label"];

/// An open element, as far as the reader cares.
#[derive(Debug)]
enum Frame {
    MxFile,
    Diagram,
    GraphModel,
    Root,
    /// A wrapper under `root`; the cell is complete once the wrapper closes.
    Wrapper {
        cell: Cell,
        label: Option<String>,
        has_inner: bool,
    },
    /// Any element the reader does not look into.
    Other(String),
}

impl Frame {
    fn element_name(&self) -> &str {
        match self {
            Frame::MxFile => "mxfile",
            Frame::Diagram => "diagram",
            Frame::GraphModel => "mxGraphModel",
            Frame::Root => "root",
            Frame::Wrapper { .. } => "object",
            Frame::Other(name) => name,
        }
    }
}

/// A diagram page being collected.
#[derive(Debug)]
struct PendingDiagram {
    diagram: RawDiagram,
    seen_graph_model: bool,
    seen_root: bool,
}

/// Collect the attributes of an element, unescaped, in document order.
fn attributes(element: &BytesStart<'_>) -> Result<IndexMap<String, String>> {
    let mut attrs = IndexMap::new();
    for attr in element.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

/// Apply the attributes of an `mxCell` element to `cell`.
///
/// The id is left alone; callers decide whose id a cell carries.
fn apply_cell_attributes(cell: &mut Cell, attrs: &IndexMap<String, String>) {
    let source = attrs.get("source").cloned();
    let target = attrs.get("target").cloned();
    let style = attrs.get("style").cloned();

    cell.is_edge =
        attrs.get("edge").is_some_and(|edge| edge == "1") || (source.is_some() && target.is_some());
    cell.is_vertex =
        attrs.get("vertex").is_some_and(|vertex| vertex == "1") || (!cell.is_edge && style.is_some());
    cell.label = attrs.get("value").cloned();
    cell.parent = attrs.get("parent").cloned();
    cell.style = style;
    cell.source = source;
    cell.target = target;
}

/// Build a cell from a plain `mxCell` element.
fn plain_cell(attrs: &IndexMap<String, String>) -> Cell {
    let mut cell = Cell::new(attrs.get("id").cloned().unwrap_or_default());
    apply_cell_attributes(&mut cell, attrs);
    cell
}

/// Start a cell from a wrapper element: its id, its label and its custom data.
fn wrapper_cell(attrs: &IndexMap<String, String>) -> Cell {
    let mut cell = Cell::new(attrs.get("id").cloned().unwrap_or_default());
    cell.attributes = attrs
        .iter()
        .filter(|(key, _)| !WRAPPER_RESERVED.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    cell
}

/// Give the wrapper label precedence over the inner cell's value.
fn finish_wrapper(mut cell: Cell, label: Option<String>) -> Cell {
    if label.is_some() {
        cell.label = label;
    }
    cell
}

/// Reader state while walking the document.
#[derive(Debug, Default)]
struct DrawioReader {
    stack: Vec<Frame>,
    pending: Option<PendingDiagram>,
    diagrams: Vec<RawDiagram>,
}

impl DrawioReader {
    fn parent(&self) -> Option<&Frame> {
        self.stack.last()
    }

    /// Handle an opening tag. `has_body` is false for self-closing elements.
    fn open(&mut self, element: &BytesStart<'_>, has_body: bool) -> Result<()> {
        let name = element.name();
        let name = name.as_ref();

        let frame = match (self.parent(), name) {
            (Some(Frame::MxFile), b"diagram") => {
                let attrs = attributes(element)?;
                let mut diagram = RawDiagram::new(
                    attrs
                        .get("name")
                        .cloned()
                        .unwrap_or_else(|| RawDiagram::UNTITLED.to_string()),
                );
                diagram.id = attrs.get("id").cloned();
                if has_body {
                    self.pending = Some(PendingDiagram {
                        diagram,
                        seen_graph_model: false,
                        seen_root: false,
                    });
                }
                Frame::Diagram
            }
            (Some(Frame::Diagram), b"mxGraphModel") => match self.pending.as_mut() {
                Some(pending) if !pending.seen_graph_model => {
                    pending.seen_graph_model = true;
                    Frame::GraphModel
                }
                _ => Frame::Other("mxGraphModel".to_string()),
            },
            (Some(Frame::GraphModel), b"root") => match self.pending.as_mut() {
                Some(pending) if !pending.seen_root => {
                    pending.seen_root = true;
                    Frame::Root
                }
                _ => Frame::Other("root".to_string()),
            },
            (Some(Frame::Root), b"mxCell") => {
                let cell = plain_cell(&attributes(element)?);
                self.push_cell(cell);
                Frame::Other("mxCell".to_string())
            }
            (Some(Frame::Root), wrapper) if WRAPPER_ELEMENTS.contains(&wrapper) => {
                let attrs = attributes(element)?;
                let cell = wrapper_cell(&attrs);
                let label = attrs.get("label").cloned();
                if !has_body {
                    self.push_cell(finish_wrapper(cell, label));
                    return Ok(());
                }
                Frame::Wrapper {
                    cell,
                    label,
                    has_inner: false,
                }
            }
            (Some(Frame::Wrapper { has_inner: false, .. }), b"mxCell") => {
                let attrs = attributes(element)?;
                if let Some(Frame::Wrapper {
                    cell, has_inner, ..
                }) = self.stack.last_mut()
                {
                    apply_cell_attributes(cell, &attrs);
                    *has_inner = true;
                }
                Frame::Other("mxCell".to_string())
            }
            (_, b"mxfile") => Frame::MxFile,
            (_, other) => Frame::Other(String::from_utf8_lossy(other).into_owned()),
        };

        if has_body {
            self.stack.push(frame);
        }
        Ok(())
    }

    /// Handle a closing tag.
    fn close(&mut self) {
        match self.stack.pop() {
            Some(Frame::Wrapper { cell, label, .. }) => {
                self.push_cell(finish_wrapper(cell, label));
            }
            Some(Frame::Diagram) => {
                if let Some(pending) = self.pending.take() {
                    if pending.seen_root {
                        self.diagrams.push(pending.diagram);
                    } else {
                        debug!(
                            diagram = pending.diagram.name.as_str();
                            "Skipping diagram without a graph model root"
                        );
                    }
                }
            }
            _ => {}
        }
    }

    fn push_cell(&mut self, cell: Cell) {
        if let Some(pending) = self.pending.as_mut() {
            pending.diagram.cells.push(cell);
        }
    }

    fn finish(self) -> Result<Vec<RawDiagram>> {
        match self.stack.last() {
            Some(frame) => Err(ParseError::UnclosedElement {
                element: frame.element_name().to_string(),
            }),
            None => Ok(self.diagrams),
        }
    }
}

/// Read every diagram page from draw.io XML text.
///
/// Pages without an `mxGraphModel > root` (compressed pages, for example)
/// are skipped. An empty result is not an error at this level.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] or [`ParseError::UnclosedElement`] for
/// malformed XML.
///
/// # Examples
///
/// ```
/// use ddd_diagram_parser::drawio::read_str;
///
/// let xml = r#"<mxfile><diagram name="Sales"><mxGraphModel><root>
///     <mxCell id="0"/>
///     <mxCell id="1" parent="0"/>
///     <object id="2" label="Order" ddd_type="aggregate_root">
///         <mxCell style="rounded=1" vertex="1" parent="1"/>
///     </object>
/// </root></mxGraphModel></diagram></mxfile>"#;
///
/// let diagrams = read_str(xml).unwrap();
/// assert_eq!(diagrams.len(), 1);
/// assert_eq!(diagrams[0].cells.len(), 3);
/// assert_eq!(diagrams[0].cells[2].attributes["ddd_type"], "aggregate_root");
/// ```
pub fn read_str(xml: &str) -> Result<Vec<RawDiagram>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut state = DrawioReader::default();
    loop {
        match reader.read_event()? {
            Event::Start(element) => state.open(&element, true)?,
            Event::Empty(element) => state.open(&element, false)?,
            Event::End(_) => state.close(),
            Event::Eof => break,
            _ => {}
        }
    }

    state.finish()
}

/// Read every diagram page from a draw.io file.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be read, and the errors of
/// [`read_str`] otherwise.
pub fn read_file(path: &Path) -> Result<Vec<RawDiagram>> {
    info!(path:? = path; "Reading diagram file");
    let xml = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let diagrams = read_str(&xml)?;
    debug!(path:? = path, diagrams = diagrams.len(); "Diagram file read");
    Ok(diagrams)
}
