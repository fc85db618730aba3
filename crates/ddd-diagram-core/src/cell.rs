//! Raw diagram cells.
//!
//! A [`Cell`] is one attributed shape or connector exactly as the diagram
//! reader found it: nothing is normalized or classified yet. A [`RawDiagram`]
//! groups the cells of one page of a diagram file.

use indexmap::IndexMap;

/// Ids of the structural root cells every draw.io page starts with.
///
/// Cell `"0"` is the model root and cell `"1"` the default layer.
pub const RESERVED_ROOT_IDS: [&str; 2] = ["0", "1"];

/// Id of the default layer that top-level shapes are parented to.
pub const DEFAULT_LAYER_ID: &str = "1";

/// One raw cell of a diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Cell id.
    pub id: String,
    /// Label text, possibly containing inline markup.
    pub label: Option<String>,
    /// Drawing style string.
    pub style: Option<String>,
    /// Whether the reader classified the cell as a shape.
    pub is_vertex: bool,
    /// Whether the reader classified the cell as a connector.
    pub is_edge: bool,
    /// Id of the containing cell.
    pub parent: Option<String>,
    /// Source endpoint id (connectors only).
    pub source: Option<String>,
    /// Target endpoint id (connectors only).
    pub target: Option<String>,
    /// Custom attribute bag, in document order.
    pub attributes: IndexMap<String, String>,
}

impl Cell {
    /// Creates a cell with the given id and nothing else set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Creates a shape cell parented to the default layer.
    ///
    /// # Examples
    ///
    /// ```
    /// use ddd_diagram_core::cell::Cell;
    ///
    /// let cell = Cell::vertex("2")
    ///     .with_label("Order")
    ///     .with_attribute("ddd_type", "aggregate_root");
    ///
    /// assert!(cell.is_vertex);
    /// assert_eq!(cell.parent.as_deref(), Some("1"));
    /// assert!(cell.has_metadata());
    /// ```
    pub fn vertex(id: impl Into<String>) -> Self {
        Self {
            is_vertex: true,
            parent: Some(DEFAULT_LAYER_ID.to_string()),
            ..Self::new(id)
        }
    }

    /// Creates a connector cell between `source` and `target`.
    pub fn edge(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            is_edge: true,
            parent: Some(DEFAULT_LAYER_ID.to_string()),
            source: Some(source.into()),
            target: Some(target.into()),
            ..Self::new(id)
        }
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the parent id.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Adds one custom attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns `true` if the cell carries any custom attribute.
    pub fn has_metadata(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Returns `true` if the id is one of the [`RESERVED_ROOT_IDS`].
    pub fn is_structural_root(&self) -> bool {
        RESERVED_ROOT_IDS.contains(&self.id.as_str())
    }
}

/// The cells of one diagram page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDiagram {
    /// Page id, when the file declares one.
    pub id: Option<String>,
    /// Page name.
    pub name: String,
    /// Cells in document order.
    pub cells: Vec<Cell>,
}

impl RawDiagram {
    /// Name used for pages that do not declare one.
    pub const UNTITLED: &'static str = "Untitled";

    /// Creates an empty page.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            cells: Vec::new(),
        }
    }

    /// Appends a cell.
    pub fn with_cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }
}

impl Default for RawDiagram {
    fn default() -> Self {
        Self::new(Self::UNTITLED)
    }
}
