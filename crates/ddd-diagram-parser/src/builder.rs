//! Graph building: raw cells to a semantic [`Model`].
//!
//! The builder classifies every cell of one diagram page into a node, an
//! edge, or noise. Noise is dropped silently; unknown tags are never an error
//! here and are left for validation to judge.

use log::{debug, trace};

use ddd_diagram_core::{
    cell::{Cell, DEFAULT_LAYER_ID, RawDiagram},
    identifier::Id,
    semantic::{Edge, Model, Node},
};

use crate::normalize::{NormalizedMetadata, normalize};

/// What the builder decided to do with one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Classification {
    Node,
    Edge,
    Skip,
}

/// Decide whether a cell becomes a node, an edge, or nothing.
fn classify(cell: &Cell) -> Classification {
    if cell.is_structural_root() {
        return Classification::Skip;
    }

    if !cell.has_metadata() {
        let nested = cell
            .parent
            .as_deref()
            .is_some_and(|parent| parent != DEFAULT_LAYER_ID);
        if nested || (!cell.is_vertex && !cell.is_edge) {
            return Classification::Skip;
        }
    }

    if cell.is_edge {
        Classification::Edge
    } else {
        Classification::Node
    }
}

fn build_node(cell: &Cell) -> Node {
    let NormalizedMetadata {
        properties,
        raw_label,
    } = normalize(&cell.attributes, cell.label.as_deref());

    let mut node = Node::new(Id::new(&cell.id)).with_label(raw_label);
    if let Some(ddd_type) = properties.get("ddd_type") {
        node = node.with_type(ddd_type.text());
    }
    if let Some(ddd_name) = properties.get("ddd_name") {
        node = node.with_name(ddd_name.text());
    }
    node.with_properties(properties)
}

fn build_edge(cell: &Cell) -> Option<Edge> {
    let (Some(source), Some(target)) = (cell.source.as_deref(), cell.target.as_deref()) else {
        trace!(id = cell.id.as_str(); "Dropping edge without both endpoints");
        return None;
    };

    let NormalizedMetadata {
        properties,
        raw_label,
    } = normalize(&cell.attributes, cell.label.as_deref());

    let mut edge = Edge::new(Id::new(&cell.id), Id::new(source), Id::new(target)).with_label(raw_label);
    if let Some(relation_type) = properties.get("relation_type") {
        edge = edge.with_relation(relation_type.text());
    }
    Some(edge.with_properties(properties))
}

/// Build the semantic model of one raw diagram page.
///
/// Cells are visited in input order:
///
/// 1. the structural roots (`"0"` and `"1"`) are skipped;
/// 2. cells without custom attributes are skipped when they are nested below
///    something other than the default layer, or carry neither the vertex nor
///    the edge flag;
/// 3. edge-flagged cells become edges, and are dropped if an endpoint is missing;
/// 4. everything else becomes a node.
///
/// # Examples
///
/// ```
/// use ddd_diagram_core::cell::{Cell, RawDiagram};
/// use ddd_diagram_parser::build_model;
///
/// let diagram = RawDiagram::new("Sales")
///     .with_cell(Cell::new("0"))
///     .with_cell(Cell::new("1").with_parent("0"))
///     .with_cell(Cell::vertex("2").with_attribute("type", "bounded_context"));
///
/// let model = build_model(&diagram);
/// assert_eq!(model.node_count(), 1);
/// assert_eq!(model.diagram_name(), "Sales");
/// ```
pub fn build_model(diagram: &RawDiagram) -> Model {
    let mut model = Model::new(diagram.name.as_str());
    let mut skipped = 0usize;
    let mut dropped_edges = 0usize;

    for cell in &diagram.cells {
        match classify(cell) {
            Classification::Skip => skipped += 1,
            Classification::Node => model.add_node(build_node(cell)),
            Classification::Edge => match build_edge(cell) {
                Some(edge) => model.add_edge(edge),
                None => dropped_edges += 1,
            },
        }
    }

    debug!(
        diagram = diagram.name.as_str(),
        cells = diagram.cells.len(),
        nodes = model.node_count(),
        edges = model.edge_count(),
        skipped,
        dropped_edges;
        "Model built"
    );
    trace!(model:% = model; "Built model");

    model
}

#[cfg(test)]
mod tests {
    use ddd_diagram_core::{
        property::PropertyValue,
        vocabulary::{DddType, RelationType},
    };

    use super::*;

    fn page(cells: Vec<Cell>) -> RawDiagram {
        cells
            .into_iter()
            .fold(RawDiagram::new("Test"), RawDiagram::with_cell)
    }

    #[test]
    fn test_structural_roots_are_skipped() {
        let model = build_model(&page(vec![
            Cell::new("0").with_attribute("ddd_type", "entity"),
            Cell::new("1").with_parent("0").with_attribute("ddd_type", "entity"),
        ]));

        assert_eq!(model.node_count(), 0);
    }

    #[test]
    fn test_decorative_cells_are_skipped() {
        let model = build_model(&page(vec![
            Cell::vertex("b-label").with_parent("b-shape"),
            Cell::new("b-loose").with_parent("1"),
            Cell::vertex("b-plain"),
        ]));

        let ids: Vec<String> = model.nodes().map(|node| node.id().to_string()).collect();
        assert_eq!(ids, vec!["b-plain"]);
    }

    #[test]
    fn test_nested_cell_with_metadata_is_kept() {
        let model = build_model(&page(vec![
            Cell::vertex("b-inner")
                .with_parent("b-container")
                .with_attribute("ddd_type", "value_object"),
        ]));

        assert_eq!(model.nodes_by_type(DddType::ValueObject).count(), 1);
    }

    #[test]
    fn test_unflagged_cell_with_metadata_becomes_node() {
        let model = build_model(&page(vec![
            Cell::new("b-object").with_attribute("ddd_type", "external_system"),
        ]));

        assert_eq!(model.node_count(), 1);
    }

    #[test]
    fn test_edge_needs_both_endpoints() {
        let mut half = Cell::edge("b-half", "b-a", "b-b");
        half.target = None;

        let model = build_model(&page(vec![
            half,
            Cell::edge("b-full", "b-a", "b-b").with_attribute("relation", "uses"),
        ]));

        assert_eq!(model.edge_count(), 1);
        let edge = model.edges().next().expect("one edge");
        assert_eq!(edge.relation(), Some(RelationType::Uses));
        assert_eq!(edge.source_id(), "b-a");
    }

    #[test]
    fn test_tags_are_pulled_out_and_kept() {
        let model = build_model(&page(vec![
            Cell::vertex("b-order")
                .with_label("<b>Order</b>")
                .with_attribute("Type", "aggregate_root")
                .with_attribute("name", "Order")
                .with_attribute("rails_resource", "yes"),
        ]));

        let node = model.node_by_str("b-order").expect("node exists");
        assert_eq!(node.kind(), Some(DddType::AggregateRoot));
        assert_eq!(node.ddd_name(), Some("Order"));
        assert_eq!(node.raw_label(), "Order");
        assert_eq!(
            node.properties().get("ddd_type"),
            Some(&PropertyValue::from("aggregate_root"))
        );
        assert_eq!(
            node.properties().get("rails_resource"),
            Some(&PropertyValue::Bool(true))
        );
    }

    #[test]
    fn test_unknown_tags_flow_through() {
        let model = build_model(&page(vec![
            Cell::vertex("b-saga").with_attribute("ddd_type", "saga"),
            Cell::edge("b-link", "b-saga", "b-nowhere").with_attribute("relation_type", "depends_on"),
        ]));

        let node = model.node_by_str("b-saga").expect("node exists");
        assert_eq!(node.ddd_type(), Some("saga"));
        assert_eq!(node.kind(), None);
        let edge = model.edges().next().expect("edge exists");
        assert_eq!(edge.relation_type(), Some("depends_on"));
        assert_eq!(edge.relation(), None);
    }

    #[test]
    fn test_boolean_name_uses_text_form() {
        let model = build_model(&page(vec![
            Cell::vertex("b-flag").with_attribute("ddd_name", "yes"),
        ]));

        let node = model.node_by_str("b-flag").expect("node exists");
        assert_eq!(node.ddd_name(), Some("true"));
    }
}
