//! The graph model and its query surface.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    identifier::Id,
    semantic::element::{Edge, Node},
    vocabulary::{DddType, RelationType},
};

/// Bucket used by [`ModelStats`] for untagged elements.
const UNKNOWN_TAG: &str = "unknown";

/// The typed graph of one diagram page.
///
/// Nodes are indexed by id and keep insertion order; adding a node whose id is
/// already present replaces the earlier node in place. Edges are kept in
/// insertion order. All queries other than [`Model::node`] are linear scans.
#[derive(Debug, Clone)]
pub struct Model {
    diagram_name: String,
    nodes: IndexMap<Id, Node>,
    edges: Vec<Edge>,
}

impl Model {
    /// Name used when a diagram page has none.
    pub const UNTITLED: &'static str = "Untitled";

    /// Create an empty model for the named diagram page.
    pub fn new(diagram_name: impl Into<String>) -> Self {
        Self {
            diagram_name: diagram_name.into(),
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Add a node, replacing any node with the same id.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id(), node);
    }

    /// Add an edge. Endpoints are not checked.
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// The diagram page name.
    pub fn diagram_name(&self) -> &str {
        &self.diagram_name
    }

    /// Look up a node by id.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Look up a node by its id string.
    ///
    /// Strings that were never interned cannot name a node.
    pub fn node_by_str(&self, id: &str) -> Option<&Node> {
        Id::lookup(id).and_then(|id| self.node(id))
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Nodes tagged with `ddd_type`.
    pub fn nodes_by_type(&self, ddd_type: DddType) -> impl Iterator<Item = &Node> {
        self.nodes().filter(move |node| node.is(ddd_type))
    }

    /// Nodes whose name equals `name`.
    pub fn nodes_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> {
        self.nodes().filter(move |node| node.ddd_name() == Some(name))
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Edges tagged with `relation`.
    pub fn edges_by_type(&self, relation: RelationType) -> impl Iterator<Item = &Edge> {
        self.edges().filter(move |edge| edge.is(relation))
    }

    /// Edges leaving `id`.
    pub fn edges_from(&self, id: Id) -> impl Iterator<Item = &Edge> {
        self.edges().filter(move |edge| edge.source_id() == id)
    }

    /// Edges entering `id`.
    pub fn edges_to(&self, id: Id) -> impl Iterator<Item = &Edge> {
        self.edges().filter(move |edge| edge.target_id() == id)
    }

    /// Edges touching `id` at either end.
    pub fn edges_for(&self, id: Id) -> impl Iterator<Item = &Edge> {
        self.edges()
            .filter(move |edge| edge.source_id() == id || edge.target_id() == id)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Name used for an endpoint in messages: the node name, or the id itself.
    pub fn endpoint_name(&self, id: Id) -> String {
        match self.node(id) {
            Some(node) => node.display_name(),
            None => id.to_owned_string(),
        }
    }

    /// Count nodes and edges, grouped by tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use ddd_diagram_core::semantic::{Model, Node};
    ///
    /// let mut model = Model::new("Sales");
    /// model.add_node(Node::new("2".into()).with_type("entity"));
    /// model.add_node(Node::new("3".into()));
    ///
    /// let stats = model.stats();
    /// assert_eq!(stats.nodes_count, 2);
    /// assert_eq!(stats.nodes_by_type["entity"], 1);
    /// assert_eq!(stats.nodes_by_type["unknown"], 1);
    /// ```
    pub fn stats(&self) -> ModelStats {
        let mut nodes_by_type = IndexMap::new();
        for node in self.nodes() {
            let tag = node.ddd_type().unwrap_or(UNKNOWN_TAG);
            *nodes_by_type.entry(tag.to_string()).or_insert(0) += 1;
        }

        let mut edges_by_type = IndexMap::new();
        for edge in self.edges() {
            let tag = edge.relation_type().unwrap_or(UNKNOWN_TAG);
            *edges_by_type.entry(tag.to_string()).or_insert(0) += 1;
        }

        ModelStats {
            nodes_count: self.node_count(),
            edges_count: self.edge_count(),
            nodes_by_type,
            edges_by_type,
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Self::UNTITLED)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Model '{}': {} nodes, {} edges>",
            self.diagram_name,
            self.node_count(),
            self.edge_count()
        )
    }
}

/// Element counts of a [`Model`].
///
/// Tag buckets keep first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelStats {
    pub nodes_count: usize,
    pub edges_count: usize,
    pub nodes_by_type: IndexMap<String, usize>,
    pub edges_by_type: IndexMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> Model {
        let mut model = Model::new("Ordering");
        model.add_node(
            Node::new("m-bc".into())
                .with_type("bounded_context")
                .with_name("Sales"),
        );
        model.add_node(
            Node::new("m-order".into())
                .with_type("aggregate_root")
                .with_name("Order"),
        );
        model.add_node(Node::new("m-line".into()).with_type("entity").with_name("Line"));
        model.add_edge(
            Edge::new("m-e1".into(), "m-order".into(), "m-line".into()).with_relation("composition"),
        );
        model.add_edge(Edge::new("m-e2".into(), "m-line".into(), "m-ghost".into()));
        model
    }

    #[test]
    fn test_node_lookup() {
        let model = sample_model();

        assert_eq!(model.node("m-order".into()).and_then(Node::ddd_name), Some("Order"));
        assert!(model.node("m-ghost".into()).is_none());
        assert!(model.node_by_str("never-created-8d2e").is_none());
        assert!(model.node_by_str("m-bc").is_some());
    }

    #[test]
    fn test_repeated_id_replaces_in_place() {
        let mut model = sample_model();
        model.add_node(Node::new("m-bc".into()).with_type("bounded_context").with_name("Billing"));

        let names: Vec<_> = model.nodes().filter_map(Node::ddd_name).collect();
        assert_eq!(names, vec!["Billing", "Order", "Line"]);
        assert_eq!(model.node_count(), 3);
    }

    #[test]
    fn test_filters() {
        let model = sample_model();

        assert_eq!(model.nodes_by_type(DddType::Entity).count(), 1);
        assert_eq!(model.nodes_by_type(DddType::Repository).count(), 0);
        assert_eq!(model.nodes_by_name("Order").count(), 1);
        assert_eq!(model.edges_by_type(RelationType::Composition).count(), 1);
        assert_eq!(model.edges_from("m-order".into()).count(), 1);
        assert_eq!(model.edges_to("m-line".into()).count(), 1);
        assert_eq!(model.edges_for("m-line".into()).count(), 2);
    }

    #[test]
    fn test_endpoint_name() {
        let model = sample_model();

        assert_eq!(model.endpoint_name("m-order".into()), "Order");
        assert_eq!(model.endpoint_name("m-ghost".into()), "m-ghost");
    }

    #[test]
    fn test_stats() {
        let stats = sample_model().stats();

        assert_eq!(stats.nodes_count, 3);
        assert_eq!(stats.edges_count, 2);
        assert_eq!(stats.nodes_by_type["aggregate_root"], 1);
        assert_eq!(stats.edges_by_type["composition"], 1);
        assert_eq!(stats.edges_by_type["unknown"], 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample_model().to_string(),
            "<Model 'Ordering': 3 nodes, 2 edges>"
        );
        assert_eq!(Model::default().diagram_name(), "Untitled");
    }

    mod proptest_tests {
        use proptest::prelude::*;
        use proptest::test_runner::TestCaseError;

        use super::*;

        // =====================================================================
        // Strategies
        // =====================================================================

        fn tag_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                proptest::sample::select(DddType::ALL.to_vec()).prop_map(|t| t.to_string()),
                Just(String::new()),
                Just("saga".to_string()),
            ]
        }

        /// Models over a small id space, with repeated ids and dangling edges.
        fn model_strategy() -> impl Strategy<Value = Model> {
            let nodes = proptest::collection::vec((0..6usize, tag_strategy()), 0..10);
            let edges = proptest::collection::vec((0..8usize, 0..8usize), 0..10);

            (nodes, edges).prop_map(|(nodes, edges)| {
                let mut model = Model::new("Random");
                for (i, ddd_type) in nodes {
                    model.add_node(Node::new(format!("mp-n{i}").as_str().into()).with_type(&ddd_type));
                }
                for (i, (source, target)) in edges.into_iter().enumerate() {
                    model.add_edge(Edge::new(
                        format!("mp-e{i}").as_str().into(),
                        format!("mp-n{source}").as_str().into(),
                        format!("mp-n{target}").as_str().into(),
                    ));
                }
                model
            })
        }

        // =====================================================================
        // Property Test Functions
        // =====================================================================

        fn check_stats_add_up(model: &Model) -> Result<(), TestCaseError> {
            let stats = model.stats();
            prop_assert_eq!(stats.nodes_count, model.node_count());
            prop_assert_eq!(stats.nodes_by_type.values().sum::<usize>(), model.node_count());
            prop_assert_eq!(stats.edges_by_type.values().sum::<usize>(), model.edge_count());
            Ok(())
        }

        fn check_type_buckets_partition(model: &Model) -> Result<(), TestCaseError> {
            let typed: usize = DddType::ALL
                .iter()
                .map(|ddd_type| model.nodes_by_type(*ddd_type).count())
                .sum();
            let others = model.nodes().filter(|node| node.kind().is_none()).count();
            prop_assert_eq!(typed + others, model.node_count());
            Ok(())
        }

        fn check_incident_edges(model: &Model) -> Result<(), TestCaseError> {
            for node in model.nodes() {
                let id = node.id();
                let loops = model
                    .edges()
                    .filter(|edge| edge.source_id() == id && edge.target_id() == id)
                    .count();
                prop_assert_eq!(
                    model.edges_for(id).count(),
                    model.edges_from(id).count() + model.edges_to(id).count() - loops
                );
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn stats_add_up(model in model_strategy()) {
                check_stats_add_up(&model)?;
            }

            #[test]
            fn type_buckets_partition(model in model_strategy()) {
                check_type_buckets_partition(&model)?;
            }

            #[test]
            fn incident_edges(model in model_strategy()) {
                check_incident_edges(&model)?;
            }
        }
    }
}
