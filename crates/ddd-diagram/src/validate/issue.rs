//! A single validation finding.

use std::fmt;

use serde::Serialize;

use ddd_diagram_core::{
    identifier::Id,
    semantic::{Edge, Model, Node},
};

use crate::validate::{IssueCode, Severity};

/// One validation finding, attached to a node, an edge, or to nothing.
///
/// The severity always follows from the code, so an issue can never carry a
/// severity its rule does not produce.
///
/// # Examples
///
/// ```
/// use ddd_diagram::validate::{Issue, IssueCode, Severity};
///
/// let issue = Issue::new(IssueCode::MissingDddType, "Node must have a ddd_type property")
///     .with_node("7".into(), "Order");
///
/// assert_eq!(issue.severity(), Severity::Error);
/// assert_eq!(
///     issue.to_string(),
///     "ERROR R1_MISSING_DDD_TYPE: Node must have a ddd_type property\n  Node: Order (7)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    code: IssueCode,
    severity: Severity,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    node_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edge_id: Option<Id>,
}

impl Issue {
    /// Create a global issue.
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
            node_id: None,
            node_name: None,
            edge_id: None,
        }
    }

    /// Attach the issue to a node, shown under `name`.
    pub fn with_node(mut self, id: Id, name: impl Into<String>) -> Self {
        self.node_id = Some(id);
        self.node_name = Some(name.into());
        self
    }

    /// Attach the issue to `node`, shown under its name when it has one.
    pub fn for_node(mut self, node: &Node) -> Self {
        self.node_id = Some(node.id());
        self.node_name = node.ddd_name().map(str::to_string);
        self
    }

    /// Attach the issue to `edge`, shown as `source -> target`.
    ///
    /// Endpoints are named by their node name, falling back to their id.
    pub fn for_edge(mut self, edge: &Edge, model: &Model) -> Self {
        self.edge_id = Some(edge.id());
        self.node_name = Some(format!(
            "{} -> {}",
            model.endpoint_name(edge.source_id()),
            model.endpoint_name(edge.target_id())
        ));
        self
    }

    /// Get the issue code.
    pub fn code(&self) -> IssueCode {
        self.code
    }

    /// Get the severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Id of the node the issue is about.
    pub fn node_id(&self) -> Option<Id> {
        self.node_id
    }

    /// Readable name of the node, or `source -> target` for edges.
    pub fn node_name(&self) -> Option<&str> {
        self.node_name.as_deref()
    }

    /// Id of the edge the issue is about.
    pub fn edge_id(&self) -> Option<Id> {
        self.edge_id
    }

    /// Returns `true` if this is an error.
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    /// Returns `true` if this is a warning.
    pub fn is_warning(&self) -> bool {
        self.severity.is_warning()
    }

    /// Where the issue is located, as shown in rendered reports.
    pub fn location(&self) -> String {
        match (self.node_id, self.edge_id, self.node_name.as_deref()) {
            (Some(id), _, Some(name)) => format!("Node: {name} ({id})"),
            (Some(id), _, None) => format!("Node: {id}"),
            (None, Some(id), Some(name)) => format!("Edge: {name} ({id})"),
            (None, Some(id), None) => format!("Edge: {id}"),
            (None, None, _) => "Global".to_string(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}\n  {}",
            self.severity.label(),
            self.code,
            self.message,
            self.location()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_code() {
        let issue = Issue::new(IssueCode::EventNotPublished, "not published");
        assert!(issue.is_warning());
        assert!(!issue.is_error());
    }

    #[test]
    fn test_location_variants() {
        let global = Issue::new(IssueCode::MissingDddType, "m");
        assert_eq!(global.location(), "Global");

        let unnamed = Issue::new(IssueCode::MissingDddName, "m").for_node(&Node::new("i-n1".into()));
        assert_eq!(unnamed.location(), "Node: i-n1");

        let mut model = Model::new("Test");
        model.add_node(Node::new("i-a".into()).with_name("Order"));
        let edge = Edge::new("i-e1".into(), "i-a".into(), "i-b".into());
        let on_edge = Issue::new(IssueCode::MissingRelationType, "m").for_edge(&edge, &model);
        assert_eq!(on_edge.location(), "Edge: Order -> i-b (i-e1)");
        assert_eq!(on_edge.node_name(), Some("Order -> i-b"));
        assert_eq!(on_edge.node_id(), None);
    }

    #[test]
    fn test_display_warning() {
        let issue = Issue::new(IssueCode::UnusualUsesTarget, "unusual")
            .with_node("i-n2".into(), "Catalog");
        assert_eq!(
            issue.to_string(),
            "WARNING R10_UNUSUAL_USES_TARGET: unusual\n  Node: Catalog (i-n2)"
        );
    }
}
