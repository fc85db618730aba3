//! Graph element types for the semantic model.

use std::{borrow::Cow, fmt};

use serde::Serialize;

use crate::{
    identifier::Id,
    property::{Properties, PropertyValue},
    vocabulary::{DddType, RelationType},
};

/// Returns the tag when it is present and not blank.
fn non_blank(tag: &Option<String>) -> Option<&str> {
    tag.as_deref().filter(|tag| !tag.trim().is_empty())
}

/// A modeling element: one tagged shape of the diagram.
///
/// # Examples
///
/// ```
/// use ddd_diagram_core::{semantic::Node, vocabulary::DddType};
///
/// let order = Node::new("2".into())
///     .with_type("aggregate_root")
///     .with_name("Order")
///     .with_property("bounded_context", "Sales");
///
/// assert_eq!(order.kind(), Some(DddType::AggregateRoot));
/// assert_eq!(order.text("bounded_context").as_deref(), Some("Sales"));
/// assert_eq!(order.to_string(), "<Node id=2 type=aggregate_root name=Order>");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    id: Id,
    ddd_type: Option<String>,
    ddd_name: Option<String>,
    properties: Properties,
    raw_label: String,
}

impl Node {
    /// Create an untagged node with no properties and an empty label.
    pub fn new(id: Id) -> Self {
        Self {
            id,
            ddd_type: None,
            ddd_name: None,
            properties: Properties::new(),
            raw_label: String::new(),
        }
    }

    /// Set the node type tag.
    pub fn with_type(mut self, ddd_type: impl Into<String>) -> Self {
        self.ddd_type = Some(ddd_type.into());
        self
    }

    /// Set the node name.
    pub fn with_name(mut self, ddd_name: impl Into<String>) -> Self {
        self.ddd_name = Some(ddd_name.into());
        self
    }

    /// Add a single property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// Replace the whole property map.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Set the cleaned label.
    pub fn with_label(mut self, raw_label: impl Into<String>) -> Self {
        self.raw_label = raw_label.into();
        self
    }

    /// Get the node identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// The type tag, if present and not blank. Unknown tags are returned verbatim.
    pub fn ddd_type(&self) -> Option<&str> {
        non_blank(&self.ddd_type)
    }

    /// The name, if present and not blank.
    pub fn ddd_name(&self) -> Option<&str> {
        non_blank(&self.ddd_name)
    }

    /// The type tag parsed into the known vocabulary.
    pub fn kind(&self) -> Option<DddType> {
        self.ddd_type().and_then(DddType::parse)
    }

    /// Returns `true` if the node is tagged with `ddd_type`.
    pub fn is(&self, ddd_type: DddType) -> bool {
        self.kind() == Some(ddd_type)
    }

    /// Borrow the property map.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Text form of a property, if present and not blank.
    pub fn text(&self, key: &str) -> Option<Cow<'_, str>> {
        self.properties.text(key)
    }

    /// The cleaned label. Empty when the shape had none.
    pub fn raw_label(&self) -> &str {
        &self.raw_label
    }

    /// Name used when referring to this node in messages.
    ///
    /// Falls back to the id when the node has no name.
    pub fn display_name(&self) -> String {
        match self.ddd_name() {
            Some(name) => name.to_string(),
            None => self.id.to_owned_string(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Node id={} type={} name={}>",
            self.id,
            self.ddd_type().unwrap_or("unknown"),
            self.ddd_name().unwrap_or("unnamed")
        )
    }
}

/// A relationship between two nodes.
///
/// Endpoints are plain ids: an edge may point at a node that does not exist,
/// and consumers are expected to skip such edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    id: Id,
    relation_type: Option<String>,
    source_id: Id,
    target_id: Id,
    properties: Properties,
    raw_label: String,
}

impl Edge {
    /// Create an untyped edge from `source_id` to `target_id`.
    pub fn new(id: Id, source_id: Id, target_id: Id) -> Self {
        Self {
            id,
            relation_type: None,
            source_id,
            target_id,
            properties: Properties::new(),
            raw_label: String::new(),
        }
    }

    /// Set the relation type tag.
    pub fn with_relation(mut self, relation_type: impl Into<String>) -> Self {
        self.relation_type = Some(relation_type.into());
        self
    }

    /// Add a single property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key, value);
        self
    }

    /// Replace the whole property map.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Set the cleaned label.
    pub fn with_label(mut self, raw_label: impl Into<String>) -> Self {
        self.raw_label = raw_label.into();
        self
    }

    /// Get the edge identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// The relation tag, if present and not blank.
    pub fn relation_type(&self) -> Option<&str> {
        non_blank(&self.relation_type)
    }

    /// The relation tag parsed into the known vocabulary.
    pub fn relation(&self) -> Option<RelationType> {
        self.relation_type().and_then(RelationType::parse)
    }

    /// Returns `true` if the edge is tagged with `relation`.
    pub fn is(&self, relation: RelationType) -> bool {
        self.relation() == Some(relation)
    }

    /// Get the source node id.
    pub fn source_id(&self) -> Id {
        self.source_id
    }

    /// Get the target node id.
    pub fn target_id(&self) -> Id {
        self.target_id
    }

    /// Borrow the property map.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The cleaned label.
    pub fn raw_label(&self) -> &str {
        &self.raw_label
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Edge id={} type={} {} -> {}>",
            self.id,
            self.relation_type().unwrap_or("unknown"),
            self.source_id,
            self.target_id
        )
    }
}
