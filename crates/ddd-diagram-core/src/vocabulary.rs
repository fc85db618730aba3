//! The modeling vocabulary: node types and relation types.
//!
//! Nodes and edges keep their tags as plain strings so that unknown tags flow
//! through the pipeline untouched. The enums in this module are the closed set
//! of tags the validation rules reason about; [`DddType::parse`] and
//! [`RelationType::parse`] return `None` for anything outside it.

use std::fmt;

/// Semantic tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DddType {
    BoundedContext,
    AggregateRoot,
    Entity,
    ValueObject,
    DomainEvent,
    ApplicationService,
    DomainService,
    Repository,
    ExternalSystem,
}

impl DddType {
    /// Every node type, in catalogue order.
    pub const ALL: [DddType; 9] = [
        DddType::BoundedContext,
        DddType::AggregateRoot,
        DddType::Entity,
        DddType::ValueObject,
        DddType::DomainEvent,
        DddType::ApplicationService,
        DddType::DomainService,
        DddType::Repository,
        DddType::ExternalSystem,
    ];

    /// Returns the tag as written in diagrams (e.g. `"aggregate_root"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            DddType::BoundedContext => "bounded_context",
            DddType::AggregateRoot => "aggregate_root",
            DddType::Entity => "entity",
            DddType::ValueObject => "value_object",
            DddType::DomainEvent => "domain_event",
            DddType::ApplicationService => "application_service",
            DddType::DomainService => "domain_service",
            DddType::Repository => "repository",
            DddType::ExternalSystem => "external_system",
        }
    }

    /// Parses an exact tag. Matching is case-sensitive.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == tag)
    }
}

impl fmt::Display for DddType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic tag of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    Composition,
    Uses,
    PublishesEvent,
    ConsumesEvent,
    RepositoryAccess,
    Integration,
    Association,
}

impl RelationType {
    /// Every relation type, in catalogue order.
    pub const ALL: [RelationType; 7] = [
        RelationType::Composition,
        RelationType::Uses,
        RelationType::PublishesEvent,
        RelationType::ConsumesEvent,
        RelationType::RepositoryAccess,
        RelationType::Integration,
        RelationType::Association,
    ];

    /// Returns the tag as written in diagrams (e.g. `"publishes_event"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Composition => "composition",
            RelationType::Uses => "uses",
            RelationType::PublishesEvent => "publishes_event",
            RelationType::ConsumesEvent => "consumes_event",
            RelationType::RepositoryAccess => "repository_access",
            RelationType::Integration => "integration",
            RelationType::Association => "association",
        }
    }

    /// Parses an exact tag. Matching is case-sensitive.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rel| rel.as_str() == tag)
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
