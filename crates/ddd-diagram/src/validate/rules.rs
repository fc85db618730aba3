//! The validation rules.
//!
//! Each rule is a small stateless type implementing [`Rule`]. Rules only read
//! the model and append to the report; none of them depends on the output of
//! another. Edges whose endpoints do not resolve to nodes are skipped by every
//! rule that looks at endpoint types.
//!
//! # Organization
//!
//! - [`required_fields`] - R1
//! - [`uniqueness`] - R2
//! - [`required_properties`] - R3
//! - [`relation_type`] - R4
//! - [`endpoints`] - R5 to R9, endpoint typing per relation
//! - [`uses`] - R10
//! - [`aggregate_ownership`] - R11
//! - [`context_membership`] - R12
//! - [`event_ownership`] - R13
//! - [`cross_context`] - R14

pub mod aggregate_ownership;
pub mod context_membership;
pub mod cross_context;
pub mod endpoints;
pub mod event_ownership;
pub mod relation_type;
pub mod required_fields;
pub mod required_properties;
pub mod uniqueness;
pub mod uses;

use ddd_diagram_core::semantic::{Edge, Model, Node};

use crate::validate::{RuleId, ValidationReport};

/// A single validation rule.
pub trait Rule {
    /// The rule's identifier.
    fn id(&self) -> RuleId;

    /// Check `model` and append any issue found to `report`.
    fn validate(&self, model: &Model, report: &mut ValidationReport);
}

/// Every rule, in catalogue order.
pub fn all() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(required_fields::RequiredFields),
        Box::new(uniqueness::Uniqueness),
        Box::new(required_properties::RequiredProperties),
        Box::new(relation_type::RelationTypePresent),
        Box::new(endpoints::EndpointRule::composition()),
        Box::new(endpoints::EndpointRule::publishes_event()),
        Box::new(endpoints::EndpointRule::consumes_event()),
        Box::new(endpoints::EndpointRule::repository_access()),
        Box::new(endpoints::EndpointRule::integration()),
        Box::new(uses::UsesTarget),
        Box::new(aggregate_ownership::AggregateOwnership),
        Box::new(context_membership::ContextMembership),
        Box::new(event_ownership::EventOwnership),
        Box::new(cross_context::CrossContext),
    ]
}

/// Resolve both endpoints of `edge`, or `None` if either is dangling.
pub(crate) fn endpoints<'a>(model: &'a Model, edge: &Edge) -> Option<(&'a Node, &'a Node)> {
    Some((model.node(edge.source_id())?, model.node(edge.target_id())?))
}

/// The node type as shown in messages; empty when the node has none.
pub(crate) fn type_of(node: &Node) -> &str {
    node.ddd_type().unwrap_or_default()
}

/// The node name as shown in messages; empty when the node has none.
pub(crate) fn name_of(node: &Node) -> &str {
    node.ddd_name().unwrap_or_default()
}
