//! R12: aggregates belong to an existing bounded context.

use std::borrow::Cow;

use ddd_diagram_core::{
    semantic::{Model, Node},
    vocabulary::DddType,
};

use crate::validate::{
    Issue, IssueCode, Rule, RuleId, ValidationReport,
    rules::name_of,
};

/// What a node's `bounded_context` property points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContextRef<'a> {
    /// The property is missing or blank.
    Missing,
    /// No bounded context node carries that name.
    Unknown(Cow<'a, str>),
    /// A bounded context node with that name exists.
    Known,
}

/// Resolve the `bounded_context` property of `node` against the model.
pub(crate) fn context_ref<'a>(node: &'a Node, model: &Model) -> ContextRef<'a> {
    match node.text("bounded_context") {
        None => ContextRef::Missing,
        Some(name) if model.nodes_by_name(&name).any(|n| n.is(DddType::BoundedContext)) => {
            ContextRef::Known
        }
        Some(name) => ContextRef::Unknown(name),
    }
}

/// Reports aggregate roots outside any existing bounded context.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextMembership;

impl Rule for ContextMembership {
    fn id(&self) -> RuleId {
        RuleId::R12
    }

    fn validate(&self, model: &Model, report: &mut ValidationReport) {
        for aggregate in model.nodes_by_type(DddType::AggregateRoot) {
            let issue = match context_ref(aggregate, model) {
                ContextRef::Known => continue,
                ContextRef::Missing => Issue::new(
                    IssueCode::AggregateMissingBoundedContext,
                    format!(
                        "Aggregate '{}' must belong to a bounded context (missing 'bounded_context' property)",
                        name_of(aggregate)
                    ),
                ),
                ContextRef::Unknown(context) => Issue::new(
                    IssueCode::AggregateInvalidBoundedContext,
                    format!(
                        "Aggregate '{}' references non-existent bounded context '{context}'",
                        name_of(aggregate)
                    ),
                ),
            };

            report.add_issue(issue.for_node(aggregate));
        }
    }
}
