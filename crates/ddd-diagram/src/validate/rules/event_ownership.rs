//! R13: domain events belong to a bounded context and have exactly one publisher.

use indexmap::IndexMap;

use ddd_diagram_core::{
    identifier::Id,
    semantic::{Model, Node},
    vocabulary::{DddType, RelationType},
};

use crate::validate::{
    Issue, IssueCode, Rule, RuleId, ValidationReport,
    rules::{
        context_membership::{ContextRef, context_ref},
        name_of,
    },
};

/// Reports events without a valid context, without a publisher, or with several.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventOwnership;

impl EventOwnership {
    /// Aggregate roots publishing `event`, distinct and in edge order.
    fn publishers<'a>(event: &Node, model: &'a Model) -> Vec<&'a Node> {
        let mut publishers: IndexMap<Id, &Node> = IndexMap::new();
        for edge in model.edges_to(event.id()) {
            if !edge.is(RelationType::PublishesEvent) {
                continue;
            }
            if let Some(source) = model.node(edge.source_id()) {
                if source.is(DddType::AggregateRoot) {
                    publishers.entry(source.id()).or_insert(source);
                }
            }
        }
        publishers.into_values().collect()
    }

    fn check(event: &Node, model: &Model) -> Option<Issue> {
        let name = name_of(event);

        let issue = match context_ref(event, model) {
            ContextRef::Missing => Issue::new(
                IssueCode::EventMissingBoundedContext,
                format!(
                    "Domain event '{name}' must belong to a bounded context (missing 'bounded_context' property)"
                ),
            ),
            ContextRef::Unknown(context) => Issue::new(
                IssueCode::EventInvalidBoundedContext,
                format!("Domain event '{name}' references non-existent bounded context '{context}'"),
            ),
            ContextRef::Known => {
                let publishers = Self::publishers(event, model);
                match publishers.as_slice() {
                    [] => Issue::new(
                        IssueCode::EventNotPublished,
                        format!("Domain event '{name}' is not published by any aggregate"),
                    ),
                    [_] => return None,
                    many => {
                        let names: Vec<&str> = many.iter().map(|node| name_of(node)).collect();
                        Issue::new(
                            IssueCode::MultipleEventPublishers,
                            format!(
                                "Domain event '{name}' is published by multiple aggregates ({}). \
                                 Events should have single ownership.",
                                names.join(", ")
                            ),
                        )
                    }
                }
            }
        };

        Some(issue.for_node(event))
    }
}

impl Rule for EventOwnership {
    fn id(&self) -> RuleId {
        RuleId::R13
    }

    fn validate(&self, model: &Model, report: &mut ValidationReport) {
        report.extend(
            model
                .nodes_by_type(DddType::DomainEvent)
                .filter_map(|event| Self::check(event, model)),
        );
    }
}
