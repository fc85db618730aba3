//! R2: names are unique within their scope.
//!
//! Bounded context names are unique across the whole diagram. Aggregate,
//! service and domain event names are unique among the nodes that share one
//! `bounded_context` value. Every member of a duplicate group is reported.

use indexmap::IndexMap;

use ddd_diagram_core::{semantic::{Model, Node}, vocabulary::DddType};

use crate::validate::{Issue, IssueCode, Rule, RuleId, ValidationReport};

/// Per-context name groups checked by R2, with the label used in messages.
const SCOPED_GROUPS: &[(&[DddType], &str, IssueCode)] = &[
    (&[DddType::AggregateRoot], "Aggregate", IssueCode::DuplicateAggregate),
    (
        &[DddType::ApplicationService, DddType::DomainService],
        "Service",
        IssueCode::DuplicateService,
    ),
    (&[DddType::DomainEvent], "Domain Event", IssueCode::DuplicateEvent),
];

/// Group named nodes by name, in first-appearance order.
fn by_name<'a>(nodes: impl Iterator<Item = &'a Node>) -> IndexMap<&'a str, Vec<&'a Node>> {
    let mut groups: IndexMap<&str, Vec<&Node>> = IndexMap::new();
    for node in nodes {
        if let Some(name) = node.ddd_name() {
            groups.entry(name).or_default().push(node);
        }
    }
    groups
}

/// Reports duplicated names.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniqueness;

impl Uniqueness {
    fn check_bounded_contexts(model: &Model, report: &mut ValidationReport) {
        for (name, nodes) in by_name(model.nodes_by_type(DddType::BoundedContext)) {
            if nodes.len() < 2 {
                continue;
            }
            for node in &nodes {
                report.add_issue(
                    Issue::new(
                        IssueCode::DuplicateBoundedContext,
                        format!(
                            "Bounded Context name '{name}' must be unique (found {} instances)",
                            nodes.len()
                        ),
                    )
                    .for_node(node),
                );
            }
        }
    }

    fn check_within_contexts(model: &Model, report: &mut ValidationReport) {
        let mut by_context: IndexMap<String, Vec<&Node>> = IndexMap::new();
        for node in model.nodes() {
            if let Some(context) = node.text("bounded_context") {
                by_context.entry(context.into_owned()).or_default().push(node);
            }
        }

        for (context, members) in &by_context {
            for (types, label, code) in SCOPED_GROUPS {
                let scoped = members
                    .iter()
                    .copied()
                    .filter(|node| node.kind().is_some_and(|kind| types.contains(&kind)));

                for (name, nodes) in by_name(scoped) {
                    if nodes.len() < 2 {
                        continue;
                    }
                    for node in &nodes {
                        report.add_issue(
                            Issue::new(
                                *code,
                                format!(
                                    "{label} name '{name}' must be unique within Bounded Context '{context}' (found {} instances)",
                                    nodes.len()
                                ),
                            )
                            .for_node(node),
                        );
                    }
                }
            }
        }
    }
}

impl Rule for Uniqueness {
    fn id(&self) -> RuleId {
        RuleId::R2
    }

    fn validate(&self, model: &Model, report: &mut ValidationReport) {
        Self::check_bounded_contexts(model, report);
        Self::check_within_contexts(model, report);
    }
}
