//! R10: `uses` targets an aggregate, a service or a repository.

use std::sync::LazyLock;

use ddd_diagram_core::{
    semantic::Model,
    vocabulary::{DddType, RelationType},
};

use crate::validate::{
    Issue, IssueCode, Rule, RuleId, ValidationReport,
    rules::{endpoints, type_of},
};

/// Recommended targets of a `uses` edge.
pub const ALLOWED_TARGETS: &[DddType] = &[
    DddType::AggregateRoot,
    DddType::ApplicationService,
    DddType::DomainService,
    DddType::Repository,
];

/// Targets a `uses` edge may never point at.
pub const DISALLOWED_TARGETS: &[DddType] = &[DddType::ValueObject, DddType::DomainEvent];

static ALLOWED_LIST: LazyLock<String> = LazyLock::new(|| {
    ALLOWED_TARGETS
        .iter()
        .map(DddType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
});

/// Rejects `uses` into value objects and events, warns on anything else unusual.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsesTarget;

impl Rule for UsesTarget {
    fn id(&self) -> RuleId {
        RuleId::R10
    }

    fn validate(&self, model: &Model, report: &mut ValidationReport) {
        for edge in model.edges_by_type(RelationType::Uses) {
            let Some((_, target)) = endpoints(model, edge) else {
                continue;
            };

            let kind = target.kind();
            let issue = if kind.is_some_and(|kind| DISALLOWED_TARGETS.contains(&kind)) {
                Issue::new(
                    IssueCode::IllegalUsesTarget,
                    format!(
                        "Uses cannot target {}, allowed targets: {}",
                        type_of(target),
                        *ALLOWED_LIST
                    ),
                )
            } else if kind.is_some_and(|kind| ALLOWED_TARGETS.contains(&kind)) {
                continue;
            } else {
                Issue::new(
                    IssueCode::UnusualUsesTarget,
                    format!(
                        "Uses targeting '{}' is unusual, recommended targets: {}",
                        type_of(target),
                        *ALLOWED_LIST
                    ),
                )
            };

            report.add_issue(issue.for_edge(edge, model));
        }
    }
}
