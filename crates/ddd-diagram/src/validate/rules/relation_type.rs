//! R4: every edge carries a relation type.

use ddd_diagram_core::semantic::Model;

use crate::validate::{Issue, IssueCode, Rule, RuleId, ValidationReport};

/// Reports edges without a `relation_type`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationTypePresent;

impl Rule for RelationTypePresent {
    fn id(&self) -> RuleId {
        RuleId::R4
    }

    fn validate(&self, model: &Model, report: &mut ValidationReport) {
        for edge in model.edges().filter(|edge| edge.relation_type().is_none()) {
            report.add_issue(
                Issue::new(
                    IssueCode::MissingRelationType,
                    "Edge must have a relation_type property",
                )
                .for_edge(edge, model),
            );
        }
    }
}
