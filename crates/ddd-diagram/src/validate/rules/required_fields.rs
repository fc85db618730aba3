//! R1: every node carries a `ddd_type` and a `ddd_name`.

use ddd_diagram_core::semantic::Model;

use crate::validate::{Issue, IssueCode, Rule, RuleId, ValidationReport};

/// Reports nodes missing their type or name, one error per missing field.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredFields;

impl Rule for RequiredFields {
    fn id(&self) -> RuleId {
        RuleId::R1
    }

    fn validate(&self, model: &Model, report: &mut ValidationReport) {
        for node in model.nodes() {
            if node.ddd_type().is_none() {
                report.add_issue(
                    Issue::new(IssueCode::MissingDddType, "Node must have a ddd_type property")
                        .with_node(node.id(), node.ddd_name().unwrap_or("unnamed")),
                );
            }

            if node.ddd_name().is_none() {
                report.add_issue(
                    Issue::new(IssueCode::MissingDddName, "Node must have a ddd_name property")
                        .with_node(node.id(), node.ddd_type().unwrap_or("unknown type")),
                );
            }
        }
    }
}
