//! R3: per-type required properties.

use ddd_diagram_core::{semantic::Model, vocabulary::DddType};

use crate::validate::{
    Issue, IssueCode, Rule, RuleId, ValidationReport,
    rules::{name_of, type_of},
};

/// Properties each node type must carry with a non-blank value.
///
/// Domain events carry no requirement here; their context is checked by R13.
pub const REQUIRED_PROPERTIES: &[(DddType, &[&str])] = &[
    (DddType::BoundedContext, &["context_key"]),
    (DddType::AggregateRoot, &["bounded_context", "id_type"]),
    (DddType::Entity, &["aggregate", "id_type"]),
    (DddType::ValueObject, &["aggregate"]),
    (DddType::ApplicationService, &["bounded_context"]),
    (DddType::DomainService, &["bounded_context"]),
    (DddType::Repository, &["aggregate"]),
    (DddType::ExternalSystem, &["kind"]),
];

/// Returns the properties required for `ddd_type`.
pub fn required_for(ddd_type: DddType) -> &'static [&'static str] {
    REQUIRED_PROPERTIES
        .iter()
        .find(|(kind, _)| *kind == ddd_type)
        .map(|(_, props)| *props)
        .unwrap_or_default()
}

/// Reports required properties that are missing or blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredProperties;

impl Rule for RequiredProperties {
    fn id(&self) -> RuleId {
        RuleId::R3
    }

    fn validate(&self, model: &Model, report: &mut ValidationReport) {
        for node in model.nodes() {
            let Some(kind) = node.kind() else {
                continue;
            };

            for prop in required_for(kind) {
                if node.text(prop).is_none() {
                    report.add_issue(
                        Issue::new(
                            IssueCode::MissingRequiredProperty,
                            format!(
                                "{} '{}' must have '{prop}' property",
                                type_of(node),
                                name_of(node)
                            ),
                        )
                        .for_node(node),
                    );
                }
            }
        }
    }
}
