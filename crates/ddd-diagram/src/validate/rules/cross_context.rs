//! R14: relationships respect bounded context boundaries.
//!
//! The context of a bounded context node is its own name; for every other
//! node it is the `bounded_context` property. Edges where either side has no
//! context, or both sides share one, are not checked.

use std::borrow::Cow;

use ddd_diagram_core::{
    semantic::{Model, Node},
    vocabulary::{DddType, RelationType},
};

use crate::validate::{
    Issue, IssueCode, Rule, RuleId, ValidationReport,
    rules::endpoints,
};

/// The bounded context a node lives in.
fn context_of(node: &Node) -> Option<Cow<'_, str>> {
    if node.is(DddType::BoundedContext) {
        node.ddd_name().map(Cow::Borrowed)
    } else {
        node.text("bounded_context")
    }
}

/// Reports edges crossing from one bounded context into another.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossContext;

impl Rule for CrossContext {
    fn id(&self) -> RuleId {
        RuleId::R14
    }

    fn validate(&self, model: &Model, report: &mut ValidationReport) {
        for edge in model.edges() {
            let Some((source, target)) = endpoints(model, edge) else {
                continue;
            };
            let (Some(from), Some(to)) = (context_of(source), context_of(target)) else {
                continue;
            };
            if from == to {
                continue;
            }

            let (code, message) = match edge.relation() {
                Some(RelationType::Composition | RelationType::Association) => (
                    IssueCode::CrossContextComposition,
                    format!(
                        "{} relationship crosses bounded context boundaries ({from} → {to}). \
                         Composition/association should not cross BC boundaries.",
                        edge.relation_type().unwrap_or_default()
                    ),
                ),
                Some(RelationType::Uses) => (
                    IssueCode::CrossContextUses,
                    format!(
                        "Uses relationship crosses bounded context boundaries ({from} → {to}). \
                         Consider if this coupling is necessary."
                    ),
                ),
                Some(RelationType::PublishesEvent | RelationType::ConsumesEvent) => (
                    IssueCode::CrossContextEvent,
                    format!(
                        "Event relationship crosses bounded context boundaries ({from} → {to}). \
                         Ensure this is intentional inter-context communication."
                    ),
                ),
                Some(RelationType::RepositoryAccess) => (
                    IssueCode::CrossContextRepository,
                    format!(
                        "Repository access crosses bounded context boundaries ({from} → {to}). \
                         Services should only access repositories in their own BC."
                    ),
                ),
                Some(RelationType::Integration) | None => continue,
            };

            report.add_issue(Issue::new(code, message).for_edge(edge, model));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::rules::test_support::{codes, edge, model, node, run};

    fn two_contexts() -> Vec<Node> {
        vec![
            node("cc-s", "bounded_context", "Sales", &[]),
            node("cc-c", "bounded_context", "Catalog", &[]),
            node("cc-ps", "application_service", "PlaceOrder", &[("bounded_context", "Sales")]),
            node("cc-or", "aggregate_root", "Order", &[("bounded_context", "Sales")]),
            node("cc-pr", "aggregate_root", "Product", &[("bounded_context", "Catalog")]),
            node("cc-rp", "repository", "Products", &[("bounded_context", "Catalog")]),
            node("cc-ev", "domain_event", "ProductAdded", &[("bounded_context", "Catalog")]),
            node("cc-en", "entity", "OrderLine", &[]),
        ]
    }

    #[test]
    fn test_same_context_and_missing_context_pass() {
        let model = model(
            two_contexts(),
            vec![
                edge("cc-1", "uses", "cc-ps", "cc-or"),
                edge("cc-2", "composition", "cc-or", "cc-en"),
                edge("cc-3", "uses", "cc-ps", "cc-gone"),
            ],
        );

        assert!(run(&CrossContext, &model).is_empty());
    }

    #[test]
    fn test_uses_across_contexts_warns() {
        let model = model(two_contexts(), vec![edge("cc-4", "uses", "cc-ps", "cc-pr")]);

        let report = run(&CrossContext, &model);
        assert_eq!(codes(&report), vec![IssueCode::CrossContextUses]);
        assert_eq!(
            report.issues()[0].message(),
            "Uses relationship crosses bounded context boundaries (Sales → Catalog). \
             Consider if this coupling is necessary."
        );
        assert_eq!(report.issues()[0].node_name(), Some("PlaceOrder -> Product"));
    }

    #[test]
    fn test_severity_per_relation() {
        let model = model(
            two_contexts(),
            vec![
                edge("cc-5", "association", "cc-or", "cc-pr"),
                edge("cc-6", "consumes_event", "cc-ev", "cc-ps"),
                edge("cc-7", "repository_access", "cc-ps", "cc-rp"),
                edge("cc-8", "integration", "cc-ps", "cc-pr"),
                edge("cc-9", "depends_on", "cc-ps", "cc-pr"),
            ],
        );

        let report = run(&CrossContext, &model);
        assert_eq!(
            codes(&report),
            vec![
                IssueCode::CrossContextComposition,
                IssueCode::CrossContextEvent,
                IssueCode::CrossContextRepository,
            ]
        );
        assert!(
            report.issues()[0]
                .message()
                .starts_with("association relationship crosses")
        );
    }

    #[test]
    fn test_context_nodes_use_their_own_name() {
        let model = model(two_contexts(), vec![edge("cc-10", "uses", "cc-s", "cc-c")]);

        let report = run(&CrossContext, &model);
        assert_eq!(codes(&report), vec![IssueCode::CrossContextUses]);
    }
}
