//! R11: entities and value objects belong to an aggregate.
//!
//! Ownership is stated twice in a diagram: by the `aggregate` property on the
//! member and by a composition edge from the aggregate root. Having neither is
//! an error, having only one of them is a warning, and a property naming an
//! aggregate root that does not exist is an error.

use ddd_diagram_core::{
    semantic::{Model, Node},
    vocabulary::{DddType, RelationType},
};
use log::trace;

use crate::validate::{
    Issue, IssueCode, Rule, RuleId, ValidationReport,
    rules::{name_of, type_of},
};

/// Reports entities and value objects whose aggregate ownership is missing or inconsistent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateOwnership;

impl AggregateOwnership {
    fn check(node: &Node, model: &Model) -> Option<Issue> {
        let subject = format!("{} '{}'", type_of(node), name_of(node));
        let declared = node.text("aggregate");

        // Source of the first composition edge into the node.
        let composer = model
            .edges_to(node.id())
            .find(|edge| edge.is(RelationType::Composition))
            .map(|edge| model.node(edge.source_id()));

        trace!(
            node:% = node.id(),
            declared:? = declared.as_deref(),
            composed = composer.is_some();
            "Checking ownership"
        );

        let issue = match (declared, composer) {
            (Some(declared), composer) => {
                let exists = model
                    .nodes_by_name(&declared)
                    .any(|candidate| candidate.is(DddType::AggregateRoot));
                if !exists {
                    Issue::new(
                        IssueCode::InvalidAggregateReference,
                        format!("{subject} references non-existent aggregate '{declared}'"),
                    )
                } else {
                    match composer {
                        None => Issue::new(
                            IssueCode::MissingCompositionEdge,
                            format!(
                                "{subject} has aggregate property but no composition edge from aggregate"
                            ),
                        ),
                        Some(Some(source)) if name_of(source) != declared => Issue::new(
                            IssueCode::AggregateMismatch,
                            format!(
                                "{subject} has aggregate property '{declared}' but composition from '{}'",
                                name_of(source)
                            ),
                        ),
                        Some(_) => return None,
                    }
                }
            }
            (None, Some(source)) => Issue::new(
                IssueCode::MissingAggregateProperty,
                format!(
                    "{subject} has composition edge but no 'aggregate' property (should be '{}')",
                    source.map(name_of).unwrap_or_default()
                ),
            ),
            (None, None) => Issue::new(
                IssueCode::MissingAggregateOwnership,
                format!(
                    "{subject} must belong to an aggregate (missing both 'aggregate' property and composition edge)"
                ),
            ),
        };

        Some(issue.for_node(node))
    }
}

impl Rule for AggregateOwnership {
    fn id(&self) -> RuleId {
        RuleId::R11
    }

    fn validate(&self, model: &Model, report: &mut ValidationReport) {
        let members = model
            .nodes()
            .filter(|node| node.is(DddType::Entity) || node.is(DddType::ValueObject));

        report.extend(members.filter_map(|node| Self::check(node, model)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::rules::test_support::{codes, edge, model, node, run};

    fn order() -> Node {
        node("ao-ag", "aggregate_root", "Order", &[])
    }

    #[test]
    fn test_property_and_composition_agree() {
        let model = model(
            vec![order(), node("ao-en", "entity", "OrderLine", &[("aggregate", "Order")])],
            vec![edge("ao-1", "composition", "ao-ag", "ao-en")],
        );

        assert!(run(&AggregateOwnership, &model).is_empty());
    }

    #[test]
    fn test_neither_property_nor_composition() {
        let model = model(vec![order(), node("ao-vo", "value_object", "Money", &[])], vec![]);

        let report = run(&AggregateOwnership, &model);
        assert_eq!(codes(&report), vec![IssueCode::MissingAggregateOwnership]);
        assert_eq!(
            report.issues()[0].message(),
            "value_object 'Money' must belong to an aggregate \
             (missing both 'aggregate' property and composition edge)"
        );
        assert_eq!(report.issues()[0].node_id(), Some("ao-vo".into()));
    }

    #[test]
    fn test_property_without_composition_warns() {
        let model = model(
            vec![order(), node("ao-en", "entity", "OrderLine", &[("aggregate", "Order")])],
            vec![],
        );

        let report = run(&AggregateOwnership, &model);
        assert_eq!(codes(&report), vec![IssueCode::MissingCompositionEdge]);
        assert!(report.valid());
    }

    #[test]
    fn test_composition_without_property_suggests_name() {
        let model = model(
            vec![order(), node("ao-en", "entity", "OrderLine", &[])],
            vec![edge("ao-2", "composition", "ao-ag", "ao-en")],
        );

        let report = run(&AggregateOwnership, &model);
        assert_eq!(codes(&report), vec![IssueCode::MissingAggregateProperty]);
        assert_eq!(
            report.issues()[0].message(),
            "entity 'OrderLine' has composition edge but no 'aggregate' property (should be 'Order')"
        );
    }

    #[test]
    fn test_unknown_aggregate_reference() {
        let model = model(
            vec![
                order(),
                node("ao-cx", "entity", "Cart", &[]),
                node("ao-en", "entity", "OrderLine", &[("aggregate", "Cart")]),
            ],
            vec![edge("ao-3", "composition", "ao-ag", "ao-en")],
        );

        let report = run(&AggregateOwnership, &model);
        assert_eq!(
            codes(&report),
            vec![
                IssueCode::MissingAggregateOwnership,
                IssueCode::InvalidAggregateReference
            ]
        );
        assert_eq!(
            report.issues()[1].message(),
            "entity 'OrderLine' references non-existent aggregate 'Cart'"
        );
    }

    #[test]
    fn test_mismatch_between_property_and_composer() {
        let model = model(
            vec![
                order(),
                node("ao-ag2", "aggregate_root", "Invoice", &[]),
                node("ao-en", "entity", "OrderLine", &[("aggregate", "Order")]),
            ],
            vec![edge("ao-4", "composition", "ao-ag2", "ao-en")],
        );

        let report = run(&AggregateOwnership, &model);
        assert_eq!(codes(&report), vec![IssueCode::AggregateMismatch]);
        assert_eq!(
            report.issues()[0].message(),
            "entity 'OrderLine' has aggregate property 'Order' but composition from 'Invoice'"
        );
    }

    #[test]
    fn test_dangling_composer_is_not_a_mismatch() {
        let model = model(
            vec![order(), node("ao-en", "entity", "OrderLine", &[("aggregate", "Order")])],
            vec![edge("ao-5", "composition", "ao-gone", "ao-en")],
        );

        assert!(run(&AggregateOwnership, &model).is_empty());
    }

    #[test]
    fn test_other_types_are_ignored() {
        let model = model(vec![order()], vec![]);

        assert!(run(&AggregateOwnership, &model).is_empty());
    }
}
