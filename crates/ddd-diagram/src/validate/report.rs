//! The validation report: an ordered, append-only list of issues.

use std::fmt;

use serde::Serialize;

use crate::validate::Issue;

/// Width of the rules framing a rendered report.
const RULE_WIDTH: usize = 60;

/// Issue counts of a [`ValidationReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub valid: bool,
}

/// Collects the issues found by the validation rules, in the order they
/// were found.
///
/// A report is valid when it holds no errors; warnings never affect validity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an issue.
    pub fn add_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// All issues in the order they were added.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Issues with error severity.
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    /// Issues with warning severity.
    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|issue| issue.is_warning())
    }

    /// Returns `true` if any issue is an error.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Returns `true` if any issue is a warning.
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Returns `true` if there are no errors.
    pub fn valid(&self) -> bool {
        !self.has_errors()
    }

    /// Total number of issues.
    pub fn count(&self) -> usize {
        self.issues.len()
    }

    /// Returns `true` if no issue was found.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issue counts and the validity verdict.
    pub fn summary(&self) -> Summary {
        let errors = self.errors().count();
        Summary {
            total: self.count(),
            errors,
            warnings: self.count() - errors,
            valid: errors == 0,
        }
    }
}

impl Extend<Issue> for ValidationReport {
    fn extend<I: IntoIterator<Item = Issue>>(&mut self, iter: I) {
        self.issues.extend(iter);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "✓ Validation passed: No issues found");
        }

        let rule = "=".repeat(RULE_WIDTH);
        let summary = self.summary();

        writeln!(f, "Validation Report:")?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "Errors: {}, Warnings: {}",
            summary.errors, summary.warnings
        )?;
        writeln!(f, "{rule}")?;
        for issue in &self.issues {
            writeln!(f, "{issue}")?;
        }
        writeln!(f, "{rule}")?;
        if summary.valid {
            write!(f, "✓ No errors (warnings present)")
        } else {
            write!(f, "✗ Validation failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use ddd_diagram_core::semantic::{Edge, Model, Node};

    use super::*;
    use crate::validate::IssueCode;

    fn sample() -> ValidationReport {
        let mut report = ValidationReport::new();
        report.add_issue(Issue::new(IssueCode::EventNotPublished, "lonely event"));
        report.add_issue(
            Issue::new(IssueCode::MissingDddName, "Node must have a ddd_name property")
                .with_node("r-7".into(), "entity"),
        );
        report
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = ValidationReport::new();

        assert!(report.valid());
        assert_eq!(report.to_string(), "✓ Validation passed: No issues found");
        assert_eq!(
            report.summary(),
            Summary {
                total: 0,
                errors: 0,
                warnings: 0,
                valid: true
            }
        );
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut report = ValidationReport::new();
        report.add_issue(Issue::new(IssueCode::CrossContextUses, "crosses"));

        assert!(report.valid());
        assert!(report.has_warnings());
        assert!(report.to_string().ends_with("✓ No errors (warnings present)"));
    }

    #[test]
    fn test_partition_keeps_order() {
        let report = sample();

        assert_eq!(report.count(), 2);
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.warnings().count(), 1);
        assert!(!report.valid());
        assert_eq!(report.issues()[0].code(), IssueCode::EventNotPublished);
    }

    #[test]
    fn test_rendering() {
        let rule = "=".repeat(60);
        let expected = format!(
            "Validation Report:\n{rule}\nErrors: 1, Warnings: 1\n{rule}\n\
             WARNING R13_EVENT_NOT_PUBLISHED: lonely event\n  Global\n\
             ERROR R1_MISSING_DDD_NAME: Node must have a ddd_name property\n  Node: entity (r-7)\n\
             {rule}\n✗ Validation failed"
        );

        assert_eq!(sample().to_string(), expected);
    }

    #[test]
    fn test_edge_issue_is_located_by_edge_id() {
        let mut model = Model::new("Test");
        model.add_node(Node::new("rp-a".into()).with_name("Order"));
        model.add_node(Node::new("rp-b".into()).with_name("Catalog"));
        let edge = Edge::new("rp-e".into(), "rp-a".into(), "rp-b".into());

        let mut report = ValidationReport::new();
        report.add_issue(
            Issue::new(IssueCode::MissingRelationType, "Edge must have a relation_type property")
                .for_edge(&edge, &model),
        );

        let rendered = report.to_string();
        assert!(
            rendered.contains(
                "ERROR R4_MISSING_RELATION_TYPE: Edge must have a relation_type property\n  \
                 Edge: Order -> Catalog (rp-e)\n"
            ),
            "{rendered}"
        );
    }
}
