//! The validation engine.

use log::{debug, info};

use ddd_diagram_core::semantic::Model;

use crate::validate::{Rule, RuleId, ValidationReport, rules};

/// Runs a fixed, ordered list of rules over a model.
///
/// Every rule sees the same model and appends to one shared report, so the
/// issue order is the catalogue order of the rules and, within a rule, the
/// order of the nodes and edges it walks. Running twice on the same model
/// produces the same report.
pub struct Validator {
    rules: Vec<Box<dyn Rule>>,
}

impl Validator {
    /// Create a validator running every rule.
    pub fn new() -> Self {
        Self { rules: rules::all() }
    }

    /// Drop the rules listed in `skip`.
    pub fn without(mut self, skip: &[RuleId]) -> Self {
        self.rules.retain(|rule| !skip.contains(&rule.id()));
        self
    }

    /// Ids of the rules that will run, in order.
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|rule| rule.id()).collect()
    }

    /// Validate `model` and return the collected issues.
    pub fn validate(&self, model: &Model) -> ValidationReport {
        info!(
            diagram = model.diagram_name(),
            rules = self.rules.len();
            "Validating model"
        );

        let mut report = ValidationReport::new();
        for rule in &self.rules {
            let before = report.count();
            rule.validate(model, &mut report);
            debug!(rule:% = rule.id(), issues = report.count() - before; "Rule finished");
        }

        let summary = report.summary();
        info!(
            errors = summary.errors,
            warnings = summary.warnings,
            valid = summary.valid;
            "Validation finished"
        );

        report
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
