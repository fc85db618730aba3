//! Report rendering for the CLI.
//!
//! Text output lists each checked page's report, optionally preceded by the
//! parsed model. JSON output is one array with an entry per checked page.

use serde::Serialize;

use ddd_diagram::{
    semantic::{Edge, Model, ModelStats, Node},
    validate::{RuleId, Summary, ValidationReport},
};

/// A page together with its validation report.
pub struct Checked {
    pub model: Model,
    pub report: ValidationReport,
}

/// JSON shape of one checked page.
#[derive(Serialize)]
struct PageResult<'a> {
    diagram: &'a str,
    stats: ModelStats,
    summary: Summary,
    issues: &'a ValidationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<Vec<&'a Node>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edges: Option<Vec<&'a Edge>>,
}

impl<'a> PageResult<'a> {
    fn new(checked: &'a Checked, show_model: bool) -> Self {
        let model = &checked.model;
        Self {
            diagram: model.diagram_name(),
            stats: model.stats(),
            summary: checked.report.summary(),
            issues: &checked.report,
            nodes: show_model.then(|| model.nodes().collect()),
            edges: show_model.then(|| model.edges().collect()),
        }
    }
}

/// The model listing.
///
/// Each node is followed by its label and its properties sorted by key; each
/// edge by its endpoint names and its label when it has one.
fn model_listing(model: &Model) -> String {
    let mut out = format!("Nodes ({}):\n", model.node_count());
    for node in model.nodes() {
        out.push_str(&format!("  {node}\n    Label: {}\n", node.raw_label()));

        let mut properties: Vec<_> = node.properties().iter().collect();
        if properties.is_empty() {
            continue;
        }
        properties.sort_by_key(|(key, _)| *key);
        out.push_str("    Properties:\n");
        for (key, value) in properties {
            out.push_str(&format!("      {key}: {value}\n"));
        }
    }

    out.push_str(&format!("Edges ({}):\n", model.edge_count()));
    for edge in model.edges() {
        out.push_str(&format!(
            "  {edge}\n    {} -> {}\n",
            model.endpoint_name(edge.source_id()),
            model.endpoint_name(edge.target_id())
        ));
        if !edge.raw_label().is_empty() {
            out.push_str(&format!("    Label: {}\n", edge.raw_label()));
        }
    }
    out
}

/// The rule catalogue, one rule per line; rules missing from `active` are
/// marked as skipped.
pub fn rule_listing(active: &[RuleId]) -> String {
    RuleId::ALL
        .iter()
        .map(|rule| {
            let skipped = if active.contains(rule) { "" } else { " (skipped)" };
            format!("{:<4} {}{skipped}\n", rule.as_str(), rule.description())
        })
        .collect()
}

/// Render the human readable output.
///
/// Page headers are only written when more than one page was checked or the
/// model listing is requested.
pub fn text(pages: &[Checked], show_model: bool) -> String {
    let with_headers = show_model || pages.len() > 1;

    let sections: Vec<String> = pages
        .iter()
        .map(|page| {
            let mut section = String::new();
            if with_headers {
                section.push_str(&format!("Diagram: {}\n", page.model.diagram_name()));
            }
            if show_model {
                section.push_str(&model_listing(&page.model));
                section.push('\n');
            }
            section.push_str(&format!("{}\n", page.report));
            section
        })
        .collect();

    sections.join("\n")
}

/// Render the JSON output.
///
/// # Errors
///
/// Returns the serializer error; the rendered types only hold strings,
/// numbers and booleans.
pub fn json(pages: &[Checked], show_model: bool) -> Result<String, serde_json::Error> {
    let results: Vec<PageResult<'_>> = pages
        .iter()
        .map(|page| PageResult::new(page, show_model))
        .collect();

    let mut out = serde_json::to_string_pretty(&results)?;
    out.push('\n');
    Ok(out)
}
