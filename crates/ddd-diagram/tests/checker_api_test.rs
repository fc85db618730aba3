//! Integration tests for the DiagramChecker API

use std::{fs, path::PathBuf};

use ddd_diagram::{
    DiagramChecker, DiagramError,
    config::AppConfig,
    validate::{IssueCode, Severity},
};

const SALES: &str = r#"<mxfile host="app.diagrams.net">
  <diagram id="p1" name="Sales">
    <mxGraphModel>
      <root>
        <mxCell id="0"/>
        <mxCell id="1" parent="0"/>
        <object id="bc" label="Sales" type="bounded_context" name="Sales" context_key="sales">
          <mxCell style="swimlane" vertex="1" parent="1"/>
        </object>
        <object id="order" label="Order" ddd_type="aggregate_root" ddd_name="Order" bounded_context="Sales" id_type="uuid">
          <mxCell style="rounded=1" vertex="1" parent="bc"/>
        </object>
        <object id="place" label="Place Order" ddd_type="application_service" ddd_name="PlaceOrder" bounded_context="Sales" exposed_as="rest">
          <mxCell style="rounded=0" vertex="1" parent="bc"/>
        </object>
        <object id="uses" label="" relation_type="uses">
          <mxCell edge="1" source="place" target="order" parent="1"/>
        </object>
      </root>
    </mxGraphModel>
  </diagram>
  <diagram id="p2" name="Catalog">
    <mxGraphModel>
      <root>
        <mxCell id="0"/>
        <mxCell id="1" parent="0"/>
        <object id="c-bc" ddd_type="bounded_context" ddd_name="Catalog" context_key="catalog">
          <mxCell style="swimlane" vertex="1" parent="1"/>
        </object>
        <object id="c-sales" ddd_type="bounded_context" ddd_name="Sales" context_key="sales">
          <mxCell style="swimlane" vertex="1" parent="1"/>
        </object>
        <object id="c-order" ddd_type="aggregate_root" ddd_name="Order" bounded_context="Sales" id_type="uuid">
          <mxCell vertex="1" parent="c-sales"/>
        </object>
        <object id="c-product" ddd_type="entity" ddd_name="Product" aggregate="Order" id_type="uuid" bounded_context="Catalog">
          <mxCell vertex="1" parent="c-bc"/>
        </object>
        <object id="c-owns" relation_type="composition">
          <mxCell edge="1" source="c-order" target="c-product" parent="1"/>
        </object>
      </root>
    </mxGraphModel>
  </diagram>
</mxfile>"#;

fn write_fixture(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("sales.drawio");
    fs::write(&path, SALES).expect("Failed to write fixture");
    path
}

#[test]
fn test_clean_diagram_has_no_issues() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = write_fixture(&dir);

    let checker = DiagramChecker::default();
    let (model, report) = checker.check(&path, 0).expect("Failed to check diagram");

    assert_eq!(model.diagram_name(), "Sales");
    assert_eq!(model.node_count(), 3);
    assert_eq!(model.edge_count(), 1);
    assert!(report.is_empty(), "{report}");
    assert_eq!(report.to_string(), "✓ Validation passed: No issues found");
}

#[test]
fn test_cross_context_composition() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = write_fixture(&dir);

    let (_, report) = DiagramChecker::default()
        .check(&path, 1)
        .expect("Failed to check diagram");

    let codes: Vec<IssueCode> = report.issues().iter().map(|issue| issue.code()).collect();
    assert_eq!(codes, vec![IssueCode::CrossContextComposition]);

    let issue = &report.issues()[0];
    assert_eq!(issue.severity(), Severity::Error);
    assert!(issue.message().contains("Sales → Catalog"), "{}", issue.message());
    assert!(!report.valid());
}

#[test]
fn test_load_all_pages() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = write_fixture(&dir);

    let checker = DiagramChecker::default();
    let models = checker.load_all(&path).expect("Failed to load diagrams");
    let names: Vec<&str> = models.iter().map(|model| model.diagram_name()).collect();

    assert_eq!(names, vec!["Sales", "Catalog"]);
}

#[test]
fn test_config_from_toml_skips_rules() {
    let config: AppConfig = toml::from_str(
        r#"
        [validation]
        skip = ["R14"]
        "#,
    )
    .expect("Failed to parse config");

    let checker = DiagramChecker::new(config).expect("Failed to build checker");
    let model = checker.parse(SALES, 1).expect("Failed to parse");

    assert!(checker.validate(&model).is_empty());
}

#[test]
fn test_report_serializes_to_json() {
    let checker = DiagramChecker::default();
    let model = checker.parse(SALES, 1).expect("Failed to parse");
    let report = checker.validate(&model);

    let json = serde_json::to_value(&report).expect("Failed to serialize report");
    let issue = &json[0];
    assert_eq!(issue["code"], "R14_CROSS_CONTEXT_COMPOSITION");
    assert_eq!(issue["severity"], "error");
    assert_eq!(issue["edge_id"], "c-owns");
    assert_eq!(issue["node_name"], "Order -> Product");
    assert!(issue.get("node_id").is_none());

    let summary = serde_json::to_value(report.summary()).expect("Failed to serialize summary");
    assert_eq!(summary["errors"], 1);
    assert_eq!(summary["valid"], false);

    let stats = serde_json::to_value(model.stats()).expect("Failed to serialize stats");
    assert_eq!(stats["nodes_by_type"]["bounded_context"], 2);
}

#[test]
fn test_missing_file_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let err = DiagramChecker::default()
        .check(dir.path().join("nope.drawio"), 0)
        .unwrap_err();
    assert!(matches!(err, DiagramError::Parse(_)));
}
