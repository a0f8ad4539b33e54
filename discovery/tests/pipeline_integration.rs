//! Integration tests running the discovery pipeline over fixture reports.

use std::path::{Path, PathBuf};

use report_api_core::{Method, OutputType, ValueType};
use report_api_discovery::generate::{GenerateOptions, build_configuration, generate};
use report_api_discovery::output::load_configuration;
use report_api_discovery::walker::ReportWalker;
use report_api_discovery::xml::XmlReportEngine;
use serde_json::json;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn sorted_paths(source: &Path, options: &GenerateOptions) -> Vec<String> {
    let outcome = build_configuration(&XmlReportEngine::new(), source, options).unwrap();
    let mut paths: Vec<String> = outcome
        .configuration
        .reports
        .into_iter()
        .map(|r| r.path)
        .collect();
    paths.sort();
    paths
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[test]
fn test_fixture_tree_skips_broken_and_non_report_files() {
    let outcome = build_configuration(
        &XmlReportEngine::new(),
        &fixture("reports"),
        &GenerateOptions::default(),
    )
    .unwrap();

    assert_eq!(outcome.configuration.reports.len(), 3);
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].path.ends_with("broken.rdef"));
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_depth_bound_limits_discovery() {
    let reports = fixture("reports");

    let top = GenerateOptions {
        max_depth: Some(1),
        ..GenerateOptions::default()
    };
    assert_eq!(sorted_paths(&reports, &top), vec!["/sales_report"]);

    let two = GenerateOptions {
        max_depth: Some(2),
        ..GenerateOptions::default()
    };
    assert_eq!(
        sorted_paths(&reports, &two),
        vec!["/general_ledger", "/sales_report"]
    );

    assert_eq!(
        sorted_paths(&reports, &GenerateOptions::default()),
        vec!["/general_ledger", "/legacy_balance", "/sales_report"]
    );
}

#[test]
fn test_walker_restarts_with_same_results() {
    let engine = XmlReportEngine::new();
    let walker = ReportWalker::new(&engine, fixture("reports")).unwrap();

    let first: Vec<String> = walker.walk().map(|r| r.report_name).collect();
    let second: Vec<String> = walker.walk().map(|r| r.report_name).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

// ---------------------------------------------------------------------------
// Parameter mapping
// ---------------------------------------------------------------------------

#[test]
fn test_sales_parameters_tolerate_failed_defaults() {
    let outcome = build_configuration(
        &XmlReportEngine::new(),
        &fixture("reports"),
        &GenerateOptions::default(),
    )
    .unwrap();
    let sales = outcome.configuration.find_route("/sales_report").unwrap();

    assert_eq!(sales.report_name, "Sales Report");
    assert_eq!(sales.description, "Monthly sales by region");
    assert_eq!(sales.version, "1.2");
    assert!(sales.report_file_path.ends_with("sales.rdef"));

    let names: Vec<&str> = sales.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["from", "until", "region", "customer", "include_returns"]
    );

    let from = &sales.parameters[0];
    assert!(from.required);
    assert_eq!(from.value_type, ValueType::Date);
    assert_eq!(from.default_value, Some(json!("2024-01-01")));

    assert!(sales.parameters[1].default_value.is_some());
    assert_eq!(
        sales.parameters[2].default_value,
        Some(json!(["North", "South"]))
    );

    // Needs a database connection: default absent, rest intact.
    let customer = &sales.parameters[3];
    assert!(customer.required);
    assert_eq!(customer.value_type, ValueType::String);
    assert_eq!(customer.default_value, None);

    assert_eq!(sales.parameters[4].default_value, Some(json!(false)));
}

#[test]
fn test_invalid_literal_default_keeps_report() {
    let outcome = build_configuration(
        &XmlReportEngine::new(),
        &fixture("reports"),
        &GenerateOptions::default(),
    )
    .unwrap();
    let legacy = outcome.configuration.find_route("/legacy_balance").unwrap();

    assert_eq!(legacy.version, "");
    assert_eq!(legacy.parameters.len(), 1);
    assert_eq!(legacy.parameters[0].value_type, ValueType::Number);
    assert_eq!(legacy.parameters[0].default_value, None);
}

// ---------------------------------------------------------------------------
// Synthesis and output
// ---------------------------------------------------------------------------

#[test]
fn test_routes_offer_all_methods_and_renderable_formats() {
    let outcome = build_configuration(
        &XmlReportEngine::new(),
        &fixture("reports"),
        &GenerateOptions::default(),
    )
    .unwrap();

    let expected: Vec<OutputType> = OutputType::renderable().collect();
    for route in &outcome.configuration.reports {
        assert_eq!(route.methods, Method::ALL.to_vec());
        assert_eq!(route.extensions, expected);
    }
}

#[test]
fn test_generate_roundtrips_through_yaml_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let engine = XmlReportEngine::new();

    for file in ["api.yml", "api.json"] {
        let destination = dir.path().join(file);
        let outcome = generate(
            &engine,
            &fixture("reports"),
            &destination,
            &GenerateOptions::default(),
        )
        .unwrap();

        let loaded = load_configuration(&destination).unwrap();
        assert_eq!(loaded, outcome.configuration, "roundtrip mismatch for {file}");
    }
}

#[test]
fn test_custom_extension_finds_nothing_in_fixture_tree() {
    let outcome = build_configuration(
        &XmlReportEngine::with_extension("prpt"),
        &fixture("reports"),
        &GenerateOptions::default(),
    )
    .unwrap();

    assert!(outcome.configuration.reports.is_empty());
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.configuration.port, 4567);
}
