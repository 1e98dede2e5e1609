use gherkin_report::error::ReportError;
use gherkin_report::ingest::loader::{load_report, parse_report};
use gherkin_report::model::report_model::Status;
use gherkin_report::status::aggregator::FeatureStatus;

use crate::common::fixture;

mod common;

fn malformed_path(err: ReportError) -> String {
    match err {
        ReportError::MalformedInput { path, .. } => path,
        other => panic!("Expected MalformedInput, got {:?}", other),
    }
}

// ============================================================================
// Valid documents
// ============================================================================

#[test]
fn loads_full_document() {
    let report = load_report(&fixture("run.json")).unwrap();

    let run = report.run().expect("run metadata");
    assert_eq!(run.cpu_count, 8);
    assert_eq!(run.start_timestamp, "2024-05-01 10:00:00");
    assert_eq!(run.end_timestamp, "2024-05-01 10:00:12");
    assert!((run.elapsed_seconds - 12.3456).abs() < 1e-9);
    assert_eq!(run.success, Some(false));
    assert_eq!(run.pid, Some(4242));

    let names: Vec<&str> = report.features().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Login", "Search", "Payments", "Profile"]);
}

#[test]
fn preserves_scenario_and_step_order() {
    let report = load_report(&fixture("run.json")).unwrap();
    let login = report.feature("Login").unwrap();

    let scenario_names: Vec<&str> = login.scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(scenario_names, ["Valid password", "Wrong password"]);

    let texts: Vec<&str> = login.scenarios[1]
        .steps
        .iter()
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(
        texts,
        ["I am on the login page", "I enter a wrong password", "I see an error"]
    );
}

#[test]
fn step_fields_are_typed() {
    let report = load_report(&fixture("run.json")).unwrap();
    let step = &report.feature("Login").unwrap().scenarios[1].steps[2];
    assert_eq!(step.keyword, "Then");
    assert_eq!(step.status, Status::Failed);
    assert!((step.elapsed_seconds - 6.25).abs() < 1e-9);
    assert!(step.error_text.as_deref().unwrap().contains("AssertionError"));
    assert_eq!(step.log_text.as_deref(), Some("GET /login 200"));
}

#[test]
fn blank_description_becomes_none() {
    let report = load_report(&fixture("run.json")).unwrap();
    let scenario = &report.feature("Login").unwrap().scenarios[0];
    assert!(scenario.description.is_none());
}

#[test]
fn duplicate_tags_collapse() {
    let report = load_report(&fixture("run.json")).unwrap();
    let tags: Vec<&str> = report.feature("Login").unwrap().scenarios[0]
        .tags
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(tags, ["@smoke", "@auth"]);
}

#[test]
fn producer_feature_status_is_ignored() {
    // "Payments" claims success but every scenario was skipped
    let report = load_report(&fixture("run.json")).unwrap();
    let payments = report.feature("Payments").unwrap();
    assert_eq!(payments.summary().status, FeatureStatus::Skipped);
}

#[test]
fn features_only_document_has_no_run() {
    let report = load_report(&fixture("features_only.json")).unwrap();
    assert!(report.run().is_none());
    assert_eq!(report.features().len(), 1);
    assert_eq!(report.features()[0].summary().status, FeatureStatus::Success);
}

#[test]
fn object_without_test_result_has_no_run() {
    let report = parse_report(r#"{ "features": [] }"#).unwrap();
    assert!(report.run().is_none());
    assert!(report.is_empty());
}

// ============================================================================
// Malformed documents
// ============================================================================

#[test]
fn missing_scenario_status_is_rejected() {
    let err = load_report(&fixture("missing_status.json")).unwrap_err();
    assert_eq!(malformed_path(err), "features[0].scenarios[1].status");
}

#[test]
fn partial_run_metadata_is_rejected() {
    let err = load_report(&fixture("partial_run.json")).unwrap_err();
    assert_eq!(malformed_path(err), "testResult.numCpu");
}

#[test]
fn unknown_status_is_rejected() {
    let json = r#"[{ "name": "A", "scenarios": [
        { "detail": { "name": "x" }, "status": "passed", "elapsed": 1 } ] }]"#;
    let err = parse_report(json).unwrap_err();
    assert_eq!(malformed_path(err), "features[0].scenarios[0].status");
}

#[test]
fn missing_step_status_is_rejected() {
    let json = r#"[{ "name": "A", "scenarios": [
        { "detail": { "name": "x", "steps": [
            { "keyword": "Given", "text": "t", "status": "success", "elapsed": 0 },
            { "keyword": "When", "text": "t", "elapsed": 0 } ] },
          "status": "success", "elapsed": 1 } ] }]"#;
    let err = parse_report(json).unwrap_err();
    assert_eq!(
        malformed_path(err),
        "features[0].scenarios[0].detail.steps[1].status"
    );
}

#[test]
fn duplicate_feature_names_are_rejected() {
    let json = r#"[
        { "name": "A", "scenarios": [] },
        { "name": "A", "scenarios": [] }
    ]"#;
    let err = parse_report(json).unwrap_err();
    assert_eq!(malformed_path(err), "features[1].name");
}

#[test]
fn missing_features_key_is_rejected() {
    let err = parse_report(r#"{ "testResult": null }"#).unwrap_err();
    assert_eq!(malformed_path(err), "features");
}

#[test]
fn scalar_document_is_rejected() {
    let err = parse_report("42").unwrap_err();
    assert_eq!(malformed_path(err), "$");
}

#[test]
fn wrong_field_type_is_malformed() {
    let json = r#"[{ "name": "A", "scenarios": [
        { "detail": { "name": "x" }, "status": "success", "elapsed": "fast" } ] }]"#;
    let err = parse_report(json).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn invalid_json_is_a_decode_error() {
    let err = parse_report("{ not json").unwrap_err();
    assert!(matches!(err, ReportError::Json { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_report(&fixture("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
}
