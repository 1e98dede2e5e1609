use clap::Parser;
use gherkin_report::cli::commands::{apply_expand, cmd_render, render_output};
use gherkin_report::cli::config::{
    AppConfig, Cli, Commands, ExpandMode, load_config, resolve_settings,
};
use gherkin_report::cli::logging::level_for_verbosity;
use gherkin_report::model::identity::StepId;
use gherkin_report::view::view_model::ReportView;

use crate::common::builders::sample_report;
use crate::common::fixture;

mod common;

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_render_minimal() {
    let cli = Cli::parse_from(["gherkin-report", "render", "--input", "run.json"]);
    match cli.command {
        Commands::Render {
            input,
            format,
            output,
            feature,
            expand,
        } => {
            assert_eq!(input, "run.json");
            assert!(format.is_none());
            assert!(output.is_none());
            assert!(feature.is_none());
            assert!(expand.is_none());
        }
        _ => panic!("Expected Render command"),
    }
}

#[test]
fn cli_parse_render_all_args() {
    let cli = Cli::parse_from([
        "gherkin-report",
        "render",
        "-i",
        "run.json",
        "--format",
        "html",
        "-o",
        "report.html",
        "--feature",
        "Login",
        "--expand",
        "failed",
    ]);
    match cli.command {
        Commands::Render {
            input,
            format,
            output,
            feature,
            expand,
        } => {
            assert_eq!(input, "run.json");
            assert_eq!(format.as_deref(), Some("html"));
            assert_eq!(output.as_deref(), Some("report.html"));
            assert_eq!(feature.as_deref(), Some("Login"));
            assert_eq!(expand.as_deref(), Some("failed"));
        }
        _ => panic!("Expected Render command"),
    }
}

#[test]
fn cli_parse_show() {
    let cli = Cli::parse_from([
        "gherkin-report",
        "show",
        "--input",
        "run.json",
        "--feature",
        "Login",
    ]);
    match cli.command {
        Commands::Show {
            input,
            feature,
            expand,
        } => {
            assert_eq!(input, "run.json");
            assert_eq!(feature, "Login");
            assert!(expand.is_none());
        }
        _ => panic!("Expected Show command"),
    }
}

#[test]
fn cli_show_requires_feature() {
    let result = Cli::try_parse_from(["gherkin-report", "show", "--input", "run.json"]);
    assert!(result.is_err());
}

#[test]
fn cli_parse_global_flags() {
    let cli = Cli::parse_from(["gherkin-report", "-vv", "render", "--input", "r.json"]);
    assert_eq!(cli.verbose, 2);

    let cli2 = Cli::parse_from([
        "gherkin-report",
        "render",
        "--input",
        "r.json",
        "--config",
        "custom.yaml",
    ]);
    assert_eq!(cli2.config.as_deref(), Some("custom.yaml"));
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_load_missing_file() {
    let config = load_config(Some("nonexistent_file_that_does_not_exist.yaml"));
    assert_eq!(config.render.format, "console");
    assert_eq!(config.render.expand, "none");
    assert_eq!(config.display.slow_step_secs, 5.0);
}

#[test]
fn config_partial_yaml() {
    let yaml = r#"
render:
  format: junit
display:
  slow_step_secs: 2.5
"#;
    let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.render.format, "junit");
    assert!(config.render.output.is_none());
    assert_eq!(config.render.expand, "none");
    assert_eq!(config.display.slow_step_secs, 2.5);
}

#[test]
fn config_malformed_file_falls_back_to_defaults() {
    let dir = std::env::temp_dir().join("gherkin_report_cli_config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad.yaml");
    std::fs::write(&path, "render: [this is: not a map").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.render.format, "console");

    std::fs::remove_file(&path).ok();
    std::fs::remove_dir(&dir).ok();
}

#[test]
fn settings_prefer_cli_over_config() {
    let mut config = AppConfig::default();
    config.render.format = "junit".to_string();
    config.render.output = Some("from-config.xml".to_string());
    config.render.expand = "all".to_string();
    config.display.slow_step_secs = 1.0;

    let from_config = resolve_settings(&config, None, None, None);
    assert_eq!(from_config.format, "junit");
    assert_eq!(from_config.output.as_deref(), Some("from-config.xml"));
    assert_eq!(from_config.expand, ExpandMode::All);
    assert_eq!(from_config.options.slow_step_secs, 1.0);

    let from_cli = resolve_settings(&config, Some("html"), Some("out.html"), Some("failed"));
    assert_eq!(from_cli.format, "html");
    assert_eq!(from_cli.output.as_deref(), Some("out.html"));
    assert_eq!(from_cli.expand, ExpandMode::Failed);
}

#[test]
fn expand_mode_parse() {
    assert_eq!(ExpandMode::parse("failed"), ExpandMode::Failed);
    assert_eq!(ExpandMode::parse("all"), ExpandMode::All);
    assert_eq!(ExpandMode::parse("none"), ExpandMode::None);
    assert_eq!(ExpandMode::parse("bogus"), ExpandMode::None);
}

#[test]
fn verbosity_levels() {
    assert_eq!(level_for_verbosity(0), "warn");
    assert_eq!(level_for_verbosity(1), "info");
    assert_eq!(level_for_verbosity(2), "debug");
    assert_eq!(level_for_verbosity(7), "trace");
}

// ============================================================================
// Command Tests
// ============================================================================

#[test]
fn apply_expand_failed_opens_failing_steps_only() {
    let report = sample_report();
    let mut view = ReportView::new(&report);
    assert_eq!(apply_expand(&mut view, ExpandMode::Failed), 1);
    assert!(view.is_step_expanded(StepId::new(0, 1, 2)));
    assert!(!view.is_step_expanded(StepId::new(0, 0, 1)));
}

#[test]
fn apply_expand_all_and_none() {
    let report = sample_report();
    let total = report.steps().count();

    let mut view = ReportView::new(&report);
    assert_eq!(apply_expand(&mut view, ExpandMode::None), 0);
    assert_eq!(apply_expand(&mut view, ExpandMode::All), total);
    assert_eq!(view.expanded_count(), total);
}

#[test]
fn render_output_dispatches_on_format() {
    let report = sample_report();
    let view = ReportView::new(&report);
    let config = AppConfig::default();

    let junit = render_output(&view, &resolve_settings(&config, Some("junit"), None, None));
    assert!(junit.starts_with("<?xml"));

    let html = render_output(&view, &resolve_settings(&config, Some("html"), None, None));
    assert!(html.starts_with("<!DOCTYPE html>"));

    let console = render_output(&view, &resolve_settings(&config, None, None, None));
    assert!(console.starts_with("=== Test Run ==="));
}

#[test]
fn cmd_render_writes_file_and_reports_failure() {
    let dir = std::env::temp_dir().join("gherkin_report_cli_render_test");
    std::fs::create_dir_all(&dir).unwrap();
    let out = dir.join("report.xml");

    let settings = resolve_settings(
        &AppConfig::default(),
        Some("junit"),
        out.to_str(),
        None,
    );
    let input = fixture("run.json");
    let all_passed = cmd_render(input.to_str().unwrap(), &settings, Some("Login")).unwrap();
    assert!(!all_passed);

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("<testsuite name=\"Login\""));

    std::fs::remove_file(&out).ok();
    std::fs::remove_dir(&dir).ok();
}

#[test]
fn cmd_render_rejects_malformed_input() {
    let settings = resolve_settings(&AppConfig::default(), None, None, None);
    let input = fixture("missing_status.json");
    let err = cmd_render(input.to_str().unwrap(), &settings, None).unwrap_err();
    assert!(err.to_string().contains("features[0].scenarios[1].status"));
}
