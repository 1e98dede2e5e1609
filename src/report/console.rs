use crate::model::identity::StepId;
use crate::model::report_model::{Run, Scenario, Status, Step};
use crate::report::options::RenderOptions;
use crate::status::aggregator::FeatureStatus;
use crate::view::view_model::{FeatureRow, ReportView};

// ============================================================================
// Console reporter: run summary and feature drill-down
// ============================================================================

/// Format the run summary, the feature listing and, when a feature is
/// selected, its scenario/step tree.
///
/// Produces output like:
/// ```text
/// === Test Run ===
/// Elapsed: 12.35 (s) | CPU Cores: 8 | Start: 2024-05-01 10:00:00 | End: 2024-05-01 10:00:12
///
/// ✗ FAILED      Login  (1 passed, 1 failed, 0 skipped)
/// ✓ SUCCESS     Search (3 passed, 0 failed, 0 skipped)
///
/// === Features: 1 success, 1 failed, 0 skipped, 0 incomplete (2 total) ===
/// ```
///
/// A step's error and log are printed only when the step is expanded in the
/// view; collapsed steps that have detail show `[+]`.
pub fn format_console_report(view: &ReportView<'_>, options: &RenderOptions) -> String {
    let mut out = String::new();

    out.push_str("=== Test Run ===\n");
    out.push_str(&format_run_line(view.run()));
    out.push('\n');

    let rows = view.feature_rows();
    let name_width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    for row in &rows {
        out.push_str(&format_feature_row(row, name_width));
    }

    let summary = view.run_summary();
    out.push_str(&format!(
        "\n=== Features: {} success, {} failed, {} skipped, {} incomplete ({} total) ===\n",
        summary.features_success,
        summary.features_failed,
        summary.features_skipped,
        summary.features_incomplete,
        summary.features_total
    ));

    if let Some((feature_index, feature)) = view.selected_feature() {
        out.push_str(&format!("\n--- Feature: {} ---\n", feature.name));
        if let Some(ref description) = feature.description {
            out.push_str(&indent(description, 2));
        }
        for (scenario_index, scenario) in view.visible_scenarios().iter().enumerate() {
            out.push_str(&format_scenario(
                view,
                options,
                feature_index,
                scenario_index,
                scenario,
            ));
        }
    }

    out
}

fn format_run_line(run: Option<&Run>) -> String {
    match run {
        Some(run) => format!(
            "Elapsed: {:.2} (s) | CPU Cores: {} | Start: {} | End: {}\n",
            run.elapsed_seconds, run.cpu_count, run.start_timestamp, run.end_timestamp
        ),
        None => "Run metadata: not available\n".to_string(),
    }
}

fn format_feature_row(row: &FeatureRow<'_>, name_width: usize) -> String {
    format!(
        "{:<12}  {:<width$}  ({} passed, {} failed, {} skipped)\n",
        feature_marker(row.status),
        row.name,
        row.success_count,
        row.failed_count,
        row.skipped_count,
        width = name_width
    )
}

fn format_scenario(
    view: &ReportView<'_>,
    options: &RenderOptions,
    feature_index: usize,
    scenario_index: usize,
    scenario: &Scenario,
) -> String {
    let mut out = format!(
        "\n  [{}] Scenario: {} ({:.2} s)\n",
        scenario.status.as_str().to_uppercase(),
        scenario.name,
        scenario.elapsed_seconds
    );

    if !scenario.tags.is_empty() {
        let names: Vec<&str> = scenario.tags.iter().map(|t| t.name.as_str()).collect();
        out.push_str(&format!("    Tags: {}\n", names.join(", ")));
    }
    if let Some(ref description) = scenario.description {
        out.push_str(&indent(description, 4));
    }
    if let Some(ref error) = scenario.error_text {
        out.push_str(&format!("    [ERROR] {}\n", error.trim_end()));
    }

    for (step_index, step) in scenario.steps.iter().enumerate() {
        let id = StepId::new(feature_index, scenario_index, step_index);
        out.push_str(&format_step(step, view.is_step_expanded(id), options));
    }

    out
}

fn format_step(step: &Step, expanded: bool, options: &RenderOptions) -> String {
    let toggle = match (step.has_detail(), expanded) {
        (false, _) => "   ",
        (true, false) => "[+]",
        (true, true) => "[-]",
    };
    let slow = if options.is_slow(step.elapsed_seconds) {
        " [slow]"
    } else {
        ""
    };

    let mut out = format!(
        "    {} {} {} {}  {:.3} (s){}\n",
        toggle,
        step_marker(step.status),
        step.keyword,
        step.text,
        step.elapsed_seconds,
        slow
    );

    if expanded {
        if let Some(ref error) = step.error_text {
            out.push_str("        [ERROR]\n");
            out.push_str(&indent(error, 10));
        }
        if let Some(ref log) = step.log_text {
            out.push_str("        [LOG]\n");
            out.push_str(&indent(log, 10));
        }
    }

    out
}

fn feature_marker(status: FeatureStatus) -> &'static str {
    match status {
        FeatureStatus::Success => "\u{2713} SUCCESS",
        FeatureStatus::Failed => "\u{2717} FAILED",
        FeatureStatus::Skipped => "! SKIPPED",
        FeatureStatus::Incomplete => "~ INCOMPLETE",
    }
}

fn step_marker(status: Status) -> &'static str {
    match status {
        Status::Success => "\u{2713}",
        Status::Failed => "\u{2717}",
        Status::Skipped => "!",
        Status::Undefined => "?",
    }
}

fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| format!("{}{}\n", pad, line))
        .collect()
}
