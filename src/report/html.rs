use crate::model::identity::{StepId, feature_anchor, step_anchor};
use crate::model::report_model::{Feature, Run, Scenario, Status, Step};
use crate::report::options::RenderOptions;
use crate::status::aggregator::FeatureStatus;
use crate::view::view_model::ReportView;

// ============================================================================
// HTML reporter: single page, inline styles
// ============================================================================

/// Generate a self-contained HTML report.
///
/// Features:
/// - Green/red header based on whether any feature failed
/// - Summary cards: elapsed, CPU cores, start, end
/// - Feature table with roll-up status and scenario counts, linking to sections
/// - One section per feature; the selected feature's section starts open
/// - Scenario panels colored by status; step logs/errors in `<details>`,
///   open for steps expanded in the view
/// - Inline CSS (no external dependencies)
pub fn generate_html_report(view: &ReportView<'_>, options: &RenderOptions) -> String {
    let summary = view.run_summary();
    let (header_color, status_text) = if summary.all_passed() {
        ("#4CAF50", "ALL FEATURES PASSED")
    } else {
        ("#f44336", "SOME FEATURES FAILED")
    };

    let selected = view.selected_feature().map(|(i, _)| i);

    let mut rows = String::new();
    for feature in view.features() {
        let row = view.feature_row(feature);
        rows.push_str(&format!(
            "<tr class=\"{status}\"><td><a href=\"#{anchor}\">{name}</a></td><td>{marker} {status}</td><td>{ok}</td><td>{failed}</td><td>{skipped}</td></tr>\n",
            status = row.status.as_str(),
            anchor = feature_anchor(row.name),
            name = escape_html(row.name),
            marker = feature_marker(row.status),
            ok = row.success_count,
            failed = row.failed_count,
            skipped = row.skipped_count,
        ));
    }

    let mut sections = String::new();
    for (feature_index, feature) in view.features().iter().enumerate() {
        sections.push_str(&render_feature(
            view,
            options,
            feature_index,
            feature,
            selected == Some(feature_index),
        ));
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Test Run Report</title>
<style>
body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 0; padding: 0; background: #f5f5f5; color: #173A5E; }}
.header {{ background: {header_color}; color: white; padding: 20px 30px; }}
.header h1 {{ margin: 0 0 8px 0; font-size: 24px; }}
.header p {{ margin: 0; font-size: 16px; opacity: 0.9; }}
.content {{ max-width: 1100px; margin: 20px auto; padding: 0 20px; }}
.cards {{ display: flex; flex-wrap: wrap; gap: 12px; margin-bottom: 20px; }}
.card {{ background: white; border-radius: 6px; padding: 16px; min-width: 200px; box-shadow: 0 1px 3px rgba(0,0,0,.15); }}
.card .label {{ color: #46505A; font-size: 14px; }}
.card .value {{ font-size: 20px; font-weight: 500; }}
table.features {{ width: 100%; border-collapse: collapse; background: white; margin-bottom: 20px; }}
table.features th, table.features td {{ text-align: left; padding: 8px 12px; border-bottom: 1px solid #eee; }}
tr.failed td:nth-child(2) {{ color: #c62828; }}
tr.success td:nth-child(2) {{ color: #2e7d32; }}
tr.skipped td:nth-child(2), tr.incomplete td:nth-child(2) {{ color: #ef6c00; }}
details.feature {{ background: white; border-radius: 6px; padding: 12px 16px; margin-bottom: 12px; }}
details.feature > summary {{ font-size: 18px; cursor: pointer; }}
.scenario {{ margin-top: 10px; border-radius: 4px; overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,.2); }}
.scenario > summary {{ color: white; padding: 8px 12px; cursor: pointer; }}
.scenario.success > summary {{ background: #43a047; }}
.scenario.failed > summary {{ background: #d32f2f; }}
.scenario.skipped > summary, .scenario.undefined > summary {{ background: #f57c00; }}
.scenario .body {{ padding: 8px 12px; background: white; }}
.tag {{ display: inline-block; background: #1976d2; color: white; border-radius: 12px; padding: 2px 10px; margin: 4px 4px 8px 0; font-size: 13px; }}
.description {{ white-space: pre-wrap; color: #46505A; }}
.step {{ display: flex; gap: 8px; padding: 2px 0; }}
.step .duration {{ margin-left: auto; color: #46505A; }}
.step .duration.slow {{ font-weight: bold; color: #173A5E; }}
.step-success {{ color: #4caf50; }}
.step-failed {{ color: #f44336; }}
.step-skipped {{ color: #ff9800; }}
.step-undefined {{ color: #2196f3; }}
details.step-detail {{ margin-left: 20px; }}
.step-error {{ white-space: pre-wrap; color: #f44336; background: #f1f1f1; }}
.step-log {{ width: 100%; height: 390px; overflow: auto; resize: none; }}
</style>
</head>
<body>
<div class="header">
<h1>{status_text}</h1>
<p>{features_total} features: {ok} success, {failed} failed, {skipped} skipped, {incomplete} incomplete &middot; {scenarios} scenarios</p>
</div>
<div class="content">
{cards}
<table class="features">
<thead><tr><th>Feature</th><th>Status</th><th>Passed</th><th>Failed</th><th>Skipped</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
{sections}
</div>
</body>
</html>"##,
        header_color = header_color,
        status_text = status_text,
        features_total = summary.features_total,
        ok = summary.features_success,
        failed = summary.features_failed,
        skipped = summary.features_skipped,
        incomplete = summary.features_incomplete,
        scenarios = summary.scenarios_total,
        cards = render_cards(view.run()),
        rows = rows,
        sections = sections,
    )
}

fn render_cards(run: Option<&Run>) -> String {
    let Some(run) = run else {
        return "<div class=\"cards\"><div class=\"card\"><div class=\"label\">Run metadata</div><div class=\"value\">not available</div></div></div>".to_string();
    };

    let cards = [
        ("Elapsed", format!("{:.2} (s)", run.elapsed_seconds)),
        ("CPU Cores", run.cpu_count.to_string()),
        ("Start", escape_html(&run.start_timestamp)),
        ("End", escape_html(&run.end_timestamp)),
    ];

    let mut out = String::from("<div class=\"cards\">");
    for (label, value) in cards {
        out.push_str(&format!(
            "<div class=\"card\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
            label, value
        ));
    }
    out.push_str("</div>");
    out
}

fn render_feature(
    view: &ReportView<'_>,
    options: &RenderOptions,
    feature_index: usize,
    feature: &Feature,
    open: bool,
) -> String {
    let status = feature.summary().status;
    let mut out = format!(
        "<details class=\"feature {status}\" id=\"{anchor}\"{open}>\n<summary>{marker} Feature: {name}</summary>\n",
        status = status.as_str(),
        anchor = feature_anchor(&feature.name),
        open = if open { " open" } else { "" },
        marker = feature_marker(status),
        name = escape_html(&feature.name),
    );

    if let Some(ref description) = feature.description {
        out.push_str(&format!(
            "<p class=\"description\">{}</p>\n",
            escape_html(description)
        ));
    }

    for (scenario_index, scenario) in feature.scenarios.iter().enumerate() {
        out.push_str(&render_scenario(
            view,
            options,
            feature_index,
            scenario_index,
            scenario,
        ));
    }

    out.push_str("</details>\n");
    out
}

fn render_scenario(
    view: &ReportView<'_>,
    options: &RenderOptions,
    feature_index: usize,
    scenario_index: usize,
    scenario: &Scenario,
) -> String {
    let mut out = format!(
        "<details class=\"scenario {status}\">\n<summary>Scenario: {name}</summary>\n<div class=\"body\">\n<p>Elapsed: {elapsed:.2} (s)</p>\n",
        status = scenario.status.as_str(),
        name = escape_html(&scenario.name),
        elapsed = scenario.elapsed_seconds,
    );

    for tag in &scenario.tags {
        out.push_str(&format!("<span class=\"tag\">{}</span>", escape_html(&tag.name)));
    }
    if !scenario.tags.is_empty() {
        out.push('\n');
    }

    if let Some(ref description) = scenario.description {
        out.push_str(&format!(
            "<p class=\"description\">{}</p>\n",
            escape_html(description)
        ));
    }
    if let Some(ref error) = scenario.error_text {
        out.push_str(&format!(
            "<pre class=\"step-error\">{}</pre>\n",
            escape_html(error)
        ));
    }

    for (step_index, step) in scenario.steps.iter().enumerate() {
        let id = StepId::new(feature_index, scenario_index, step_index);
        out.push_str(&render_step(id, step, view.is_step_expanded(id), options));
    }

    out.push_str("</div>\n</details>\n");
    out
}

fn render_step(id: StepId, step: &Step, expanded: bool, options: &RenderOptions) -> String {
    let slow = options.is_slow(step.elapsed_seconds);
    let mut out = format!(
        "<div class=\"step\" id=\"{anchor}\"><span class=\"step-{status}\" title=\"{title}\">{marker}</span><span><b>{keyword}</b> {text}</span><span class=\"duration{slow}\" title=\"duration in seconds\">{elapsed:.3} (s)</span></div>\n",
        anchor = step_anchor(id),
        status = step.status.as_str(),
        title = step_title(step.status),
        marker = step_marker(step.status),
        keyword = escape_html(&step.keyword),
        text = escape_html(&step.text),
        slow = if slow { " slow" } else { "" },
        elapsed = step.elapsed_seconds,
    );

    if step.has_detail() {
        out.push_str(&format!(
            "<details class=\"step-detail\"{}>\n<summary>logs</summary>\n",
            if expanded { " open" } else { "" }
        ));
        if let Some(ref error) = step.error_text {
            out.push_str(&format!(
                "<pre><code class=\"step-error\">{}</code></pre>\n",
                escape_html(error)
            ));
        }
        if let Some(ref log) = step.log_text {
            out.push_str(&format!(
                "<textarea class=\"step-log\" aria-label=\"log message\" readonly>{}</textarea>\n",
                escape_html(log)
            ));
        }
        out.push_str("</details>\n");
    }

    out
}

fn feature_marker(status: FeatureStatus) -> &'static str {
    match status {
        FeatureStatus::Success => "\u{2713}",
        _ => "\u{2717}",
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

fn step_title(status: Status) -> &'static str {
    match status {
        Status::Success => "passed",
        Status::Failed => "failed",
        Status::Skipped => "skipped",
        Status::Undefined => "undefined",
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
