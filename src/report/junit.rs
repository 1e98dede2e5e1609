use chrono::{DateTime, NaiveDateTime};

use crate::model::report_model::{Feature, Scenario, Status};
use crate::view::view_model::ReportView;

// ============================================================================
// JUnit XML reporter: one suite per feature
// ============================================================================

/// Generate a JUnit XML report for CI systems (Jenkins, GitHub Actions, GitLab CI).
///
/// One `<testsuite>` per feature, one `<testcase>` per scenario:
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuites time="12.5" failures="1">
///   <testsuite name="Login" time="3.2" tests="2" skipped="0" failures="1" timestamp="2024-05-01T10:00:00">
///     <testcase name="Valid password" time="1.1">
///       <system-out/>
///     </testcase>
///     <testcase name="Wrong password" time="2.1">
///       <failure>expected 200, got 401</failure>
///       <system-out>…</system-out>
///     </testcase>
///   </testsuite>
/// </testsuites>
/// ```
///
/// The root `failures` attribute counts failed features, not scenarios.
pub fn generate_junit_xml(view: &ReportView<'_>) -> String {
    let summary = view.run_summary();
    let time_attr = view
        .run()
        .map(|run| format!(" time=\"{}\"", run.elapsed_seconds))
        .unwrap_or_default();

    let mut suites = String::new();
    for feature in view.features() {
        suites.push_str(&render_testsuite(feature));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuites{time} failures=\"{failures}\">\n{suites}</testsuites>\n",
        time = time_attr,
        failures = summary.features_failed,
        suites = suites,
    )
}

fn render_testsuite(feature: &Feature) -> String {
    let summary = feature.summary();
    let span = feature_span(&feature.scenarios);
    let elapsed = span.map(|(start, end)| seconds_between(start, end)).unwrap_or(0.0);
    let timestamp_attr = span
        .map(|(start, _)| format!(" timestamp=\"{}\"", start.format("%Y-%m-%dT%H:%M:%S")))
        .unwrap_or_default();

    let mut cases = String::new();
    for scenario in &feature.scenarios {
        cases.push_str(&render_testcase(scenario));
    }

    format!(
        "  <testsuite name=\"{name}\" time=\"{time}\" tests=\"{tests}\" skipped=\"{skipped}\" failures=\"{failures}\"{timestamp}>\n{cases}  </testsuite>\n",
        name = escape_xml(&feature.name),
        time = elapsed,
        tests = summary.total,
        skipped = summary.skipped_count,
        failures = summary.failed_count,
        timestamp = timestamp_attr,
        cases = cases,
    )
}

fn render_testcase(scenario: &Scenario) -> String {
    let mut body = String::new();

    match (&scenario.error_text, scenario.status) {
        (Some(error), _) => body.push_str(&format!(
            "      <failure>{}</failure>\n",
            escape_xml(&strip_ansi(error))
        )),
        (None, Status::Failed) => body.push_str("      <failure/>\n"),
        _ => {}
    }

    if scenario.status == Status::Skipped {
        body.push_str("      <skipped/>\n");
    }

    match scenario.log_text {
        Some(ref logs) => body.push_str(&format!(
            "      <system-out>{}</system-out>\n",
            escape_xml(&strip_ansi(logs))
        )),
        None => body.push_str("      <system-out/>\n"),
    }

    format!(
        "    <testcase name=\"{name}\" time=\"{time}\">\n{body}    </testcase>\n",
        name = escape_xml(&scenario.name),
        time = scenario.elapsed_seconds,
        body = body,
    )
}

/// Earliest scenario start and latest scenario end, when both exist.
fn feature_span(scenarios: &[Scenario]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = scenarios
        .iter()
        .filter_map(|s| s.start_time.as_deref().and_then(parse_timestamp))
        .min()?;
    let end = scenarios
        .iter()
        .filter_map(|s| s.end_time.as_deref().and_then(parse_timestamp))
        .max()?;
    Some((start, end))
}

fn seconds_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_milliseconds() as f64 / 1000.0
}

/// Accepts RFC 3339 and the `YYYY-MM-DD HH:MM:SS[.ffffff]` form.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Remove ANSI escape sequences (`ESC [ … final-byte`) from runner output.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if ('\u{40}'..='\u{7e}').contains(&c) {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
