use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ReportError;
use crate::ingest::raw_model::{
    RawFeature, RawRunDocument, RawScenario, RawStep, RawTag, RawTestResult,
};
use crate::model::report_model::{Feature, Report, Run, Scenario, Status, Step, Tag};

// ============================================================================
// Entry points
// ============================================================================

/// Read and validate a run document from disk.
pub fn load_report(path: &Path) -> Result<Report, ReportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let report = parse_document(&content, path)?;
    info!(
        path = %path.display(),
        features = report.features().len(),
        has_run_metadata = report.run().is_some(),
        "Run document loaded"
    );
    Ok(report)
}

/// Validate a run document held in memory.
pub fn parse_report(json: &str) -> Result<Report, ReportError> {
    parse_document(json, Path::new("<memory>"))
}

fn parse_document(json: &str, origin: &Path) -> Result<Report, ReportError> {
    let value: Value = serde_json::from_str(json).map_err(|source| ReportError::Json {
        path: origin.to_path_buf(),
        source,
    })?;

    match value {
        // Older producers wrote the bare feature list with no run block
        Value::Array(_) => {
            let features: Vec<RawFeature> = decode(value, "$")?;
            build_report(None, features)
        }
        Value::Object(_) => {
            let doc: RawRunDocument = decode(value, "$")?;
            let features = doc
                .features
                .ok_or_else(|| ReportError::malformed("features", "missing field"))?;
            let run = doc.test_result.map(validate_run).transpose()?;
            build_report(run, features)
        }
        _ => Err(ReportError::malformed(
            "$",
            "expected an object with 'features' or an array of features",
        )),
    }
}

fn decode<T: DeserializeOwned>(value: Value, at: &str) -> Result<T, ReportError> {
    serde_json::from_value(value).map_err(|e| ReportError::malformed(at, e.to_string()))
}

// ============================================================================
// Validation: raw → typed
// ============================================================================

fn build_report(run: Option<Run>, raw: Vec<RawFeature>) -> Result<Report, ReportError> {
    let features = raw
        .into_iter()
        .enumerate()
        .map(|(i, f)| validate_feature(f, &format!("features[{}]", i)))
        .collect::<Result<Vec<_>, _>>()?;

    Report::new(run, features)
}

fn validate_run(raw: RawTestResult) -> Result<Run, ReportError> {
    Ok(Run {
        elapsed_seconds: required(raw.elapsed, "testResult.elapsed")?,
        cpu_count: required(raw.num_cpu, "testResult.numCpu")?,
        start_timestamp: required(raw.start, "testResult.start")?,
        end_timestamp: required(raw.end, "testResult.end")?,
        success: raw.success,
        pid: raw.pid,
    })
}

fn validate_feature(raw: RawFeature, at: &str) -> Result<Feature, ReportError> {
    let name = required(raw.name, &format!("{}.name", at))?;
    let scenarios = required(raw.scenarios, &format!("{}.scenarios", at))?
        .into_iter()
        .enumerate()
        .map(|(i, sc)| validate_scenario(sc, &format!("{}.scenarios[{}]", at, i)))
        .collect::<Result<Vec<_>, _>>()?;

    let feature = Feature {
        name,
        description: non_empty(raw.description),
        scenarios,
    };

    if let Some(claimed) = raw.status.as_deref() {
        let derived = feature.summary().status;
        if claimed != derived.as_str() {
            debug!(
                feature = %feature.name,
                claimed,
                derived = %derived,
                "Ignoring producer feature status"
            );
        }
    }

    Ok(feature)
}

fn validate_scenario(raw: RawScenario, at: &str) -> Result<Scenario, ReportError> {
    let status = parse_status(raw.status, &format!("{}.status", at))?;
    let elapsed_seconds = required(raw.elapsed, &format!("{}.elapsed", at))?;
    let detail = required(raw.detail, &format!("{}.detail", at))?;
    let name = required(detail.name, &format!("{}.detail.name", at))?;

    let tags = dedupe_tags(detail.tags, &format!("{}.detail.tags", at))?;
    let steps = detail
        .steps
        .into_iter()
        .enumerate()
        .map(|(i, st)| validate_step(st, &format!("{}.detail.steps[{}]", at, i)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Scenario {
        name,
        description: non_empty(detail.description),
        tags,
        elapsed_seconds,
        status,
        steps,
        error_text: non_empty(raw.error),
        log_text: non_empty(raw.logs),
        start_time: non_empty(raw.start_time),
        end_time: non_empty(raw.end_time),
    })
}

fn validate_step(raw: RawStep, at: &str) -> Result<Step, ReportError> {
    Ok(Step {
        keyword: required(raw.keyword, &format!("{}.keyword", at))?
            .trim()
            .to_string(),
        text: required(raw.text, &format!("{}.text", at))?,
        status: parse_status(raw.status, &format!("{}.status", at))?,
        elapsed_seconds: required(raw.elapsed, &format!("{}.elapsed", at))?,
        error_text: non_empty(raw.error),
        log_text: non_empty(raw.log),
    })
}

/// Tags form a set keyed by id; the first occurrence wins.
fn dedupe_tags(raw: Vec<RawTag>, at: &str) -> Result<Vec<Tag>, ReportError> {
    let mut seen = HashSet::new();
    let mut tags = Vec::with_capacity(raw.len());
    for (i, tag) in raw.into_iter().enumerate() {
        let id = required(tag.id, &format!("{}[{}].id", at, i))?;
        let name = required(tag.name, &format!("{}[{}].name", at, i))?;
        if seen.insert(id.clone()) {
            tags.push(Tag { id, name });
        }
    }
    Ok(tags)
}

// ============================================================================
// Helpers
// ============================================================================

fn required<T>(value: Option<T>, at: &str) -> Result<T, ReportError> {
    value.ok_or_else(|| ReportError::malformed(at, "missing field"))
}

fn parse_status(value: Option<String>, at: &str) -> Result<Status, ReportError> {
    let raw = required(value, at)?;
    Status::parse(&raw)
        .ok_or_else(|| ReportError::malformed(at, format!("unknown status '{}'", raw)))
}

/// Empty strings carry no information; the producer writes them for "none".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
