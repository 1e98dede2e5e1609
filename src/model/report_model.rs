use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::ReportError;
use crate::model::identity::StepId;
use crate::status::aggregator::{FeatureSummary, aggregate_feature};

// ============================================================================
// Outcome of a single scenario or step
// ============================================================================

/// Outcome reported by the test runner for a scenario or a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Failed,
    Skipped,
    Undefined,
}

impl Status {
    /// Parse the producer's status string. Unknown values are rejected.
    pub fn parse(value: &str) -> Option<Status> {
        match value {
            "success" => Some(Status::Success),
            "failed" => Some(Status::Failed),
            "skipped" => Some(Status::Skipped),
            "undefined" => Some(Status::Undefined),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failed => "failed",
            Status::Skipped => "skipped",
            Status::Undefined => "undefined",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Run metadata
// ============================================================================

/// Timing and host information for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub elapsed_seconds: f64,
    pub cpu_count: u32,
    pub start_timestamp: String,
    pub end_timestamp: String,

    /// Overall verdict as reported by the producer, when it sent one
    pub success: Option<bool>,

    /// Process id of the runner, when reported
    pub pid: Option<u32>,
}

// ============================================================================
// Feature / Scenario / Step tree
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub keyword: String,
    pub text: String,
    pub status: Status,
    pub elapsed_seconds: f64,
    pub error_text: Option<String>,
    pub log_text: Option<String>,
}

impl Step {
    /// Whether the step carries anything worth disclosing.
    pub fn has_detail(&self) -> bool {
        self.error_text.is_some() || self.log_text.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub elapsed_seconds: f64,
    pub status: Status,
    pub steps: Vec<Step>,

    /// Failure message reported for the scenario as a whole
    pub error_text: Option<String>,

    /// Captured output of the scenario as a whole
    pub log_text: Option<String>,

    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// A named group of scenarios.
///
/// The roll-up status is never stored: [`Feature::summary`] recomputes it
/// from the scenarios on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub name: String,
    pub description: Option<String>,
    pub scenarios: Vec<Scenario>,
}

impl Feature {
    pub fn summary(&self) -> FeatureSummary {
        aggregate_feature(&self.scenarios)
    }
}

// ============================================================================
// Report: validated, immutable snapshot of one run
// ============================================================================

/// The validated snapshot of a run.
///
/// Built once by the loader (or [`Report::new`]) and never mutated; the view
/// layer only ever borrows it.
#[derive(Debug, Clone)]
pub struct Report {
    run: Option<Run>,
    features: Vec<Feature>,
    by_name: HashMap<String, usize>,
}

impl Report {
    /// Assemble a report, rejecting duplicate feature names.
    pub fn new(run: Option<Run>, features: Vec<Feature>) -> Result<Self, ReportError> {
        let mut by_name = HashMap::with_capacity(features.len());
        for (i, feature) in features.iter().enumerate() {
            if by_name.insert(feature.name.clone(), i).is_some() {
                return Err(ReportError::malformed(
                    format!("features[{}].name", i),
                    format!("duplicate feature name '{}'", feature.name),
                ));
            }
        }
        Ok(Self {
            run,
            features,
            by_name,
        })
    }

    /// Run metadata; `None` for documents that only carry a feature list.
    pub fn run(&self) -> Option<&Run> {
        self.run.as_ref()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.feature_index(name).map(|i| &self.features[i])
    }

    pub fn step(&self, id: StepId) -> Option<&Step> {
        self.features
            .get(id.feature)?
            .scenarios
            .get(id.scenario)?
            .steps
            .get(id.step)
    }

    /// Every step of the run in rendering order, paired with its identity.
    pub fn steps(&self) -> impl Iterator<Item = (StepId, &Step)> {
        self.features.iter().enumerate().flat_map(|(f, feature)| {
            feature.scenarios.iter().enumerate().flat_map(move |(s, scenario)| {
                scenario
                    .steps
                    .iter()
                    .enumerate()
                    .map(move |(i, step)| (StepId::new(f, s, i), step))
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
