use std::fmt;

use serde::Serialize;

use crate::model::report_model::{Feature, Scenario, Status};

// ============================================================================
// Feature roll-up
// ============================================================================

/// Roll-up status of a feature, derived from its scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    Success,
    Failed,
    /// Every scenario was skipped; nothing ran.
    Skipped,
    /// Some scenarios ran, some were skipped, none failed.
    Incomplete,
}

impl FeatureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureStatus::Success => "success",
            FeatureStatus::Failed => "failed",
            FeatureStatus::Skipped => "skipped",
            FeatureStatus::Incomplete => "incomplete",
        }
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of [`aggregate_feature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureSummary {
    pub status: FeatureStatus,
    pub success_count: usize,
    pub failed_count: usize,
    pub skipped_count: usize,

    /// Number of scenarios, including those in no explicit bucket
    pub total: usize,
}

/// Derive a feature's status and counters from its scenarios.
///
/// Priority, first match wins:
/// 1. any failed scenario → `Failed`
/// 2. every scenario skipped → `Skipped`
/// 3. some skipped → `Incomplete`
/// 4. otherwise → `Success`
///
/// Scenarios with `Undefined` status count toward `total` only. An empty
/// scenario list satisfies rule 2 and is reported as `Skipped`.
pub fn aggregate_feature(scenarios: &[Scenario]) -> FeatureSummary {
    let mut success_count = 0;
    let mut failed_count = 0;
    let mut skipped_count = 0;

    for scenario in scenarios {
        match scenario.status {
            Status::Success => success_count += 1,
            Status::Failed => failed_count += 1,
            Status::Skipped => skipped_count += 1,
            Status::Undefined => {}
        }
    }

    let total = scenarios.len();
    let status = if failed_count > 0 {
        FeatureStatus::Failed
    } else if skipped_count == total {
        FeatureStatus::Skipped
    } else if skipped_count > 0 {
        FeatureStatus::Incomplete
    } else {
        FeatureStatus::Success
    };

    FeatureSummary {
        status,
        success_count,
        failed_count,
        skipped_count,
        total,
    }
}

// ============================================================================
// Run roll-up
// ============================================================================

/// Counts across every feature of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub features_total: usize,
    pub features_success: usize,
    pub features_failed: usize,
    pub features_skipped: usize,
    pub features_incomplete: usize,

    pub scenarios_total: usize,
    pub scenarios_success: usize,
    pub scenarios_failed: usize,
    pub scenarios_skipped: usize,
}

impl RunSummary {
    /// Whether no feature failed.
    pub fn all_passed(&self) -> bool {
        self.features_failed == 0
    }
}

pub fn summarize_run(features: &[Feature]) -> RunSummary {
    let mut summary = RunSummary {
        features_total: features.len(),
        ..RunSummary::default()
    };

    for feature in features {
        let fs = feature.summary();
        match fs.status {
            FeatureStatus::Success => summary.features_success += 1,
            FeatureStatus::Failed => summary.features_failed += 1,
            FeatureStatus::Skipped => summary.features_skipped += 1,
            FeatureStatus::Incomplete => summary.features_incomplete += 1,
        }
        summary.scenarios_total += fs.total;
        summary.scenarios_success += fs.success_count;
        summary.scenarios_failed += fs.failed_count;
        summary.scenarios_skipped += fs.skipped_count;
    }

    summary
}
