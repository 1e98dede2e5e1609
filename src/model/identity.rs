use std::fmt;

use sha1::{Digest, Sha1};

/// Stable identity of a step: its position in the feature/scenario/step tree.
///
/// Positions never change for a loaded run, so the id survives re-renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId {
    pub feature: usize,
    pub scenario: usize,
    pub step: usize,
}

impl StepId {
    pub fn new(feature: usize, scenario: usize, step: usize) -> Self {
        Self {
            feature,
            scenario,
            step,
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.feature, self.scenario, self.step)
    }
}

pub fn text_fingerprint(text: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// HTML-safe element id for a feature, derived from its name.
pub fn feature_anchor(name: &str) -> String {
    let fingerprint = text_fingerprint(name);
    format!("feature-{}", &fingerprint[..12])
}

/// HTML-safe element id for a step.
pub fn step_anchor(id: StepId) -> String {
    format!("step-{}-{}-{}", id.feature, id.scenario, id.step)
}
