use serde::Deserialize;

// ============================================================================
// Raw run document, as written by the test runner
// ============================================================================
//
// Every field the report needs is optional here so that the loader, not
// serde, decides what is missing and reports where.

/// Object-shaped document: run metadata next to the feature list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRunDocument {
    #[serde(default)]
    pub test_result: Option<RawTestResult>,

    pub features: Option<Vec<RawFeature>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTestResult {
    pub elapsed: Option<f64>,
    pub num_cpu: Option<u32>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub success: Option<bool>,
    pub pid: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFeature {
    pub name: Option<String>,
    pub description: Option<String>,

    /// Status precomputed by the producer; never trusted
    pub status: Option<String>,

    pub scenarios: Option<Vec<RawScenario>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScenario {
    pub detail: Option<RawScenarioDetail>,
    pub status: Option<String>,
    pub elapsed: Option<f64>,
    pub error: Option<String>,
    pub logs: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawScenarioDetail {
    pub name: Option<String>,
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<RawTag>,

    #[serde(default)]
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTag {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStep {
    pub keyword: Option<String>,
    pub text: Option<String>,
    pub status: Option<String>,
    pub elapsed: Option<f64>,
    pub error: Option<String>,
    pub log: Option<String>,
}
