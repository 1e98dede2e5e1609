use std::path::PathBuf;

// ============================================================================
// Error taxonomy
// ============================================================================

/// Errors raised while turning a run document into a [`Report`].
///
/// Any of these is fatal for the run: no aggregate is computed over a
/// document that failed to load.
///
/// [`Report`]: crate::model::report_model::Report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A required field is missing or holds an invalid value.
    #[error("malformed input at {path}: {reason}")]
    MalformedInput { path: String, reason: String },

    /// The run document could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The run document is not valid JSON for either accepted shape.
    #[error("failed to decode {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ReportError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ReportError::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ReportError::MalformedInput { .. })
    }
}

/// A selection event named a feature the run does not contain.
///
/// Non-fatal: the visible scenario list is cleared and rendering continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no feature named '{name}' in this run")]
pub struct SelectionMiss {
    pub name: String,
}
