use tracing::{debug, warn};

use crate::error::SelectionMiss;
use crate::model::report_model::{Feature, Report, Scenario};

/// Tracks which feature the listing has selected.
///
/// Two states only: nothing selected (no visible scenarios) or one feature
/// selected (its scenarios, in order, are visible). The selection is stored
/// by name and resolved against the report on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<String>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Handle a "selection changed" event from the feature listing.
    ///
    /// `None` clears the selection. A name the report does not contain also
    /// clears it and is returned as a [`SelectionMiss`].
    pub fn on_feature_selected(
        &mut self,
        report: &Report,
        name: Option<&str>,
    ) -> Result<(), SelectionMiss> {
        let Some(name) = name else {
            debug!("Feature selection cleared");
            self.selected = None;
            return Ok(());
        };

        if report.feature_index(name).is_some() {
            if self.selected.as_deref() != Some(name) {
                debug!(feature = name, "Feature selected");
                self.selected = Some(name.to_string());
            }
            Ok(())
        } else {
            warn!(feature = name, "Selected feature not found; clearing scenarios");
            self.selected = None;
            Err(SelectionMiss {
                name: name.to_string(),
            })
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The selected feature and its position in the run.
    pub fn selected_feature<'r>(&self, report: &'r Report) -> Option<(usize, &'r Feature)> {
        let name = self.selected.as_deref()?;
        let index = report.feature_index(name)?;
        Some((index, &report.features()[index]))
    }

    pub fn visible_scenarios<'r>(&self, report: &'r Report) -> &'r [Scenario] {
        self.selected_feature(report)
            .map(|(_, feature)| feature.scenarios.as_slice())
            .unwrap_or(&[])
    }
}
