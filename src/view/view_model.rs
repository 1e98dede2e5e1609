use serde::Serialize;

use crate::error::SelectionMiss;
use crate::model::identity::StepId;
use crate::model::report_model::{Feature, Report, Run, Scenario, Step};
use crate::status::aggregator::{FeatureStatus, RunSummary, summarize_run};
use crate::view::disclosure::DisclosureState;
use crate::view::selection::SelectionController;

// ============================================================================
// Events and rows exchanged with the presentation layer
// ============================================================================

/// User interactions the view reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The feature listing's selection changed; `None` when it was cleared.
    FeatureSelected(Option<String>),
    /// A step's log/error panel was clicked.
    StepDisclosureToggled(StepId),
}

/// What handling a [`ViewEvent`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Selected,
    SelectionCleared,
    SelectionMissed(SelectionMiss),
    StepToggled { expanded: bool },
    UnknownStep(StepId),
}

/// One row of the feature listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRow<'r> {
    pub name: &'r str,
    pub description: Option<&'r str>,
    pub status: FeatureStatus,
    pub success_count: usize,
    pub failed_count: usize,
    pub skipped_count: usize,
}

// ============================================================================
// ReportView: the context handed to every renderer
// ============================================================================

/// Read-only report plus the transient interaction state built on top of it.
///
/// Events are applied through `&mut self`, so each one finishes before the
/// next starts.
#[derive(Debug, Clone)]
pub struct ReportView<'r> {
    report: &'r Report,
    selection: SelectionController,
    disclosure: DisclosureState,
}

impl<'r> ReportView<'r> {
    pub fn new(report: &'r Report) -> Self {
        Self {
            report,
            selection: SelectionController::new(),
            disclosure: DisclosureState::for_report(report),
        }
    }

    /// Switch to another run, discarding selection and disclosure state.
    pub fn load(&mut self, report: &'r Report) {
        self.report = report;
        self.selection.clear();
        self.disclosure.reset(report);
    }

    pub fn report(&self) -> &'r Report {
        self.report
    }

    pub fn run(&self) -> Option<&'r Run> {
        self.report.run()
    }

    pub fn features(&self) -> &'r [Feature] {
        self.report.features()
    }

    pub fn feature_row(&self, feature: &'r Feature) -> FeatureRow<'r> {
        let summary = feature.summary();
        FeatureRow {
            name: &feature.name,
            description: feature.description.as_deref(),
            status: summary.status,
            success_count: summary.success_count,
            failed_count: summary.failed_count,
            skipped_count: summary.skipped_count,
        }
    }

    pub fn feature_rows(&self) -> Vec<FeatureRow<'r>> {
        self.features().iter().map(|f| self.feature_row(f)).collect()
    }

    pub fn run_summary(&self) -> RunSummary {
        summarize_run(self.features())
    }

    pub fn selected_feature(&self) -> Option<(usize, &'r Feature)> {
        self.selection.selected_feature(self.report)
    }

    pub fn visible_scenarios(&self) -> &'r [Scenario] {
        self.selection.visible_scenarios(self.report)
    }

    pub fn is_step_expanded(&self, id: StepId) -> bool {
        self.disclosure.is_expanded(id)
    }

    pub fn expanded_count(&self) -> usize {
        self.disclosure.expanded_count()
    }

    pub fn select_feature(&mut self, name: Option<&str>) -> Result<(), SelectionMiss> {
        self.selection.on_feature_selected(self.report, name)
    }

    pub fn toggle_step(&mut self, id: StepId) -> Option<bool> {
        self.disclosure.toggle(id)
    }

    /// Expand every collapsed step matching `pred`; returns how many changed.
    pub fn expand_where<F>(&mut self, pred: F) -> usize
    where
        F: Fn(&Step) -> bool,
    {
        self.disclosure.expand_where(self.report, pred)
    }

    pub fn collapse_all(&mut self) {
        self.disclosure.collapse_all();
    }

    pub fn apply(&mut self, event: ViewEvent) -> EventOutcome {
        match event {
            ViewEvent::FeatureSelected(None) => {
                self.selection.clear();
                EventOutcome::SelectionCleared
            }
            ViewEvent::FeatureSelected(Some(name)) => match self.select_feature(Some(name.as_str())) {
                Ok(()) => EventOutcome::Selected,
                Err(miss) => EventOutcome::SelectionMissed(miss),
            },
            ViewEvent::StepDisclosureToggled(id) => match self.toggle_step(id) {
                Some(expanded) => EventOutcome::StepToggled { expanded },
                None => EventOutcome::UnknownStep(id),
            },
        }
    }
}
