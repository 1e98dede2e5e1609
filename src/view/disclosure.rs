use tracing::{debug, warn};

use crate::model::identity::StepId;
use crate::model::report_model::{Report, Step};

/// Expanded/collapsed flag of every step's log and error panel.
///
/// Flags live in one flat arena. `layout[feature][scenario]` holds the
/// arena offset of that scenario's first step and its step count, so a
/// [`StepId`] maps to exactly one slot and steps never share a flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisclosureState {
    flags: Vec<bool>,
    layout: Vec<Vec<(usize, usize)>>,
}

impl DisclosureState {
    /// Every step of `report` starts collapsed.
    pub fn for_report(report: &Report) -> Self {
        let mut offset = 0;
        let layout = report
            .features()
            .iter()
            .map(|feature| {
                feature
                    .scenarios
                    .iter()
                    .map(|scenario| {
                        let slot = (offset, scenario.steps.len());
                        offset += scenario.steps.len();
                        slot
                    })
                    .collect()
            })
            .collect();

        Self {
            flags: vec![false; offset],
            layout,
        }
    }

    fn slot(&self, id: StepId) -> Option<usize> {
        let (base, len) = *self.layout.get(id.feature)?.get(id.scenario)?;
        (id.step < len).then_some(base + id.step)
    }

    /// Flip one step's flag and return its new value.
    ///
    /// Returns `None`, changing nothing, if the run has no such step.
    pub fn toggle(&mut self, id: StepId) -> Option<bool> {
        let Some(slot) = self.slot(id) else {
            warn!(step = %id, "Disclosure toggle for unknown step ignored");
            return None;
        };
        self.flags[slot] = !self.flags[slot];
        debug!(step = %id, expanded = self.flags[slot], "Step disclosure toggled");
        Some(self.flags[slot])
    }

    pub fn is_expanded(&self, id: StepId) -> bool {
        self.slot(id).is_some_and(|slot| self.flags[slot])
    }

    pub fn expanded_count(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    /// Expand every collapsed step for which `pred` holds. Returns how many
    /// steps changed.
    pub fn expand_where<F>(&mut self, report: &Report, pred: F) -> usize
    where
        F: Fn(&Step) -> bool,
    {
        let targets: Vec<StepId> = report
            .steps()
            .filter(|&(id, step)| !self.is_expanded(id) && pred(step))
            .map(|(id, _)| id)
            .collect();

        targets
            .into_iter()
            .filter_map(|id| self.toggle(id))
            .count()
    }

    pub fn collapse_all(&mut self) {
        self.flags.iter_mut().for_each(|f| *f = false);
    }

    /// Drop all flags and lay the arena out for a new run.
    pub fn reset(&mut self, report: &Report) {
        *self = Self::for_report(report);
    }
}
