//! The builder progress tracker.
//!
//! Derives the ordered set of completed wizard steps from a simulation
//! record in a single pass over the dependency chain. Completion is a
//! monotone prefix: a step counts only when every step before it on the
//! active branch counts too, so a half-finished record can never show a
//! gap in the sidebar.
//!
//! Progress is recomputed from scratch on every fetched snapshot and is
//! never persisted; the record itself is the only source of truth.
//!
//! Matches TypeScript `BuilderProgress` in simulation-builder.model.ts.

use serde::Serialize;

use crate::completeness::step_fields_complete;
use crate::steps::Step;
use crate::types::Simulation;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Completed-step state derived from one simulation record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct BuilderProgress {
    completed: Vec<Step>,
    certificate_enabled: bool,
}

impl Default for BuilderProgress {
    /// Zero progress on the certificate-enabled branch — the safe floor
    /// used when no record is available.
    fn default() -> Self {
        Self {
            completed: Vec::new(),
            certificate_enabled: true,
        }
    }
}

impl BuilderProgress {
    /// Walk the record's completion chain and collect the completed prefix.
    ///
    /// A null `certificate_enabled` on the record means enabled.
    pub fn evaluate(sim: &Simulation) -> Self {
        let certificate_enabled = sim.certificate_enabled.unwrap_or(true);

        let mut completed = Vec::new();
        let mut predecessor_ok = true;
        for &step in Step::completion_chain(certificate_enabled) {
            let done = predecessor_ok && step_fields_complete(sim, step);
            if done {
                completed.push(step);
            }
            predecessor_ok = done;
        }

        Self {
            completed,
            certificate_enabled,
        }
    }

    /// Completed steps in chain order.
    pub fn completed_steps(&self) -> &[Step] {
        &self.completed
    }

    /// Which chain branch this progress was computed on.
    pub fn certificate_enabled(&self) -> bool {
        self.certificate_enabled
    }

    pub fn is_complete(&self, step: Step) -> bool {
        self.completed.contains(&step)
    }

    /// Publishing requires the analytics step, the last step before review.
    pub fn can_publish(&self) -> bool {
        self.is_complete(Step::Analytics)
    }

    /// Sidebar gating: a brand-new record lets the user start only at
    /// metadata; once anything is completed, every step is clickable and
    /// each step's own form validation takes over.
    pub fn can_navigate_to(&self, step: Step) -> bool {
        step == Step::Metadata || !self.completed.is_empty()
    }

    /// The first chain step not yet completed, or review once the whole
    /// chain is done.
    pub fn next_step(&self) -> Step {
        Step::completion_chain(self.certificate_enabled)
            .iter()
            .copied()
            .find(|step| !self.is_complete(*step))
            .unwrap_or(Step::Review)
    }
}
