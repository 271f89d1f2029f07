//! Progress derivation: per-phase and overall completion counters.

use std::collections::HashMap;

use crate::models::{Phase, PhaseProgress, PhaseStatus, StepStatus, WorkflowStep};

/// Derive per-phase completion counters.
///
/// Member ids that match no step count toward nothing. Deterministic and
/// idempotent; safe to call on every mutation.
pub fn phase_progress(phases: &[Phase], steps: &[WorkflowStep]) -> Vec<PhaseProgress> {
    let status_by_id: HashMap<u32, StepStatus> =
        steps.iter().map(|s| (s.id, s.status)).collect();

    phases
        .iter()
        .map(|phase| {
            let total = phase.steps.len() as u32;
            let completed = phase
                .steps
                .iter()
                .filter(|id| status_by_id.get(id) == Some(&StepStatus::Completed))
                .count() as u32;
            let percent = percent_of(completed, total);

            PhaseProgress {
                id: phase.id.clone(),
                name: phase.name.clone(),
                description: phase.description.clone(),
                total,
                completed,
                percent,
                status: PhaseStatus::from_percent(percent),
            }
        })
        .collect()
}

/// Overall `(total, completed, percent)` across the full step list,
/// independent of phase membership.
pub fn overall_counts(steps: &[WorkflowStep]) -> (u32, u32, u8) {
    let total = steps.len() as u32;
    let completed = steps
        .iter()
        .filter(|s| s.status == StepStatus::Completed)
        .count() as u32;
    (total, completed, percent_of(completed, total))
}

/// `floor(100 * completed / total)`, defined as 0 for an empty set.
pub(crate) fn percent_of(completed: u32, total: u32) -> u8 {
    if total == 0 {
        0
    } else {
        (completed * 100 / total) as u8
    }
}
