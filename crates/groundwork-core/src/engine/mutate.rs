//! Step mutation: status transitions with full derived-state recomputation.

use crate::models::{GroupedSteps, Progress, StepStatus, Workflow};

use super::{assemble, progress};

/// Set one step's status and recompute every derived field.
///
/// Silently a no-op on the step list when no step matches `step_id`
/// (derived fields are still refreshed). Ids are unique, so at most one
/// step changes. Calling this twice with the same arguments yields the same
/// workflow as calling it once.
pub fn update_step_status(workflow: &mut Workflow, step_id: u32, new_status: StepStatus) {
    if let Some(step) = workflow.steps.iter_mut().find(|s| s.id == step_id) {
        step.status = new_status;
    }
    recompute(workflow);
}

/// Recompute `progress`, `phase_progress`, the current-phase card,
/// `grouped_steps`, and the testing gate from the step list. Never trusts
/// previously cached derived values.
pub(crate) fn recompute(workflow: &mut Workflow) {
    let (total, completed, percent) = progress::overall_counts(&workflow.steps);
    let (current_step, next_step) = match assemble::first_open(&workflow.steps) {
        Some(step) => (step.order, step.id),
        None => (1, 0),
    };

    workflow.progress = Progress {
        total,
        completed,
        percent,
        current_step,
        next_step,
    };

    workflow.phase_progress = progress::phase_progress(&workflow.phases, &workflow.steps);
    workflow.phase = if workflow.phases.is_empty() {
        assemble::descriptor_by_percent(percent)
    } else {
        assemble::current_phase(&workflow.phase_progress)
    };

    workflow.testing_unlocked = percent >= 70;
    workflow.grouped_steps = GroupedSteps::from_steps(&workflow.steps);
}
