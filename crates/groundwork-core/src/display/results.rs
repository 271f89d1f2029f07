//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{PlanRecord, Workflow};

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<PlanRecord> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created build plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying a workflow after a step mutation,
/// summarizing the recomputed state instead of the full step list.
pub struct UpdateResult {
    pub plan_id: u64,
    pub workflow: Workflow,
}

impl UpdateResult {
    pub fn new(plan_id: u64, workflow: Workflow) -> Self {
        Self { plan_id, workflow }
    }
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = &self.workflow.progress;
        let phase = &self.workflow.phase;

        writeln!(f, "Updated plan {}", self.plan_id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Progress: {}/{} steps ({}%)",
            progress.completed, progress.total, progress.percent
        )?;
        writeln!(
            f,
            "- Current phase: {} {} ({}%) {}",
            phase.emoji, phase.name, phase.percent, phase.encouragement
        )?;
        if progress.next_step != 0 {
            writeln!(f, "- Next step: {}", progress.next_step)?;
        } else {
            writeln!(f, "- All steps completed!")?;
        }
        if self.workflow.testing_unlocked {
            writeln!(f, "- Testing unlocked!")?;
        }
        Ok(())
    }
}
