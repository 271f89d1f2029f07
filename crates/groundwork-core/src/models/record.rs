//! Persisted build-plan records and their list summaries.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Workflow;

/// A stored build plan: one workflow plus its persistence metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanRecord {
    /// Unique identifier for the plan
    pub id: u64,

    /// The idea the plan was generated from
    pub idea: String,

    /// URL the idea was scraped from, when the plan came from a page
    pub source_url: Option<String>,

    /// The workflow aggregate
    pub workflow: Workflow,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last updated (UTC)
    pub updated_at: Timestamp,
}

/// Summary information about a stored plan with progress counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// The idea the plan was generated from
    pub idea: String,
    /// Human summary of the app being built
    pub summary: String,
    /// Total number of steps
    pub total_steps: u32,
    /// Number of completed steps
    pub completed_steps: u32,
    /// Overall completion percentage
    pub percent: u8,
    /// Last update timestamp
    pub updated_at: Timestamp,
}

impl From<&PlanRecord> for PlanSummary {
    fn from(record: &PlanRecord) -> Self {
        let progress = &record.workflow.progress;
        Self {
            id: record.id,
            idea: record.idea.clone(),
            summary: record.workflow.summary.clone(),
            total_steps: progress.total,
            completed_steps: progress.completed,
            percent: progress.percent,
            updated_at: record.updated_at,
        }
    }
}

/// Output captured while replaying one step of a stored plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepRun {
    /// Run row ID
    pub id: u64,
    /// Plan the run belongs to
    pub plan_id: u64,
    /// Step that was executed
    pub step_id: u32,
    /// What the execution agent produced, if anything
    pub output: Option<String>,
    /// Timestamp when the run was recorded (UTC)
    pub created_at: Timestamp,
}
