//! Workflow step model definition.

use serde::{Deserialize, Serialize};

use super::{Difficulty, Priority, StepStatus};

/// One unit of work inside a guided workflow.
///
/// Step IDs are unique and contiguous starting at 1 within a workflow,
/// assigned in blueprint extraction order. `order` equals `id` at creation
/// and exists so steps can later be reordered without renumbering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowStep {
    /// Unique identifier within the workflow
    pub id: u32,

    /// Display order within the workflow
    pub order: u32,

    /// Brief title of the step
    pub title: String,

    /// Functional area (frontend, backend, database, ...); drives priority
    /// and phase inference
    pub area: String,

    /// Finer-grained category label
    pub category: String,

    /// Human-readable justification for the step
    pub why_it_matters: String,

    /// Paths the step is expected to touch
    #[serde(default)]
    pub files_to_edit: Vec<String>,

    /// Ordered micro-instructions for carrying out the step
    #[serde(default)]
    pub micro_step_instructions: Vec<String>,

    /// Ready-to-paste instruction for an AI pair-programmer.
    ///
    /// Serialized as `replit_prompt`, the historical field name consumers
    /// already depend on.
    #[serde(rename = "replit_prompt")]
    pub prompt: String,

    /// Human-readable acceptance checks
    #[serde(default)]
    pub validation_check: Vec<String>,

    /// Priority bucket derived from `area`
    pub priority: Priority,

    /// Current completion status
    pub status: StepStatus,

    /// Rough time estimate in minutes
    pub estimated_minutes: u32,

    /// Estimated difficulty
    pub difficulty: Difficulty,
}

impl WorkflowStep {
    /// Whether the step still needs work.
    pub fn is_open(&self) -> bool {
        self.status != StepStatus::Completed
    }
}
