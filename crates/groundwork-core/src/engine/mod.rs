//! The guided-workflow engine.
//!
//! Turns a loosely-typed [`Blueprint`](crate::models::Blueprint) into a
//! [`Workflow`](crate::models::Workflow) aggregate and keeps every derived
//! field (progress, phase progress, current-phase card, priority grouping,
//! testing gate) consistent across step mutations.
//!
//! The pipeline runs leaf-first:
//!
//! ```text
//! Blueprint ──▶ extract ──▶ phases ──▶ progress ──▶ assemble ──▶ Workflow
//!                                                      ▲
//!                               mutate ────────────────┘ (recompute all)
//! ```
//!
//! Everything in this module is synchronous, allocation-only, and total:
//! malformed input degrades to defaults instead of failing, so none of these
//! functions return errors. The [`WorkflowOutcome`] envelope exists for the
//! fallible boundary around the engine (persistence, serialization, the LLM
//! client), where callers expect a `{success, error, workflow}` shape.

mod assemble;
mod extract;
mod mutate;
mod phases;
mod progress;


use serde::Serialize;

use crate::models::Workflow;

pub use assemble::create_workflow;
pub use extract::steps_from_blueprint;
pub use mutate::update_step_status;
pub use phases::build_phases;
pub use progress::{overall_counts, phase_progress};

/// Maximum length of an error message carried by a [`WorkflowOutcome`].
const ERROR_LIMIT: usize = 100;

/// Discriminated result envelope for workflow operations crossing a JSON
/// boundary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkflowOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub workflow: Option<Workflow>,
}

impl WorkflowOutcome {
    /// Successful outcome carrying the (re)computed workflow.
    pub fn ok(workflow: Workflow) -> Self {
        Self {
            success: true,
            error: None,
            workflow: Some(workflow),
        }
    }

    /// Failed outcome. The message is truncated to 100 characters; the
    /// workflow slot carries whatever state the caller still has (possibly
    /// partially mutated), or nothing.
    pub fn failed(error: impl std::fmt::Display, workflow: Option<Workflow>) -> Self {
        Self {
            success: false,
            error: Some(error.to_string().chars().take(ERROR_LIMIT).collect()),
            workflow,
        }
    }
}

impl From<crate::error::Result<Workflow>> for WorkflowOutcome {
    fn from(result: crate::error::Result<Workflow>) -> Self {
        match result {
            Ok(workflow) => Self::ok(workflow),
            Err(e) => Self::failed(e, None),
        }
    }
}
