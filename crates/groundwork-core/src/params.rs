//! Parameter structures for groundwork operations.
//!
//! Shared parameter structs usable across interfaces (CLI, MCP) without
//! framework-specific derives. Interface layers wrap these with their own
//! derives (clap `Args`, transparent serde wrappers for MCP) and convert
//! via `From`/accessors, keeping the core free of UI dependencies. JSON
//! schema generation is available behind the `schema` feature for the MCP
//! server.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{GroundworkError, Result};
use crate::models::StepStatus;

/// Generic parameters for operations requiring just a plan ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the build plan to operate on
    pub id: u64,
}

/// Parameters for listing stored build plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPlans {}

/// Parameters for generating a build plan from a free-text idea.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanFromIdea {
    /// What the user wants to build
    pub idea: String,
}

/// Parameters for generating a build plan from a scraped webpage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanFromUrl {
    /// Page to scrape and analyse
    pub url: String,
}

/// Parameters for permanently deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeletePlan {
    /// The ID of the build plan to delete
    pub id: u64,
    /// Must be true; guards against accidental deletion
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters addressing one step inside a stored plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepRef {
    /// The ID of the build plan
    pub plan_id: u64,
    /// The ID of the step within the plan's workflow
    pub step_id: u32,
}

/// Parameters for a step status transition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateStep {
    /// The ID of the build plan
    pub plan_id: u64,
    /// The ID of the step within the plan's workflow
    pub step_id: u32,
    /// New status: 'pending', 'in_progress', or 'completed'
    pub status: String,
}

impl UpdateStep {
    /// Parse and validate the requested status.
    pub fn validate(&self) -> Result<StepStatus> {
        self.status
            .parse::<StepStatus>()
            .map_err(|_| GroundworkError::InvalidInput {
                field: "status".to_string(),
                reason: format!(
                    "Invalid status: {}. Must be 'pending', 'in_progress', or 'completed'",
                    self.status
                ),
            })
    }
}

/// Parameters for rendering a fix prompt against a stored plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FixPrompt {
    /// The ID of the build plan
    pub plan_id: u64,
    /// The error message to fix
    pub error: String,
    /// Step being worked on, when known
    pub step_id: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_step_validate_accepts_known_statuses() {
        for (input, expected) in [
            ("pending", StepStatus::Pending),
            ("in_progress", StepStatus::InProgress),
            ("inprogress", StepStatus::InProgress),
            ("COMPLETED", StepStatus::Completed),
        ] {
            let params = UpdateStep {
                plan_id: 1,
                step_id: 1,
                status: input.to_string(),
            };
            assert_eq!(params.validate().expect("status should parse"), expected);
        }
    }

    #[test]
    fn update_step_validate_rejects_unknown_status() {
        let params = UpdateStep {
            plan_id: 1,
            step_id: 1,
            status: "done".to_string(),
        };
        match params.validate() {
            Err(GroundworkError::InvalidInput { field, reason }) => {
                assert_eq!(field, "status");
                assert!(reason.contains("Invalid status: done"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }
}
