//! Core library for the Groundwork guided build-plan tool.
//!
//! This crate turns a free-text app idea (or a scraped webpage) into a
//! guided workflow: an ordered list of small development steps grouped into
//! phases, each with a ready-to-paste prompt for an AI pair-programmer.
//! Plans are persisted in SQLite and replayed step by step; per-step
//! completion drives derived progress, phase transitions, and the
//! current-phase card.
//!
//! # Architecture
//!
//! - [`models`]: domain types — the [`Workflow`](models::Workflow)
//!   aggregate, the lenient [`Blueprint`](models::Blueprint) input, stored
//!   [`PlanRecord`](models::PlanRecord)s
//! - [`engine`]: the pure workflow engine (extraction, phase building,
//!   progress derivation, assembly, mutation)
//! - [`prompt`]: deterministic prompt templates
//! - [`analysis`]: shallow webpage structure scanning
//! - [`ai`]: OpenAI client for blueprint generation and step replay
//! - [`db`] + [`workbench`]: SQLite persistence behind an async API
//! - [`display`]: markdown formatting for terminal and MCP output
//!
//! # Quick Start
//!
//! ```rust
//! use groundwork_core::{models::Blueprint, WorkbenchBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workbench = WorkbenchBuilder::new()
//!     .with_database_path(Some("plans.db"))
//!     .build()
//!     .await?;
//!
//! // Assemble and store a plan (an empty blueprint yields the fallback
//! // "set up your project" workflow).
//! let record = workbench
//!     .create_plan("todo app".to_string(), None, &Blueprint::default())
//!     .await?;
//! println!("plan {} has {} steps", record.id, record.workflow.progress.total);
//! # Ok(())
//! # }
//! ```

pub mod ai;
pub mod analysis;
pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod params;
pub mod prompt;
pub mod workbench;

// Re-export commonly used types
pub use ai::OpenAiClient;
pub use db::Database;
pub use display::{CreateResult, OperationStatus, PlanSummaries, StepRuns, UpdateResult};
pub use engine::WorkflowOutcome;
pub use error::{GroundworkError, Result};
pub use models::{
    Blueprint, Difficulty, GroupedSteps, Phase, PhaseDescriptor, PhaseProgress, PhaseStatus,
    PlanRecord, PlanSummary, Priority, Progress, StepRun, StepStatus, Workflow, WorkflowStep,
};
pub use workbench::{Workbench, WorkbenchBuilder};
