//! High-level API for managing stored build plans.
//!
//! The [`Workbench`] coordinates between the workflow engine and the
//! SQLite layer: plans are assembled from blueprints, persisted as JSON
//! workflow documents, and mutated through engine recomputation so derived
//! fields are never stale on disk.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Interfaces    │    │    Workbench    │    │    Database     │
//! │   (CLI, MCP)    │───▶│ (plan_ops,      │───▶│    (via db/)    │
//! │                 │    │  step_ops)      │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! All operations are async; blocking SQLite work runs on the tokio
//! blocking pool. The workbench assumes single-writer semantics per plan —
//! an enclosing service that serves concurrent mutations for the same plan
//! owns its own locking discipline.

use std::path::PathBuf;

pub mod builder;
pub mod plan_ops;
pub mod step_ops;

#[cfg(test)]
mod tests;

pub use builder::WorkbenchBuilder;

/// Main interface for creating, storing, and replaying build plans.
pub struct Workbench {
    pub(crate) db_path: PathBuf,
}

impl Workbench {
    /// Creates a new workbench with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}
