//! Phase models: step groupings and their derived progress.

use serde::{Deserialize, Serialize};

use super::PhaseStatus;

/// A named bucket of step IDs within a workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Phase {
    /// Short code, conventionally a single uppercase letter
    pub id: String,

    /// Display name of the phase
    pub name: String,

    /// One-line description of what the phase achieves
    pub description: String,

    /// Member step IDs, in workflow order
    pub steps: Vec<u32>,
}

/// Per-phase completion counters, recomputed on every mutation and never
/// persisted independently of the workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseProgress {
    pub id: String,
    pub name: String,
    pub description: String,

    /// Number of member steps
    pub total: u32,

    /// Number of completed member steps
    pub completed: u32,

    /// `floor(100 * completed / total)`, 0 for an empty phase
    pub percent: u8,

    /// Derived from `percent`
    pub status: PhaseStatus,
}

/// The single "current phase" card shown to the user: the first
/// non-completed phase, or a terminal descriptor once everything is done.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseDescriptor {
    pub name: String,
    pub id: String,
    pub description: String,
    pub emoji: String,
    pub percent: u8,
    pub encouragement: String,
}
