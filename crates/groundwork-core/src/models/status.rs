//! Status and classification enumerations for workflow steps and phases.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of step statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step has not been started yet
    #[default]
    Pending,

    /// Step is being worked on
    InProgress,

    /// Step has been completed
    Completed,
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(StepStatus::Pending),
            "in_progress" | "inprogress" => Ok(StepStatus::InProgress),
            "completed" => Ok(StepStatus::Completed),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl StepStatus {
    /// Convert to the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::InProgress => "in_progress",
            StepStatus::Completed => "completed",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Icons Used
    /// - `✓ Completed` - Checkmark for completed steps
    /// - `➤ In Progress` - Arrow for active steps
    /// - `○ Pending` - Circle for untouched steps
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Completed => "✓ Completed",
            StepStatus::InProgress => "➤ In Progress",
            StepStatus::Pending => "○ Pending",
        }
    }
}

/// Priority bucket for a step, derived from its area.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    A,
    #[default]
    B,
    C,
}

impl Priority {
    /// Derive the priority bucket from a step's area.
    ///
    /// Unknown areas land in the middle bucket.
    pub fn from_area(area: &str) -> Self {
        match area {
            "frontend" | "backend" | "database" => Priority::A,
            "ai_logic" | "integration" => Priority::B,
            "ux" => Priority::C,
            _ => Priority::B,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::A => "A",
            Priority::B => "B",
            Priority::C => "C",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated difficulty of a step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}

/// Derived status of a phase, computed from its members' step statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl PhaseStatus {
    /// Derive the phase status from its completion percentage.
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            100 => PhaseStatus::Completed,
            0 => PhaseStatus::Pending,
            _ => PhaseStatus::InProgress,
        }
    }
}
