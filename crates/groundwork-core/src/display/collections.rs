//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::models::{PlanSummary, StepRun};

/// Newtype wrapper for displaying collections of plan summaries.
///
/// Formats each summary in sequence; title handling is left to the caller
/// so the same collection renders under different headings.
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No build plans found.");
        }
        for summary in &self.0 {
            write!(f, "{summary}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a plan's replay history.
pub struct StepRuns(pub Vec<StepRun>);

impl fmt::Display for StepRuns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No step runs recorded.");
        }
        for run in &self.0 {
            write!(f, "{run}")?;
        }
        Ok(())
    }
}
