//! Display implementations for domain models.
//!
//! Markdown-formatted output for rich terminal display, with status icons
//! and structured sections. Separated from the model definitions to keep
//! data and presentation apart.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::analysis::PageAnalysis;
use crate::models::{
    Difficulty, PhaseProgress, PlanRecord, PlanSummary, StepRun, StepStatus, Workflow,
    WorkflowStep,
};

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "- Area: {} ({}) | Priority: {} | Difficulty: {} | Est: {} min",
            self.area, self.category, self.priority, self.difficulty, self.estimated_minutes
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.why_it_matters)?;

        if !self.files_to_edit.is_empty() {
            writeln!(f, "\n#### Files")?;
            writeln!(f)?;
            for file in &self.files_to_edit {
                writeln!(f, "- {file}")?;
            }
        }

        if !self.micro_step_instructions.is_empty() {
            writeln!(f, "\n#### Micro-steps")?;
            writeln!(f)?;
            for (i, instruction) in self.micro_step_instructions.iter().enumerate() {
                writeln!(f, "{}. {instruction}", i + 1)?;
            }
        }

        if !self.validation_check.is_empty() {
            writeln!(f, "\n#### Validation")?;
            writeln!(f)?;
            for check in &self.validation_check {
                writeln!(f, "- {check}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for PhaseProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- [{}] {}: {}/{} ({}%)",
            self.id, self.name, self.completed, self.total, self.percent
        )
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary)?;
        writeln!(f)?;
        writeln!(
            f,
            "**Current phase:** {} {} ({}%) {}",
            self.phase.emoji, self.phase.name, self.phase.percent, self.phase.encouragement
        )?;
        writeln!(
            f,
            "**Progress:** {}/{} steps ({}%)",
            self.progress.completed, self.progress.total, self.progress.percent
        )?;
        if self.testing_unlocked {
            writeln!(f, "**Testing unlocked!**")?;
        }

        if !self.phase_progress.is_empty() {
            writeln!(f, "\n## Phases")?;
            writeln!(f)?;
            for phase in &self.phase_progress {
                write!(f, "{phase}")?;
            }
        }

        writeln!(f, "\n## Steps")?;
        writeln!(f)?;
        for step in &self.steps {
            write!(f, "{step}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.idea)?;
        writeln!(f)?;
        if let Some(url) = &self.source_url {
            writeln!(f, "- Source: {url}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)?;
        write!(f, "{}", self.workflow)
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) ({}/{})",
            self.idea, self.id, self.completed_steps, self.total_steps
        )?;
        writeln!(f)?;
        writeln!(f, "- **Summary**: {}", self.summary)?;
        writeln!(f, "- **Progress**: {}%", self.percent)?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for StepRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### Step {} run at {}",
            self.step_id,
            LocalDateTime(&self.created_at)
        )?;
        writeln!(f)?;
        match &self.output {
            Some(output) => writeln!(f, "{output}")?,
            None => writeln!(f, "(no output)")?,
        }
        writeln!(f)
    }
}

impl fmt::Display for PageAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# HTML Structure Summary")?;
        writeln!(f)?;
        writeln!(
            f,
            "- Title: {}",
            self.title.as_deref().unwrap_or("missing")
        )?;
        writeln!(
            f,
            "- Meta Description: {}",
            if self.description.is_some() {
                "present"
            } else {
                "missing"
            }
        )?;
        writeln!(f, "- H1 Tags: {}", self.h1.len())?;
        writeln!(f, "- H2 Tags: {}", self.h2.len())?;
        writeln!(f, "- Paragraphs: {}", self.p_count)?;
        writeln!(f)?;
        writeln!(f, "## Detected Issues")?;
        writeln!(f)?;
        if self.basic_issues.is_empty() {
            writeln!(f, "None")?;
        } else {
            for issue in &self.basic_issues {
                writeln!(f, "- {issue}")?;
            }
        }
        Ok(())
    }
}
