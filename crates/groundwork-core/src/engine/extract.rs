//! Step extraction: flattening blueprint phases into normalized steps.

use crate::models::{Blueprint, Difficulty, Priority, RawStep, StepStatus, WorkflowStep};
use crate::prompt;

/// Flatten a blueprint's phases into a uniform list of normalized steps.
///
/// Ids are assigned by a single running counter across the whole blueprint,
/// so they are unique and contiguous starting at 1 in iteration order. A
/// blueprint with no phases, or phases that yield no steps, produces the
/// one-step fallback instead.
pub fn steps_from_blueprint(blueprint: &Blueprint, idea: &str) -> Vec<WorkflowStep> {
    if blueprint.phases.is_empty() {
        return fallback_steps(idea);
    }

    let context = blueprint.summary_text().unwrap_or("");
    let mut steps = Vec::new();
    for phase in &blueprint.phases {
        for raw in &phase.steps {
            let id = steps.len() as u32 + 1;
            steps.push(normalize_step(raw, id, context));
        }
    }

    if steps.is_empty() {
        fallback_steps(idea)
    } else {
        steps
    }
}

/// Normalize one raw blueprint entry into a complete step.
///
/// Every missing or malformed field falls back to its documented default;
/// the prompt is synthesized from the normalized fields when the blueprint
/// did not supply one.
fn normalize_step(raw: &RawStep, id: u32, context: &str) -> WorkflowStep {
    let area = raw.area_text();
    let priority = Priority::from_area(&area);
    let category = raw.category.clone().unwrap_or_else(|| area.clone());

    let mut step = WorkflowStep {
        id,
        order: id,
        title: raw.title.clone().unwrap_or_else(|| format!("Step {id}")),
        area,
        category,
        why_it_matters: raw
            .why_it_matters
            .clone()
            .or_else(|| raw.reason.clone())
            .unwrap_or_else(|| "This step moves the app forward.".to_string()),
        files_to_edit: raw.files_to_edit.clone(),
        micro_step_instructions: raw.micro_step_instructions.clone(),
        prompt: String::new(),
        validation_check: raw.validation_check.clone(),
        priority,
        status: raw
            .status
            .as_deref()
            .and_then(|s| s.parse::<StepStatus>().ok())
            .unwrap_or_default(),
        estimated_minutes: raw.estimated_minutes.unwrap_or(20),
        difficulty: raw
            .difficulty
            .as_deref()
            .and_then(|s| s.parse::<Difficulty>().ok())
            .unwrap_or_default(),
    };

    step.prompt = match &raw.replit_prompt {
        Some(p) => p.clone(),
        None => prompt::build_prompt(&step, context),
    };
    step
}

/// The single "set up your project" step used when a blueprint carries no
/// usable phases.
pub(crate) fn fallback_steps(idea: &str) -> Vec<WorkflowStep> {
    let idea_snippet: String = idea.chars().take(80).collect();
    vec![WorkflowStep {
        id: 1,
        order: 1,
        title: "Set up your project".to_string(),
        area: "backend".to_string(),
        category: "setup".to_string(),
        why_it_matters: "Every app needs a foundation.".to_string(),
        files_to_edit: vec!["main.ts".to_string()],
        micro_step_instructions: vec![
            "Create entry file".to_string(),
            "Add health endpoint".to_string(),
            "Run server".to_string(),
        ],
        prompt: format!("Create a minimal backend for: {idea_snippet}"),
        validation_check: vec!["Server runs".to_string(), "Endpoint works".to_string()],
        priority: Priority::A,
        status: StepStatus::Pending,
        estimated_minutes: 20,
        difficulty: Difficulty::Easy,
    }]
}
