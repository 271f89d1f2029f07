//! Prompt templates for AI pair-programmers.
//!
//! All templates are deterministic string renders over step fields; nothing
//! here talks to the network. The blueprint planning prompt used by
//! [`crate::ai::OpenAiClient`] also lives here so every instruction the
//! system emits is in one place.

use std::collections::BTreeMap;

use crate::models::{Workflow, WorkflowStep};

/// Context passed into a step prompt is capped at this many characters.
const CONTEXT_LIMIT: usize = 200;

/// Error text embedded in a fix prompt is capped at this many characters.
const ERROR_LIMIT: usize = 400;

/// Working-context line in a fix prompt is capped at this many characters.
const FIX_CONTEXT_LIMIT: usize = 150;

/// Render the standard build instruction for one step.
pub fn build_prompt(step: &WorkflowStep, context: &str) -> String {
    let ctx: String = context.chars().take(CONTEXT_LIMIT).collect();

    let mut notes = vec![
        format!(
            "You are helping build: {}",
            if ctx.is_empty() { "an app" } else { ctx.as_str() }
        ),
        format!("Current step: {}", step.title),
        format!("Why this matters: {}", step.why_it_matters),
        format!(
            "Area: {} ({}), priority {}",
            step.area, step.category, step.priority
        ),
    ];

    if !step.files_to_edit.is_empty() {
        notes.push(format!("Files: {}", step.files_to_edit.join(", ")));
    }
    if !step.micro_step_instructions.is_empty() {
        notes.push("Follow micro-steps:".to_string());
        for (i, instruction) in step.micro_step_instructions.iter().enumerate() {
            notes.push(format!("{}. {instruction}", i + 1));
        }
    }

    notes.push(String::new());
    notes.push("Rules:".to_string());
    notes.push("- Only do the required change.".to_string());
    notes.push("- Keep code simple.".to_string());

    notes.join("\n")
}

/// A step's stored prompt, or a freshly rendered one when the stored prompt
/// is empty (possible for workflows deserialized from older consumers).
pub fn step_prompt(step: &WorkflowStep, context: &str) -> String {
    if step.prompt.is_empty() {
        build_prompt(step, context)
    } else {
        step.prompt.clone()
    }
}

/// Render a "fix this error" instruction, optionally anchored to the step
/// being worked on.
pub fn fix_prompt(error_message: &str, step: Option<&WorkflowStep>) -> String {
    let error_short: String = error_message.chars().take(ERROR_LIMIT).collect();
    let context: String = step
        .map(|s| format!("Working on: {} - {}", s.title, s.why_it_matters))
        .unwrap_or_default()
        .chars()
        .take(FIX_CONTEXT_LIMIT)
        .collect();

    let mut lines = vec!["Fix this error in the smallest, safest way:".to_string()];
    if !error_short.is_empty() {
        lines.push(error_short);
    }
    if !context.is_empty() {
        lines.push(format!("Context: {context}"));
    }
    lines.push("Rules:".to_string());
    lines.push("- Smallest fix only".to_string());
    lines.push("- Don't change other things".to_string());
    lines.push("- Explain in 1 sentence what you fixed".to_string());

    lines.join("\n")
}

/// Prompts for every step of a workflow, keyed by step id. The workflow's
/// summary is the shared context.
pub fn all_prompts(workflow: &Workflow) -> BTreeMap<u32, String> {
    workflow
        .steps
        .iter()
        .map(|step| (step.id, step_prompt(step, &workflow.summary)))
        .collect()
}

/// The instruction sent to the LLM to produce a build-plan blueprint.
pub fn planning_prompt(idea: &str) -> String {
    format!(
        r#"You are a senior full-stack engineer who explains things so a 12-year-old can follow.

The user wants to build:
"{idea}"

Create a COMPLETE build plan for the ENTIRE system.

CRITICAL RULES:
1. Cover ALL features mentioned in the idea - don't stop after login/homepage.
2. Plan until a working MVP of the WHOLE system is possible.
3. For complex systems (AI agents, multi-user, dashboards), you MUST include ALL components.
4. Each step modifies only 1-2 files.
5. Each step does ONE thing only.
6. Use simple words a 12-year-old can understand, but keep the engineering professional.
7. Keep "replit_prompt" under 50 words.
8. Aim for 25-40 solid steps that cover the whole system.
9. ALWAYS respond with valid JSON only. No markdown, no commentary.

Return JSON in this exact shape:

{{
  "summary": "Short one-sentence summary of the app",
  "stack": {{
    "frontend": ["React", "Next.js", "TailwindCSS"],
    "backend": ["Node.js", "Vercel Functions"],
    "database": ["Supabase"],
    "ai": ["OpenAI"],
    "other": ["Stripe", "Auth", "Storage"]
  }},
  "phases": [
    {{
      "name": "Phase 1 - Setup & Skeleton",
      "description": "What this phase achieves in 1 short sentence",
      "steps": [
        {{
          "id": 1,
          "title": "Step title",
          "area": "frontend | backend | database | ai_logic | integration | ux",
          "why_it_matters": "Explain like I'm 12 why this step helps.",
          "files_to_edit": ["src/app.ts"],
          "micro_step_instructions": ["short instruction 1", "short instruction 2"],
          "difficulty": "easy | medium | hard",
          "estimated_minutes": 20,
          "replit_prompt": "Very short instruction you would paste into an AI pair-programmer.",
          "validation_check": ["how to verify the step worked"]
        }}
      ]
    }}
  ]
}}"#
    )
}
