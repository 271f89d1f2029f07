//! Workflow assembly: composing steps, phases, and progress into the
//! aggregate, including the current-phase card.

use crate::models::{
    Blueprint, GroupedSteps, PhaseDescriptor, PhaseProgress, PhaseStatus, Progress, Workflow,
    WorkflowStep,
};

use super::{extract, phases, progress};

/// Build a complete workflow from a blueprint and the idea it came from.
///
/// Total by construction: malformed blueprints degrade to the fallback
/// workflow rather than failing.
pub fn create_workflow(blueprint: &Blueprint, idea: &str) -> Workflow {
    let steps = extract::steps_from_blueprint(blueprint, idea);
    let phases = phases::build_phases(blueprint, &steps);
    let phase_progress = progress::phase_progress(&phases, &steps);
    let phase = current_phase(&phase_progress);

    let (total, completed, percent) = progress::overall_counts(&steps);
    let grouped_steps = GroupedSteps::from_steps(&steps);
    let (current_step, next_step) = match first_open(&steps) {
        Some(step) => (step.order, step.id),
        None => (1, 0),
    };

    Workflow {
        idea: idea.to_string(),
        summary: blueprint
            .summary_text()
            .unwrap_or("Let's build something awesome!")
            .to_string(),
        tech_stack: blueprint.stack_value(),
        directory_structure: blueprint.directory_structure(),
        user_flow: blueprint.user_flow.clone(),
        phases,
        phase_progress,
        steps,
        grouped_steps,
        progress: Progress {
            total,
            completed,
            percent,
            current_step,
            next_step,
        },
        phase,
        progress_hint: blueprint
            .progress_hint
            .clone()
            .unwrap_or_else(|| "Follow each step to build your app!".to_string()),
        testing_unlocked: percent >= 70,
    }
}

/// The current-phase card: the first phase (in order) that is not yet
/// completed, or the terminal descriptor when every phase is done.
pub(crate) fn current_phase(phase_progress: &[PhaseProgress]) -> PhaseDescriptor {
    for p in phase_progress {
        if p.status != PhaseStatus::Completed {
            return PhaseDescriptor {
                name: p.name.clone(),
                id: p.id.clone(),
                description: p.description.clone(),
                emoji: phase_emoji(&p.id).to_string(),
                percent: p.percent,
                encouragement: encouragement(p.percent).to_string(),
            };
        }
    }
    descriptor_by_percent(100)
}

/// Percent-banded descriptor used when no phase information applies.
pub(crate) fn descriptor_by_percent(percent: u8) -> PhaseDescriptor {
    let (name, id, description, emoji, encouragement) = if percent < 30 {
        (
            "Foundation",
            "A",
            "Setting up the basics!",
            "🏗️",
            "Great start!",
        )
    } else if percent < 70 {
        (
            "Building",
            "B",
            "Adding the main features!",
            "🔨",
            "You're doing amazing!",
        )
    } else if percent < 100 {
        ("Polish", "G", "Making it perfect!", "✨", "So close!")
    } else {
        ("Complete", "Z", "Your app is ready!", "🚀", "Congratulations!")
    };

    PhaseDescriptor {
        name: name.to_string(),
        id: id.to_string(),
        description: description.to_string(),
        emoji: emoji.to_string(),
        percent,
        encouragement: encouragement.to_string(),
    }
}

/// Fixed phase id → emoji lookup.
fn phase_emoji(id: &str) -> &'static str {
    match id {
        "A" => "🏗️",
        "B" => "💾",
        "C" => "📁",
        "D" => "🤖",
        "E" => "📱",
        "F" => "📚",
        "G" => "✨",
        _ => "🔨",
    }
}

/// Percent-banded encouragement for an active phase.
fn encouragement(percent: u8) -> &'static str {
    if percent == 0 {
        "Let's get started!"
    } else if percent < 50 {
        "Great progress—keep going!"
    } else if percent < 100 {
        "Almost done with this phase!"
    } else {
        "Phase complete!"
    }
}

pub(crate) fn first_open(steps: &[WorkflowStep]) -> Option<&WorkflowStep> {
    steps.iter().find(|s| s.is_open())
}
