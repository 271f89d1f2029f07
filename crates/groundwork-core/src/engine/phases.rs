//! Phase building: grouping step ids into named phases.

use crate::models::{Blueprint, Phase, RawPhase, WorkflowStep};

/// Group extracted steps into phases.
///
/// When the blueprint declares phases, each one is mapped through
/// [`declared_phases`]; otherwise phases are synthesized from the steps'
/// areas. The declared path may leave steps phase-less (they still count in
/// overall progress) — that is accepted behavior, not an error.
pub fn build_phases(blueprint: &Blueprint, steps: &[WorkflowStep]) -> Vec<Phase> {
    if blueprint.phases.is_empty() {
        phases_from_areas(steps)
    } else {
        declared_phases(&blueprint.phases, steps)
    }
}

/// Map blueprint-declared phases onto the extracted step list.
///
/// The declared id is kept when it is a non-blank string, otherwise the
/// phase gets a letter from its position. Raw member entries are matched
/// against extracted steps by exact title or id equality; entries matching
/// nothing are silently dropped.
fn declared_phases(raw_phases: &[RawPhase], steps: &[WorkflowStep]) -> Vec<Phase> {
    raw_phases
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let id = raw
                .id
                .clone()
                .unwrap_or_else(|| position_letter(idx));
            let name = raw.name.clone().unwrap_or_else(|| format!("Phase {id}"));
            let description = raw
                .description
                .clone()
                .unwrap_or_else(|| "Related steps".to_string());

            let member_ids = raw
                .steps
                .iter()
                .filter_map(|entry| {
                    steps
                        .iter()
                        .find(|st| {
                            entry.title.as_deref() == Some(st.title.as_str())
                                || entry.id == Some(st.id)
                        })
                        .map(|st| st.id)
                })
                .collect();

            Phase {
                id,
                name,
                description,
                steps: member_ids,
            }
        })
        .collect()
}

/// Synthesize phases from step areas when the blueprint declares none.
///
/// The first step seen for a bucket fixes its name and description; the
/// result is sorted by phase id.
fn phases_from_areas(steps: &[WorkflowStep]) -> Vec<Phase> {
    let mut phases: Vec<Phase> = Vec::new();

    for step in steps {
        let (id, name, description) = area_phase(&step.area);
        match phases.iter_mut().find(|p| p.id == id) {
            Some(phase) => phase.steps.push(step.id),
            None => phases.push(Phase {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                steps: vec![step.id],
            }),
        }
    }

    phases.sort_by(|a, b| a.id.cmp(&b.id));
    phases
}

/// Fixed area → phase triple lookup. This is data, not behavior.
fn area_phase(area: &str) -> (&'static str, &'static str, &'static str) {
    match area {
        "backend" => ("A", "Phase A – Foundation", "Setting up backend basics"),
        "frontend" => ("A", "Phase A – Foundation", "Setting up UI"),
        "database" => ("B", "Phase B – Data", "Adding persistent storage"),
        "ai_logic" => ("D", "Phase D – AI", "Building AI logic"),
        "integration" => ("E", "Phase E – Integration", "Connecting everything"),
        "ux" => ("G", "Phase G – Polish", "Making it smooth"),
        _ => ("B", "Phase B – Build", "Feature building"),
    }
}

/// Positional phase code for declared phases without a usable id.
fn position_letter(idx: usize) -> String {
    char::from_u32('A' as u32 + idx as u32)
        .map(String::from)
        .unwrap_or_else(|| format!("P{idx}"))
}
