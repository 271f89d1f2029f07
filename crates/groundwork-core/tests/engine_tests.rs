//! End-to-end scenarios for the workflow engine, exercised through the
//! public API only.

use groundwork_core::engine::{create_workflow, update_step_status};
use groundwork_core::models::{Blueprint, PhaseStatus, Priority, StepStatus};
use serde_json::json;

#[test]
fn single_database_step_scenario() {
    let blueprint = Blueprint::from_value(json!({
        "phases": [{"steps": [{"title": "Init DB", "area": "database"}]}]
    }));

    let workflow = create_workflow(&blueprint, "todo app");

    assert_eq!(workflow.steps.len(), 1);
    let step = &workflow.steps[0];
    assert_eq!(step.id, 1);
    assert_eq!(step.title, "Init DB");
    assert_eq!(step.priority, Priority::A);
    assert_eq!(step.status, StepStatus::Pending);
    assert_eq!(workflow.progress.percent, 0);
}

#[test]
fn completing_the_only_step_finishes_the_plan() {
    let blueprint = Blueprint::from_value(json!({
        "phases": [{"steps": [{"title": "Init DB", "area": "database"}]}]
    }));
    let mut workflow = create_workflow(&blueprint, "todo app");

    update_step_status(&mut workflow, 1, StepStatus::Completed);

    assert_eq!(workflow.progress.total, 1);
    assert_eq!(workflow.progress.completed, 1);
    assert_eq!(workflow.progress.percent, 100);
    assert_eq!(workflow.progress.current_step, 1);
    assert_eq!(workflow.progress.next_step, 0);
    assert!(workflow.testing_unlocked);
}

#[test]
fn empty_blueprint_yields_exactly_the_fallback_step() {
    let workflow = create_workflow(&Blueprint::from_value(json!({})), "");

    assert_eq!(workflow.steps.len(), 1);
    let step = &workflow.steps[0];
    assert_eq!(step.title, "Set up your project");
    assert_eq!(step.files_to_edit, vec!["main.ts"]);
    assert_eq!(step.priority, Priority::A);
    assert_eq!(workflow.summary, "Let's build something awesome!");
}

#[test]
fn overlapping_declared_phases_split_progress() {
    // Four steps total. Phase X holds steps 1 and 2; phase Y holds the
    // shared step 1 (referenced by id) plus step 4. Completing step 1 puts
    // both phases at 50% while overall progress sits at 25%.
    let blueprint = Blueprint::from_value(json!({
        "phases": [
            {"id": "X", "steps": [{"title": "One"}, {"title": "Two"}]},
            {"id": "Y", "steps": [{"id": 1}, {"title": "Three"}]}
        ]
    }));
    let mut workflow = create_workflow(&blueprint, "");
    assert_eq!(workflow.steps.len(), 4);
    assert_eq!(workflow.phases[0].steps, vec![1, 2]);
    assert_eq!(workflow.phases[1].steps, vec![1, 4]);

    update_step_status(&mut workflow, 1, StepStatus::Completed);

    for progress in &workflow.phase_progress {
        assert_eq!(progress.percent, 50);
        assert_eq!(progress.status, PhaseStatus::InProgress);
    }
    assert_eq!(workflow.progress.percent, 25);
}

#[test]
fn disjoint_phases_with_half_completion() {
    let blueprint = Blueprint::from_value(json!({
        "phases": [
            {"id": "A", "steps": [{"title": "A1"}, {"title": "A2"}]},
            {"id": "B", "steps": [{"title": "B1"}, {"title": "B2"}]}
        ]
    }));
    let mut workflow = create_workflow(&blueprint, "");

    update_step_status(&mut workflow, 1, StepStatus::Completed);
    update_step_status(&mut workflow, 3, StepStatus::Completed);

    for progress in &workflow.phase_progress {
        assert_eq!(progress.percent, 50);
        assert_eq!(progress.status, PhaseStatus::InProgress);
    }
    assert_eq!(workflow.progress.percent, 50);
    assert_eq!(workflow.progress.current_step, 2);
}

#[test]
fn testing_gate_tracks_the_70_percent_line() {
    let steps: Vec<_> = (1..=10).map(|i| json!({"title": format!("S{i}")})).collect();
    let blueprint = Blueprint::from_value(json!({"phases": [{"steps": steps}]}));
    let mut workflow = create_workflow(&blueprint, "");

    for id in 1..=10u32 {
        update_step_status(&mut workflow, id, StepStatus::Completed);
        let unlocked = workflow.progress.percent >= 70;
        assert_eq!(workflow.testing_unlocked, unlocked);
    }
    assert!(workflow.testing_unlocked);
}

#[test]
fn workflow_survives_json_round_trip_after_mutation() {
    let blueprint = Blueprint::from_value(json!({
        "summary": "round trip",
        "phases": [{"steps": [{"title": "One"}, {"title": "Two"}]}]
    }));
    let mut workflow = create_workflow(&blueprint, "idea");
    update_step_status(&mut workflow, 2, StepStatus::InProgress);

    let text = serde_json::to_string(&workflow).expect("serialize");
    let restored = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(workflow, restored);
}
