use jiff::Timestamp;
use serde_json::json;

use crate::engine;
use crate::models::{
    Blueprint, Difficulty, GroupedSteps, PlanRecord, PlanSummary, Priority, StepStatus, Workflow,
    WorkflowStep,
};

fn make_step(id: u32, priority: Priority, status: StepStatus) -> WorkflowStep {
    WorkflowStep {
        id,
        order: id,
        title: format!("Step {id}"),
        area: "backend".to_string(),
        category: "setup".to_string(),
        why_it_matters: "Keeps things moving".to_string(),
        files_to_edit: vec![],
        micro_step_instructions: vec![],
        prompt: "do it".to_string(),
        validation_check: vec![],
        priority,
        status,
        estimated_minutes: 20,
        difficulty: Difficulty::Medium,
    }
}

fn sample_workflow() -> Workflow {
    engine::create_workflow(
        &Blueprint::from_value(json!({
            "summary": "a sample app",
            "phases": [{"steps": [
                {"title": "One", "area": "backend"},
                {"title": "Two", "area": "ux"},
            ]}]
        })),
        "sample idea",
    )
}

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

#[test]
fn step_status_parses_both_spellings() {
    assert_eq!("in_progress".parse(), Ok(StepStatus::InProgress));
    assert_eq!("inprogress".parse(), Ok(StepStatus::InProgress));
    assert_eq!("Pending".parse(), Ok(StepStatus::Pending));
    assert!("finished".parse::<StepStatus>().is_err());
}

#[test]
fn step_status_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&StepStatus::InProgress).unwrap(),
        "\"in_progress\""
    );
}

#[test]
fn priority_from_area_uses_fixed_map() {
    assert_eq!(Priority::from_area("frontend"), Priority::A);
    assert_eq!(Priority::from_area("backend"), Priority::A);
    assert_eq!(Priority::from_area("database"), Priority::A);
    assert_eq!(Priority::from_area("ai_logic"), Priority::B);
    assert_eq!(Priority::from_area("integration"), Priority::B);
    assert_eq!(Priority::from_area("ux"), Priority::C);
    assert_eq!(Priority::from_area("anything else"), Priority::B);
}

// ---------------------------------------------------------------------------
// Grouped steps
// ---------------------------------------------------------------------------

#[test]
fn grouped_steps_partition_by_priority() {
    let steps = vec![
        make_step(1, Priority::A, StepStatus::Pending),
        make_step(2, Priority::C, StepStatus::Pending),
        make_step(3, Priority::A, StepStatus::Pending),
    ];

    let grouped = GroupedSteps::from_steps(&steps);
    assert_eq!(
        grouped.a.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![1, 3]
    );
    assert!(grouped.b.is_empty());
    assert_eq!(grouped.c[0].id, 2);
}

// ---------------------------------------------------------------------------
// Workflow serialization
// ---------------------------------------------------------------------------

#[test]
fn workflow_serializes_synonym_fields_with_equal_values() {
    let wf = sample_workflow();
    let value = serde_json::to_value(&wf).unwrap();

    assert_eq!(value["summary"], value["app_summary"]);
    assert_eq!(value["summary"], json!("a sample app"));
    assert_eq!(value["steps"], value["build_steps"]);
    assert_eq!(value["steps"].as_array().unwrap().len(), 2);

    // step prompts keep the historical wire name
    assert!(value["steps"][0].get("replit_prompt").is_some());
    assert!(value["steps"][0].get("prompt").is_none());
}

#[test]
fn workflow_round_trips_through_json() {
    let wf = sample_workflow();
    let text = serde_json::to_string(&wf).unwrap();
    let back: Workflow = serde_json::from_str(&text).unwrap();
    assert_eq!(wf, back);
}

#[test]
fn workflow_deserializes_from_either_synonym() {
    let wf = sample_workflow();
    let mut value = serde_json::to_value(&wf).unwrap();

    // keep only the historical names
    value.as_object_mut().unwrap().remove("summary");
    value.as_object_mut().unwrap().remove("steps");

    let back: Workflow = serde_json::from_value(value).unwrap();
    assert_eq!(back.summary, wf.summary);
    assert_eq!(back.steps, wf.steps);
}

// ---------------------------------------------------------------------------
// Blueprint leniency
// ---------------------------------------------------------------------------

#[test]
fn blueprint_from_non_object_is_empty() {
    assert_eq!(Blueprint::from_value(json!(42)), Blueprint::default());
    assert_eq!(Blueprint::from_value(json!("nope")), Blueprint::default());
    assert_eq!(Blueprint::from_json("not json at all"), Blueprint::default());
}

#[test]
fn blueprint_coerces_scalars_to_strings() {
    let bp = Blueprint::from_value(json!({
        "phases": [{"steps": [{"title": 42, "area": true}]}]
    }));
    let step = &bp.phases[0].steps[0];
    assert_eq!(step.title.as_deref(), Some("42"));
    assert_eq!(step.area.as_deref(), Some("true"));
}

#[test]
fn blueprint_treats_empty_strings_as_missing() {
    let bp = Blueprint::from_value(json!({
        "summary": "",
        "phases": [{"steps": [{"title": "", "area": ""}]}]
    }));
    assert_eq!(bp.summary_text(), None);
    let step = &bp.phases[0].steps[0];
    assert_eq!(step.title, None);
    assert_eq!(step.area_text(), "feature");
}

#[test]
fn blueprint_drops_wrong_typed_sequences() {
    let bp = Blueprint::from_value(json!({
        "phases": "not a list",
        "user_flow": {"also": "wrong"},
    }));
    assert!(bp.phases.is_empty());
    assert!(bp.user_flow.is_empty());
}

#[test]
fn blueprint_ignores_nonpositive_estimates() {
    let bp = Blueprint::from_value(json!({
        "phases": [{"steps": [
            {"title": "A", "estimated_minutes": 0},
            {"title": "B", "estimated_minutes": -5},
            {"title": "C", "estimated_minutes": 45},
            {"title": "D", "estimated_minutes": "30"},
        ]}]
    }));
    let steps = &bp.phases[0].steps;
    assert_eq!(steps[0].estimated_minutes, None);
    assert_eq!(steps[1].estimated_minutes, None);
    assert_eq!(steps[2].estimated_minutes, Some(45));
    assert_eq!(steps[3].estimated_minutes, Some(30));
}

#[test]
fn blueprint_summary_synonyms_chain() {
    let bp = Blueprint::from_value(json!({"app_summary": "via synonym"}));
    assert_eq!(bp.summary_text(), Some("via synonym"));

    let bp = Blueprint::from_value(json!({"summary": "primary", "app_summary": "secondary"}));
    assert_eq!(bp.summary_text(), Some("primary"));
}

#[test]
fn blueprint_phase_id_must_be_a_string() {
    let bp = Blueprint::from_value(json!({
        "phases": [{"id": 7, "steps": [{"title": "One"}]}]
    }));
    assert_eq!(bp.phases[0].id, None);
}

#[test]
fn blueprint_non_object_step_entries_become_defaults() {
    let bp = Blueprint::from_value(json!({
        "phases": [{"steps": ["just a string", {"title": "Real"}]}]
    }));
    let steps = &bp.phases[0].steps;
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].title, None);
    assert_eq!(steps[1].title.as_deref(), Some("Real"));
}

// ---------------------------------------------------------------------------
// Plan records
// ---------------------------------------------------------------------------

#[test]
fn plan_summary_reflects_workflow_progress() {
    let mut workflow = sample_workflow();
    engine::update_step_status(&mut workflow, 1, StepStatus::Completed);

    let record = PlanRecord {
        id: 7,
        idea: "sample idea".to_string(),
        source_url: None,
        workflow,
        created_at: Timestamp::from_second(1_700_000_000).unwrap(),
        updated_at: Timestamp::from_second(1_700_000_100).unwrap(),
    };

    let summary = PlanSummary::from(&record);
    assert_eq!(summary.id, 7);
    assert_eq!(summary.total_steps, 2);
    assert_eq!(summary.completed_steps, 1);
    assert_eq!(summary.percent, 50);
    assert_eq!(summary.summary, "a sample app");
}
