use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::models::{Blueprint, StepStatus};
use crate::params::{DeletePlan, Id, UpdateStep};

async fn test_workbench() -> (TempDir, Workbench) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let workbench = WorkbenchBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create workbench");
    (temp_dir, workbench)
}

fn two_step_blueprint() -> Blueprint {
    Blueprint::from_value(json!({
        "summary": "test app",
        "phases": [{"steps": [
            {"title": "One", "area": "backend"},
            {"title": "Two", "area": "ux"},
        ]}]
    }))
}

#[tokio::test]
async fn create_plan_assembles_and_stores_workflow() {
    let (_tmp, workbench) = test_workbench().await;

    let record = workbench
        .create_plan("an idea".to_string(), None, &two_step_blueprint())
        .await
        .expect("Failed to create plan");

    assert_eq!(record.id, 1);
    assert_eq!(record.workflow.progress.total, 2);
    assert_eq!(record.workflow.summary, "test app");

    let loaded = workbench
        .get_plan(&Id { id: record.id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(loaded.workflow, record.workflow);
}

#[tokio::test]
async fn empty_blueprint_stores_fallback_workflow() {
    let (_tmp, workbench) = test_workbench().await;

    let record = workbench
        .create_plan("bare idea".to_string(), None, &Blueprint::default())
        .await
        .expect("Failed to create plan");

    assert_eq!(record.workflow.steps.len(), 1);
    assert_eq!(record.workflow.steps[0].title, "Set up your project");
}

#[tokio::test]
async fn update_step_persists_recomputed_state() {
    let (_tmp, workbench) = test_workbench().await;
    let record = workbench
        .create_plan("an idea".to_string(), None, &two_step_blueprint())
        .await
        .expect("Failed to create plan");

    let workflow = workbench
        .update_step(&UpdateStep {
            plan_id: record.id,
            step_id: 1,
            status: "completed".to_string(),
        })
        .await
        .expect("Failed to update step");
    assert_eq!(workflow.progress.completed, 1);

    let reloaded = workbench
        .get_plan(&Id { id: record.id })
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(reloaded.workflow.progress.completed, 1);
    assert_eq!(reloaded.workflow.steps[0].status, StepStatus::Completed);
}

#[tokio::test]
async fn delete_plan_requires_confirmation() {
    let (_tmp, workbench) = test_workbench().await;
    let record = workbench
        .create_plan("an idea".to_string(), None, &Blueprint::default())
        .await
        .expect("Failed to create plan");

    let unconfirmed = workbench
        .delete_plan(&DeletePlan {
            id: record.id,
            confirmed: false,
        })
        .await;
    assert!(unconfirmed.is_err());

    let deleted = workbench
        .delete_plan(&DeletePlan {
            id: record.id,
            confirmed: true,
        })
        .await
        .expect("Failed to delete plan");
    assert!(deleted.is_some());

    let gone = workbench
        .get_plan(&Id { id: record.id })
        .await
        .expect("Failed to get plan");
    assert!(gone.is_none());
}
