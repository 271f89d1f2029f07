//! Plan-level operations for the Workbench.

use tokio::task;

use super::Workbench;
use crate::{
    db::Database,
    engine,
    error::{GroundworkError, Result},
    models::{Blueprint, PlanRecord, PlanSummary},
    params::{DeletePlan, Id},
};

impl Workbench {
    /// Assembles a workflow from a blueprint and stores it as a new plan.
    ///
    /// Assembly itself is total — malformed blueprints become the fallback
    /// workflow — so the only failure modes here are persistence ones.
    pub async fn create_plan(
        &self,
        idea: String,
        source_url: Option<String>,
        blueprint: &Blueprint,
    ) -> Result<PlanRecord> {
        let workflow = engine::create_workflow(blueprint, &idea);
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.insert_plan(&idea, source_url.as_deref(), &workflow)
        })
        .await
        .map_err(|e| GroundworkError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a stored plan by ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<PlanRecord>> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_plan(plan_id)
        })
        .await
        .map_err(|e| GroundworkError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists all stored plans as summaries with progress counters.
    pub async fn list_plans(&self) -> Result<Vec<PlanSummary>> {
        let db_path = self.db_path.clone();

        let records = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_plans()
        })
        .await
        .map_err(|e| GroundworkError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(records.iter().map(PlanSummary::from).collect())
    }

    /// Permanently deletes a plan and its replay history.
    ///
    /// Refuses to act unless the deletion is confirmed. Returns the deleted
    /// record, or None when no plan matched.
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Option<PlanRecord>> {
        if !params.confirmed {
            return Err(GroundworkError::InvalidInput {
                field: "confirmed".to_string(),
                reason: "Deletion must be explicitly confirmed".to_string(),
            });
        }

        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_plan(plan_id)
        })
        .await
        .map_err(|e| GroundworkError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
