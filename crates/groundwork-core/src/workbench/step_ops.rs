//! Step-level operations for the Workbench.

use tokio::task;

use super::Workbench;
use crate::{
    db::Database,
    engine,
    error::{GroundworkError, Result},
    models::{StepRun, Workflow, WorkflowStep},
    params::{FixPrompt, Id, StepRef, UpdateStep},
    prompt,
};

impl Workbench {
    /// Applies a step status transition and persists the recomputed
    /// workflow.
    ///
    /// An unknown step id leaves the step list untouched (the engine treats
    /// it as a silent no-op) but derived fields are still refreshed and the
    /// row rewritten. Returns the workflow as stored.
    pub async fn update_step(&self, params: &UpdateStep) -> Result<Workflow> {
        let status = params.validate()?;
        let db_path = self.db_path.clone();
        let plan_id = params.plan_id;
        let step_id = params.step_id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let record = db
                .get_plan(plan_id)?
                .ok_or(GroundworkError::PlanNotFound { id: plan_id })?;

            let mut workflow = record.workflow;
            engine::update_step_status(&mut workflow, step_id, status);
            db.update_workflow(plan_id, &workflow)?;
            Ok(workflow)
        })
        .await
        .map_err(|e| GroundworkError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// The first non-completed step of a plan with its ready-to-paste
    /// prompt, or None when everything is done.
    pub async fn next_step(&self, params: &Id) -> Result<Option<(WorkflowStep, String)>> {
        let record = self
            .get_plan(params)
            .await?
            .ok_or(GroundworkError::PlanNotFound { id: params.id })?;

        Ok(record.workflow.next_open_step().map(|step| {
            let text = prompt::step_prompt(step, &record.workflow.summary);
            (step.clone(), text)
        }))
    }

    /// The stored (or freshly rendered) prompt for a specific step.
    pub async fn step_prompt(&self, params: &StepRef) -> Result<String> {
        let record = self
            .get_plan(&Id { id: params.plan_id })
            .await?
            .ok_or(GroundworkError::PlanNotFound { id: params.plan_id })?;

        let step = record
            .workflow
            .find_step(params.step_id)
            .ok_or(GroundworkError::StepNotFound {
                plan_id: params.plan_id,
                step_id: params.step_id,
            })?;

        Ok(prompt::step_prompt(step, &record.workflow.summary))
    }

    /// Renders a fix prompt for an error, anchored to a step when one is
    /// named. An unknown step id simply drops the working-context line.
    pub async fn fix_prompt(&self, params: &FixPrompt) -> Result<String> {
        let record = self
            .get_plan(&Id { id: params.plan_id })
            .await?
            .ok_or(GroundworkError::PlanNotFound { id: params.plan_id })?;

        let step = params
            .step_id
            .and_then(|id| record.workflow.find_step(id));

        Ok(prompt::fix_prompt(&params.error, step))
    }

    /// Records the output of replaying one step.
    pub async fn record_step_run(
        &self,
        plan_id: u64,
        step_id: u32,
        output: Option<String>,
    ) -> Result<StepRun> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.insert_step_run(plan_id, step_id, output.as_deref())
        })
        .await
        .map_err(|e| GroundworkError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves the replay history for a plan, oldest first.
    pub async fn step_runs(&self, params: &Id) -> Result<Vec<StepRun>> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_step_runs(plan_id)
        })
        .await
        .map_err(|e| GroundworkError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
