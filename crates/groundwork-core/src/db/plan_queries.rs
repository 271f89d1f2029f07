//! Build-plan CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, GroundworkError, Result},
    models::{PlanRecord, StepRun, Workflow},
};

const INSERT_PLAN_SQL: &str = "INSERT INTO build_plans (idea, source_url, workflow, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_PLAN_BY_ID_SQL: &str =
    "SELECT id, idea, source_url, workflow, created_at, updated_at FROM build_plans WHERE id = ?1";
const SELECT_ALL_PLANS_SQL: &str =
    "SELECT id, idea, source_url, workflow, created_at, updated_at FROM build_plans ORDER BY id";
const UPDATE_WORKFLOW_SQL: &str =
    "UPDATE build_plans SET workflow = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_PLAN_SQL: &str = "DELETE FROM build_plans WHERE id = ?1";
const INSERT_STEP_RUN_SQL: &str =
    "INSERT INTO step_runs (plan_id, step_id, output, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_STEP_RUNS_SQL: &str =
    "SELECT id, plan_id, step_id, output, created_at FROM step_runs WHERE plan_id = ?1 ORDER BY id";

impl super::Database {
    /// Helper function to construct a PlanRecord from a database row
    fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<PlanRecord> {
        let workflow_json: String = row.get(3)?;
        let workflow: Workflow = serde_json::from_str(&workflow_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e))
        })?;

        Ok(PlanRecord {
            id: row.get::<_, i64>(0)? as u64,
            idea: row.get(1)?,
            source_url: row.get(2)?,
            workflow,
            created_at: row.get::<_, String>(4)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(5)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
            })?,
        })
    }

    fn build_step_run_from_row(row: &rusqlite::Row) -> rusqlite::Result<StepRun> {
        Ok(StepRun {
            id: row.get::<_, i64>(0)? as u64,
            plan_id: row.get::<_, i64>(1)? as u64,
            step_id: row.get::<_, i64>(2)? as u32,
            output: row.get(3)?,
            created_at: row.get::<_, String>(4)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Inserts a new build plan with its assembled workflow.
    pub fn insert_plan(
        &mut self,
        idea: &str,
        source_url: Option<&str>,
        workflow: &Workflow,
    ) -> Result<PlanRecord> {
        let workflow_json = serde_json::to_string(workflow)?;
        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_PLAN_SQL,
                params![idea, source_url, &workflow_json, &now_str, &now_str],
            )
            .db_context("Failed to insert build plan")?;

        let id = self.connection.last_insert_rowid() as u64;

        Ok(PlanRecord {
            id,
            idea: idea.to_string(),
            source_url: source_url.map(String::from),
            workflow: workflow.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a single build plan by its ID.
    pub fn get_plan(&self, plan_id: u64) -> Result<Option<PlanRecord>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_BY_ID_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![plan_id as i64], Self::build_plan_from_row)
            .optional()
            .db_context("Failed to get build plan")
    }

    /// Retrieves all build plans, oldest first.
    pub fn list_plans(&self) -> Result<Vec<PlanRecord>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ALL_PLANS_SQL)
            .db_context("Failed to prepare query")?;

        let plans = stmt
            .query_map([], Self::build_plan_from_row)
            .db_context("Failed to query build plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch build plans")?;

        Ok(plans)
    }

    /// Replaces a plan's stored workflow and bumps its update timestamp.
    pub fn update_workflow(&mut self, plan_id: u64, workflow: &Workflow) -> Result<()> {
        let workflow_json = serde_json::to_string(workflow)?;
        let now_str = Timestamp::now().to_string();

        let changed = self
            .connection
            .execute(UPDATE_WORKFLOW_SQL, params![&workflow_json, &now_str, plan_id as i64])
            .db_context("Failed to update workflow")?;

        if changed == 0 {
            return Err(GroundworkError::PlanNotFound { id: plan_id });
        }
        Ok(())
    }

    /// Removes a build plan and its replay history. Returns the deleted
    /// record, or None when no plan matched.
    pub fn delete_plan(&mut self, plan_id: u64) -> Result<Option<PlanRecord>> {
        let Some(record) = self.get_plan(plan_id)? else {
            return Ok(None);
        };

        self.connection
            .execute(DELETE_PLAN_SQL, params![plan_id as i64])
            .db_context("Failed to delete build plan")?;

        Ok(Some(record))
    }

    /// Records the output of replaying one step.
    pub fn insert_step_run(
        &mut self,
        plan_id: u64,
        step_id: u32,
        output: Option<&str>,
    ) -> Result<StepRun> {
        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_STEP_RUN_SQL,
                params![plan_id as i64, step_id as i64, output, &now_str],
            )
            .db_context("Failed to insert step run")?;

        Ok(StepRun {
            id: self.connection.last_insert_rowid() as u64,
            plan_id,
            step_id,
            output: output.map(String::from),
            created_at: now,
        })
    }

    /// Retrieves the replay history for a plan, oldest first.
    pub fn get_step_runs(&self, plan_id: u64) -> Result<Vec<StepRun>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEP_RUNS_SQL)
            .db_context("Failed to prepare query")?;

        let runs = stmt
            .query_map(params![plan_id as i64], Self::build_step_run_from_row)
            .db_context("Failed to query step runs")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch step runs")?;

        Ok(runs)
    }
}
