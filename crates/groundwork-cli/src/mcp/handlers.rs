//! MCP tool handlers implementation

use std::sync::Arc;

use groundwork_core::{
    analysis,
    display::{CreateResult, OperationStatus, PlanSummaries},
    engine::WorkflowOutcome,
    params as core,
    OpenAiClient, Workbench,
};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types with serde integration.
///
/// Wraps any core parameter type in a transparent serde container so the
/// core stays free of MCP derives while the protocol layer gets JSON
/// deserialization and schema generation.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

// Type aliases for cleaner usage in function signatures
pub type Id = McpParams<core::Id>;
pub type ListPlans = McpParams<core::ListPlans>;
pub type PlanFromIdea = McpParams<core::PlanFromIdea>;
pub type PlanFromUrl = McpParams<core::PlanFromUrl>;
pub type DeletePlan = McpParams<core::DeletePlan>;
pub type StepRef = McpParams<core::StepRef>;
pub type UpdateStep = McpParams<core::UpdateStep>;
pub type FixPrompt = McpParams<core::FixPrompt>;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Handler implementations for the MCP server
pub struct McpHandlers {
    workbench: Arc<Mutex<Workbench>>,
}

impl McpHandlers {
    pub fn new(workbench: Arc<Mutex<Workbench>>) -> Self {
        Self { workbench }
    }

    fn ai_client() -> Result<OpenAiClient, ErrorData> {
        OpenAiClient::from_env().map_err(|e| to_mcp_error("LLM unavailable", &e))
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<PlanFromIdea>) -> McpResult {
        debug!("create_plan: {:?}", params);
        let idea = &params.as_ref().idea;

        let blueprint = Self::ai_client()?
            .generate_blueprint(idea)
            .await
            .map_err(|e| to_mcp_error("Failed to generate blueprint", &e))?;

        let record = self
            .workbench
            .lock()
            .await
            .create_plan(idea.clone(), None, &blueprint)
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;

        let result = CreateResult::new(record);
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn plan_from_url(&self, Parameters(params): Parameters<PlanFromUrl>) -> McpResult {
        debug!("plan_from_url: {:?}", params);
        let url = &params.as_ref().url;

        let page = analysis::fetch_page(url)
            .await
            .map_err(|e| to_mcp_error("Failed to fetch page", &e))?;
        let page_analysis = analysis::analyse(&page.html);
        let idea = page_analysis.idea_text(url);

        let blueprint = Self::ai_client()?
            .generate_blueprint(&idea)
            .await
            .map_err(|e| to_mcp_error("Failed to generate blueprint", &e))?;

        let record = self
            .workbench
            .lock()
            .await
            .create_plan(idea, Some(url.clone()), &blueprint)
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;

        let text = format!("{page_analysis}\n{}", CreateResult::new(record));
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    pub async fn list_plans(&self, Parameters(params): Parameters<ListPlans>) -> McpResult {
        debug!("list_plans: {:?}", params);

        let summaries = self
            .workbench
            .lock()
            .await
            .list_plans()
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        let summaries = PlanSummaries(summaries);
        let result = if summaries.is_empty() {
            summaries.to_string()
        } else {
            format!("# Build Plans\n\n{summaries}")
        };
        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {:?}", params);

        let record = self
            .workbench
            .lock()
            .await
            .get_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Build plan with ID {} not found", params.as_ref().id),
                    None,
                )
            })?;

        Ok(CallToolResult::success(vec![Content::text(
            record.to_string(),
        )]))
    }

    pub async fn delete_plan(&self, Parameters(params): Parameters<DeletePlan>) -> McpResult {
        debug!("delete_plan: {:?}", params);
        let inner_params = params.as_ref();

        let deleted = self
            .workbench
            .lock()
            .await
            .delete_plan(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete plan", &e))?
            .ok_or_else(|| {
                ErrorData::internal_error(
                    format!("Build plan with ID {} not found", inner_params.id),
                    None,
                )
            })?;

        let result = OperationStatus::success(format!(
            "Permanently deleted build plan '{}' (ID: {}). This action cannot be undone.",
            deleted.idea, inner_params.id
        ));
        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }

    pub async fn next_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("next_step: {:?}", params);

        let next = self
            .workbench
            .lock()
            .await
            .next_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get next step", &e))?;

        let text = match next {
            Some((step, prompt)) => format!("{step}\n#### Prompt\n\n{prompt}"),
            None => "All steps completed!".to_string(),
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    pub async fn update_step(&self, Parameters(params): Parameters<UpdateStep>) -> McpResult {
        debug!("update_step: {:?}", params);

        // Returned as the {success, error, workflow} envelope the plan's
        // JSON consumers expect, rather than a protocol-level error.
        let result = self
            .workbench
            .lock()
            .await
            .update_step(params.as_ref())
            .await;
        let outcome = WorkflowOutcome::from(result);

        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| ErrorData::internal_error(format!("Failed to encode outcome: {e}"), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    pub async fn step_prompt(&self, Parameters(params): Parameters<StepRef>) -> McpResult {
        debug!("step_prompt: {:?}", params);

        let text = self
            .workbench
            .lock()
            .await
            .step_prompt(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get step prompt", &e))?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    pub async fn fix_prompt(&self, Parameters(params): Parameters<FixPrompt>) -> McpResult {
        debug!("fix_prompt: {:?}", params);

        let text = self
            .workbench
            .lock()
            .await
            .fix_prompt(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to render fix prompt", &e))?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
