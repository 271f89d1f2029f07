//! MCP server implementation for Groundwork
//!
//! Exposes the guided build-plan workflow over the Model Context Protocol
//! so coding assistants can generate plans, pull the next step's prompt,
//! and report completion directly.

use std::sync::Arc;

use anyhow::Result;
use groundwork_core::Workbench;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

// Re-export parameter types and result type from handlers for external use
pub use handlers::{
    DeletePlan, FixPrompt, Id, ListPlans, McpResult, PlanFromIdea, PlanFromUrl, StepRef,
    UpdateStep,
};

/// MCP server for Groundwork
#[derive(Clone)]
pub struct GroundworkMcpServer {
    workbench: Arc<Mutex<Workbench>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GroundworkMcpServer {
    /// Create a new Groundwork MCP server
    pub fn new(workbench: Workbench) -> Self {
        Self {
            workbench: Arc::new(Mutex::new(workbench)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "create_plan",
        description = "Generate a guided build plan from a free-text app idea. The idea is sent to the LLM, which returns a blueprint of phased steps; the assembled workflow (steps, phases, progress, prompts) is stored and returned with its plan ID."
    )]
    async fn create_plan(&self, params: Parameters<PlanFromIdea>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.workbench.clone());
        handlers.create_plan(params).await
    }

    #[tool(
        name = "plan_from_url",
        description = "Scrape a webpage, run a shallow structural analysis of its HTML (title, meta description, headings, issues), derive an idea from the page, and generate a stored build plan for it. Returns the analysis report plus the new plan."
    )]
    async fn plan_from_url(&self, params: Parameters<PlanFromUrl>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.workbench.clone());
        handlers.plan_from_url(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List all stored build plans with their idea, summary, and completion percentage. Use this to find a plan ID before working with steps."
    )]
    async fn list_plans(&self, params: Parameters<ListPlans>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.workbench.clone());
        handlers.list_plans(params).await
    }

    #[tool(
        name = "show_plan",
        description = "Display a build plan in full: summary, current phase card, per-phase progress, and every step with its status, area, priority, and validation checks."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.workbench.clone());
        handlers.show_plan(params).await
    }

    #[tool(
        name = "delete_plan",
        description = "Permanently delete a build plan and its replay history. This cannot be undone; 'confirmed' must be true."
    )]
    async fn delete_plan(&self, params: Parameters<DeletePlan>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.workbench.clone());
        handlers.delete_plan(params).await
    }

    #[tool(
        name = "next_step",
        description = "Get the first non-completed step of a plan together with its ready-to-paste prompt. Work the step, then report completion with update_step."
    )]
    async fn next_step(&self, params: Parameters<Id>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.workbench.clone());
        handlers.next_step(params).await
    }

    #[tool(
        name = "update_step",
        description = "Set a step's status ('pending', 'in_progress', or 'completed') and recompute the plan's progress, phase transitions, and testing gate. Returns the full recomputed workflow as a {success, error, workflow} JSON envelope."
    )]
    async fn update_step(&self, params: Parameters<UpdateStep>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.workbench.clone());
        handlers.update_step(params).await
    }

    #[tool(
        name = "step_prompt",
        description = "Get the stored ready-to-paste prompt for one specific step of a plan."
    )]
    async fn step_prompt(&self, params: Parameters<StepRef>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.workbench.clone());
        handlers.step_prompt(params).await
    }

    #[tool(
        name = "fix_prompt",
        description = "Render a focused 'fix this error' prompt for a plan, optionally anchored to the step being worked on. The error text is embedded (capped at 400 characters) along with minimal-change rules."
    )]
    async fn fix_prompt(&self, params: Parameters<FixPrompt>) -> McpResult {
        let handlers = handlers::McpHandlers::new(self.workbench.clone());
        handlers.fix_prompt(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for GroundworkMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "groundwork".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"Groundwork turns app ideas into guided build plans: phased lists of small steps, each carrying a ready-to-paste prompt, with derived progress tracking.

## Core Concepts
- **Plans**: one stored workflow per idea (or scraped page), identified by plan ID
- **Steps**: numbered units of work with status (pending/in_progress/completed), area, priority bucket (A/B/C), and a prompt
- **Phases**: named groups of steps; completing steps advances the current-phase card and unlocks testing at 70%

## Typical Workflow
1. `create_plan` with the user's idea (or `plan_from_url` for an existing page)
2. `next_step` to get the first open step and its prompt
3. Do the work, then `update_step` with status 'completed'
4. Repeat until `next_step` reports everything is done
5. When something breaks, `fix_prompt` renders a minimal-change repair instruction

## Notes
- `update_step` returns the whole recomputed workflow; progress fields are never stale
- Unknown step IDs are ignored silently, matching the historical JSON consumers
- `create_plan` and `plan_from_url` need OPENAI_API_KEY in the server's environment"#
                    .to_string(),
            ),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: GroundworkMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Groundwork MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    // Set up signal handlers for graceful shutdown
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
