//! Command-line interface definitions and handlers.
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types via `From`, keeping framework concerns out of
//! `groundwork-core` (the same wrapper pattern the MCP layer uses with
//! serde). The [`Cli`] struct owns the workbench and renderer and maps each
//! subcommand onto a core operation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use groundwork_core::{
    analysis,
    display::{CreateResult, PlanSummaries, StepRuns, UpdateResult},
    models::Blueprint,
    params::{DeletePlan, FixPrompt, Id, StepRef, UpdateStep},
    prompt, OpenAiClient, Workbench,
};
use log::info;

use crate::renderer::TerminalRenderer;

/// Create a new build plan
///
/// The blueprint comes from (in order of precedence) a JSON file, a scraped
/// webpage fed through the LLM, or the LLM directly from the idea text.
/// `--offline` skips the LLM and assembles the built-in fallback workflow,
/// which is also handy for trying the tool without an API key.
#[derive(Args)]
pub struct CreatePlanArgs {
    /// What you want to build
    pub idea: Option<String>,
    /// Scrape this page and derive the idea from its structure
    #[arg(long)]
    pub url: Option<String>,
    /// Read the blueprint from a JSON file instead of calling the LLM
    #[arg(long, value_name = "FILE")]
    pub from_file: Option<PathBuf>,
    /// Skip the LLM and use the built-in fallback blueprint
    #[arg(long)]
    pub offline: bool,
}

/// Show details of a specific plan
#[derive(Args)]
pub struct ShowPlanArgs {
    /// ID of the plan to display
    pub id: u64,
}

/// Delete a plan permanently
#[derive(Args)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Replay a plan's open steps through the LLM
///
/// Each open step's prompt is sent to the execution agent; the output is
/// recorded in the plan's run history and the step marked completed.
#[derive(Args)]
pub struct RunPlanArgs {
    /// ID of the plan to run
    pub id: u64,
    /// Stop after this many steps instead of running to completion
    #[arg(long)]
    pub limit: Option<u32>,
}

/// Print every step's ready-to-paste prompt
#[derive(Args)]
pub struct PromptsArgs {
    /// ID of the plan
    pub id: u64,
}

/// Show a plan's replay history
#[derive(Args)]
pub struct HistoryArgs {
    /// ID of the plan
    pub id: u64,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new build plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List all build plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a specific plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Delete a plan permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Replay open steps through the LLM
    Run(RunPlanArgs),
    /// Print every step's prompt
    Prompts(PromptsArgs),
    /// Show replay history
    History(HistoryArgs),
}

/// Show the next open step with its prompt
#[derive(Args)]
pub struct NextStepArgs {
    /// ID of the plan
    pub plan_id: u64,
}

/// Change a step's status
#[derive(Args)]
pub struct UpdateStepArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// ID of the step within the plan
    pub step_id: u32,
    /// New status: pending, in_progress, or completed
    pub status: String,
}

impl From<UpdateStepArgs> for UpdateStep {
    fn from(val: UpdateStepArgs) -> Self {
        UpdateStep {
            plan_id: val.plan_id,
            step_id: val.step_id,
            status: val.status,
        }
    }
}

/// Print one step's ready-to-paste prompt
#[derive(Args)]
pub struct StepPromptArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// ID of the step within the plan
    pub step_id: u32,
}

impl From<StepPromptArgs> for StepRef {
    fn from(val: StepPromptArgs) -> Self {
        StepRef {
            plan_id: val.plan_id,
            step_id: val.step_id,
        }
    }
}

/// Render a fix prompt for an error message
#[derive(Args)]
pub struct FixArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// The error message to fix
    pub error: String,
    /// Step being worked on, when known
    #[arg(long)]
    pub step_id: Option<u32>,
}

impl From<FixArgs> for FixPrompt {
    fn from(val: FixArgs) -> Self {
        FixPrompt {
            plan_id: val.plan_id,
            error: val.error,
            step_id: val.step_id,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Show the next open step with its prompt
    #[command(alias = "n")]
    Next(NextStepArgs),
    /// Change a step's status
    #[command(alias = "u")]
    Update(UpdateStepArgs),
    /// Print one step's prompt
    #[command(alias = "p")]
    Prompt(StepPromptArgs),
    /// Render a fix prompt for an error
    Fix(FixArgs),
}

/// Fetch a webpage and report its shallow HTML structure
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Page to fetch and analyse
    pub url: String,
}

/// CLI handler owning the workbench and renderer.
pub struct Cli {
    workbench: Workbench,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(workbench: Workbench, renderer: TerminalRenderer) -> Self {
        Self {
            workbench,
            renderer,
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => self.create_plan(args).await,
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => self.show_plan(args).await,
            PlanCommands::Delete(args) => self.delete_plan(args).await,
            PlanCommands::Run(args) => self.run_plan(args).await,
            PlanCommands::Prompts(args) => self.plan_prompts(args).await,
            PlanCommands::History(args) => self.plan_history(args).await,
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Next(args) => self.next_step(args).await,
            StepCommands::Update(args) => self.update_step(args).await,
            StepCommands::Prompt(args) => self.step_prompt(args).await,
            StepCommands::Fix(args) => self.fix_prompt(args).await,
        }
    }

    async fn create_plan(&self, args: CreatePlanArgs) -> Result<()> {
        let mut source_url = None;

        let (idea, blueprint) = if let Some(path) = args.from_file {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read blueprint file {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("Blueprint file {} is not JSON", path.display()))?;
            (args.idea.unwrap_or_default(), Blueprint::from_value(value))
        } else if let Some(url) = args.url {
            let page = analysis::fetch_page(&url).await?;
            let page_analysis = analysis::analyse(&page.html);
            let idea = args
                .idea
                .unwrap_or_else(|| page_analysis.idea_text(&url));
            info!("Derived idea from {url}: {idea}");

            let blueprint = if args.offline {
                Blueprint::default()
            } else {
                OpenAiClient::from_env()?.generate_blueprint(&idea).await?
            };
            source_url = Some(url);
            (idea, blueprint)
        } else {
            let idea = args
                .idea
                .context("Provide an idea, --url, or --from-file")?;
            let blueprint = if args.offline {
                Blueprint::default()
            } else {
                OpenAiClient::from_env()?.generate_blueprint(&idea).await?
            };
            (idea, blueprint)
        };

        let record = self
            .workbench
            .create_plan(idea, source_url, &blueprint)
            .await?;
        self.renderer.render(&CreateResult::new(record).to_string())
    }

    pub async fn list_plans(&self) -> Result<()> {
        let summaries = PlanSummaries(self.workbench.list_plans().await?);
        if summaries.is_empty() {
            self.renderer.render(&summaries.to_string())
        } else {
            self.renderer
                .render(&format!("# Build Plans\n\n{summaries}"))
        }
    }

    async fn show_plan(&self, args: ShowPlanArgs) -> Result<()> {
        match self.workbench.get_plan(&Id { id: args.id }).await? {
            Some(record) => self.renderer.render(&record.to_string()),
            None => self
                .renderer
                .render(&format!("Build plan {} not found.", args.id)),
        }
    }

    async fn delete_plan(&self, args: DeletePlanArgs) -> Result<()> {
        let id = args.id;
        match self.workbench.delete_plan(&args.into()).await? {
            Some(record) => self.renderer.render(&format!(
                "Deleted build plan '{}' (ID: {}). This action cannot be undone.",
                record.idea, id
            )),
            None => self
                .renderer
                .render(&format!("Build plan {id} not found.")),
        }
    }

    async fn run_plan(&self, args: RunPlanArgs) -> Result<()> {
        let client = OpenAiClient::from_env()?;
        let limit = args.limit.unwrap_or(u32::MAX);
        let mut executed = 0u32;

        while executed < limit {
            let Some((step, step_prompt)) =
                self.workbench.next_step(&Id { id: args.id }).await?
            else {
                self.renderer.render("All steps completed!")?;
                return Ok(());
            };

            self.renderer
                .render(&format!("## Step {}: {}\n", step.id, step.title))?;

            let output = client.execute_step(&step_prompt).await?;
            self.workbench
                .record_step_run(args.id, step.id, Some(output.clone()))
                .await?;
            self.workbench
                .update_step(&UpdateStep {
                    plan_id: args.id,
                    step_id: step.id,
                    status: "completed".to_string(),
                })
                .await?;

            self.renderer.render(&output)?;
            executed += 1;
        }

        self.renderer
            .render(&format!("Stopped after {executed} steps."))
    }

    async fn plan_prompts(&self, args: PromptsArgs) -> Result<()> {
        let record = self
            .workbench
            .get_plan(&Id { id: args.id })
            .await?
            .with_context(|| format!("Build plan {} not found", args.id))?;

        let mut output = String::new();
        for (step_id, text) in prompt::all_prompts(&record.workflow) {
            output.push_str(&format!("## Step {step_id}\n\n```\n{text}\n```\n\n"));
        }
        self.renderer.render(&output)
    }

    async fn plan_history(&self, args: HistoryArgs) -> Result<()> {
        let runs = StepRuns(self.workbench.step_runs(&Id { id: args.id }).await?);
        self.renderer.render(&runs.to_string())
    }

    async fn next_step(&self, args: NextStepArgs) -> Result<()> {
        match self.workbench.next_step(&Id { id: args.plan_id }).await? {
            Some((step, step_prompt)) => self.renderer.render(&format!(
                "{step}\n#### Prompt\n\n```\n{step_prompt}\n```\n"
            )),
            None => self.renderer.render("All steps completed!"),
        }
    }

    async fn update_step(&self, args: UpdateStepArgs) -> Result<()> {
        let plan_id = args.plan_id;
        let workflow = self.workbench.update_step(&args.into()).await?;
        self.renderer
            .render(&UpdateResult::new(plan_id, workflow).to_string())
    }

    async fn step_prompt(&self, args: StepPromptArgs) -> Result<()> {
        let text = self.workbench.step_prompt(&args.into()).await?;
        self.renderer.render(&format!("```\n{text}\n```\n"))
    }

    async fn fix_prompt(&self, args: FixArgs) -> Result<()> {
        let text = self.workbench.fix_prompt(&args.into()).await?;
        self.renderer.render(&format!("```\n{text}\n```\n"))
    }

    pub async fn analyze(&self, args: AnalyzeArgs) -> Result<()> {
        let page = analysis::fetch_page(&args.url).await?;
        let page_analysis = analysis::analyse(&page.html);
        self.renderer.render(&page_analysis.to_string())
    }
}
