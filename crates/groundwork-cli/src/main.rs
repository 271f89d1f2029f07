//! Groundwork CLI Application
//!
//! Command-line interface for the groundwork guided build-plan tool.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use groundwork_core::WorkbenchBuilder;
use log::info;
use mcp::{run_stdio_server, GroundworkMcpServer};
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let workbench = WorkbenchBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize workbench")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Groundwork started");

    match command {
        Some(Commands::Plan { command }) => {
            Cli::new(workbench, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Commands::Step { command }) => {
            Cli::new(workbench, renderer)
                .handle_step_command(command)
                .await
        }
        Some(Commands::Analyze(args)) => Cli::new(workbench, renderer).analyze(args).await,
        Some(Commands::Serve) => {
            info!("Starting Groundwork MCP server");
            run_stdio_server(GroundworkMcpServer::new(workbench))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(workbench, renderer).list_plans().await,
    }
}
