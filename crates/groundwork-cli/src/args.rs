use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AnalyzeArgs, PlanCommands, StepCommands};

/// Main command-line interface for the Groundwork build-plan tool
///
/// Groundwork turns an app idea (or a scraped webpage) into a guided build
/// plan: small development steps grouped into phases, each with a
/// ready-to-paste prompt for an AI pair-programmer. Plans are stored
/// locally and replayed step by step, from this CLI or over MCP.
#[derive(Parser)]
#[command(version, about, name = "gw")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/groundwork/groundwork.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Groundwork CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage build plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Work through the steps of a plan
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Fetch a webpage and report its shallow HTML structure
    Analyze(AnalyzeArgs),
    /// Start the MCP server
    Serve,
}
