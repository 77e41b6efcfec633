//! # Folio CLI
//!
//! Command-line interface for the Folio portfolio planner.
//!
//! This CLI provides commands for:
//! - Authentication (register, login, logout)
//! - Portfolio, asset, and planned-change management
//! - Editing and saving target allocations
//! - Running backend projections

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use commands::{alloc, asset, auth, change, portfolio, project};

/// Folio - portfolio planning client
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "folio.yaml")]
    config: String,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Authentication commands
    #[command(subcommand)]
    Auth(auth::AuthCommands),

    /// Portfolio management commands
    #[command(subcommand)]
    Portfolio(portfolio::PortfolioCommands),

    /// Asset management commands
    #[command(subcommand)]
    Asset(asset::AssetCommands),

    /// Planned-change management commands
    #[command(subcommand)]
    Change(change::ChangeCommands),

    /// Allocation editing commands
    #[command(subcommand)]
    Alloc(alloc::AllocCommands),

    /// Run a projection
    Project(project::ProjectArgs),
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let client = commands::build_client(&cli.config)?;

    match cli.command {
        Commands::Auth(cmd) => auth::run(&client, cmd).await?,
        Commands::Portfolio(cmd) => portfolio::run(&client, cmd).await?,
        Commands::Asset(cmd) => asset::run(&client, cmd).await?,
        Commands::Change(cmd) => change::run(&client, cmd).await?,
        Commands::Alloc(cmd) => alloc::run(&client, cmd).await?,
        Commands::Project(args) => project::run(&client, args).await?,
    }

    Ok(())
}
