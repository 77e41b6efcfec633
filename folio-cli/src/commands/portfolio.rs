//! Portfolio management commands.

use anyhow::Result;
use clap::{Parser, Subcommand};

use folio_client::FolioClient;
use folio_core::types::{Portfolio, PortfolioId, PortfolioPayload};

use super::OutputFormat;

/// Portfolio subcommands.
#[derive(Subcommand)]
pub enum PortfolioCommands {
    /// List portfolios
    List(ListArgs),

    /// Show one portfolio with its assets and planned changes
    Show(ShowArgs),

    /// Create a portfolio
    Create(EditArgs),

    /// Update a portfolio's name or description
    Update(UpdateArgs),

    /// Delete a portfolio
    Delete(IdArg),
}

/// Arguments for `portfolio list`.
#[derive(Parser)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

/// Arguments for `portfolio show`.
#[derive(Parser)]
pub struct ShowArgs {
    /// Portfolio id
    id: PortfolioId,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

/// Name/description pair for `portfolio create`.
#[derive(Parser)]
pub struct EditArgs {
    /// Display name
    #[arg(short, long)]
    name: String,

    /// Free-form description
    #[arg(short, long)]
    description: Option<String>,
}

/// Arguments for `portfolio update`.
#[derive(Parser)]
pub struct UpdateArgs {
    /// Portfolio id
    id: PortfolioId,

    /// Display name
    #[arg(short, long)]
    name: String,

    /// Free-form description
    #[arg(short, long)]
    description: Option<String>,
}

/// A bare portfolio id argument.
#[derive(Parser)]
pub struct IdArg {
    /// Portfolio id
    id: PortfolioId,
}

/// Executes a portfolio command.
pub async fn run(client: &FolioClient, command: PortfolioCommands) -> Result<()> {
    match command {
        PortfolioCommands::List(args) => {
            let portfolios = client.portfolios().list().await?;
            match args.output {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&portfolios)?);
                }
                OutputFormat::Table => {
                    println!("{:<6} {:<30} {}", "ID", "NAME", "DESCRIPTION");
                    for p in &portfolios {
                        println!(
                            "{:<6} {:<30} {}",
                            p.id,
                            p.name,
                            p.description.as_deref().unwrap_or("-")
                        );
                    }
                }
            }
        }
        PortfolioCommands::Show(args) => {
            let portfolio = client.portfolios().get(args.id).await?;
            match args.output {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&portfolio)?);
                }
                OutputFormat::Table => print_portfolio(&portfolio),
            }
        }
        PortfolioCommands::Create(args) => {
            let payload = PortfolioPayload {
                name: args.name,
                description: args.description,
            };
            let portfolio = client.portfolios().create(&payload).await?;
            println!("Created portfolio {} ({})", portfolio.name, portfolio.id);
        }
        PortfolioCommands::Update(args) => {
            let payload = PortfolioPayload {
                name: args.name,
                description: args.description,
            };
            let portfolio = client.portfolios().update(args.id, &payload).await?;
            println!("Updated portfolio {} ({})", portfolio.name, portfolio.id);
        }
        PortfolioCommands::Delete(args) => {
            client.portfolios().delete(args.id).await?;
            println!("Deleted portfolio {}", args.id);
        }
    }
    Ok(())
}

fn print_portfolio(portfolio: &Portfolio) {
    println!("Portfolio {} - {}", portfolio.id, portfolio.name);
    if let Some(description) = &portfolio.description {
        println!("  {description}");
    }

    println!();
    println!("Assets:");
    if portfolio.assets.is_empty() {
        println!("  (none)");
    } else {
        println!("  {:<6} {:<8} {:<20} {:>10}", "ID", "TYPE", "NAME", "TARGET %");
        for asset in &portfolio.assets {
            println!(
                "  {:<6} {:<8} {:<20} {:>10}",
                asset.id,
                asset.asset_type.to_string(),
                asset.name_or_ticker,
                asset.reported_percentage()
            );
        }
    }

    println!();
    println!("Planned changes:");
    if portfolio.planned_changes.is_empty() {
        println!("  (none)");
    } else {
        for change in &portfolio.planned_changes {
            let amount = change
                .amount
                .map_or_else(|| "-".to_string(), |a| a.to_string());
            println!(
                "  {:<6} {:<13} {} {:>12}  {}",
                change.id,
                change.change_type.to_string(),
                change.change_date,
                amount,
                change.description.as_deref().unwrap_or("")
            );
        }
    }
}
