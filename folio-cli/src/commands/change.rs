//! Planned-change management commands.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use folio_client::FolioClient;
use folio_core::types::{ChangeId, ChangePayload, ChangeType, PortfolioId};

/// Planned-change subcommands.
#[derive(Subcommand)]
pub enum ChangeCommands {
    /// Add a planned change to a portfolio
    Add(AddArgs),

    /// Update a planned change
    Update(UpdateArgs),

    /// Remove a planned change from a portfolio
    Delete(DeleteArgs),
}

/// Arguments for `change add`.
#[derive(Parser)]
pub struct AddArgs {
    /// Portfolio id
    portfolio: PortfolioId,

    /// Change type (contribution, withdrawal, rebalance)
    #[arg(short = 't', long, value_parser = parse_change_type)]
    change_type: ChangeType,

    /// Date the change takes effect (YYYY-MM-DD)
    #[arg(short, long)]
    date: NaiveDate,

    /// Amount in account currency (contributions and withdrawals only)
    #[arg(short, long)]
    amount: Option<Decimal>,

    /// Free-form description
    #[arg(long)]
    description: Option<String>,
}

/// Arguments for `change update`.
#[derive(Parser)]
pub struct UpdateArgs {
    /// Portfolio id
    portfolio: PortfolioId,

    /// Change id
    id: ChangeId,

    /// Change type (contribution, withdrawal, rebalance)
    #[arg(short = 't', long, value_parser = parse_change_type)]
    change_type: ChangeType,

    /// Date the change takes effect (YYYY-MM-DD)
    #[arg(short, long)]
    date: NaiveDate,

    /// Amount in account currency (contributions and withdrawals only)
    #[arg(short, long)]
    amount: Option<Decimal>,

    /// Free-form description
    #[arg(long)]
    description: Option<String>,
}

/// Arguments for `change delete`.
#[derive(Parser)]
pub struct DeleteArgs {
    /// Portfolio id
    portfolio: PortfolioId,

    /// Change id
    id: ChangeId,
}

fn parse_change_type(raw: &str) -> Result<ChangeType> {
    Ok(match raw.to_lowercase().as_str() {
        "contribution" => ChangeType::Contribution,
        "withdrawal" => ChangeType::Withdrawal,
        "rebalance" => ChangeType::Rebalance,
        other => bail!("unknown change type '{other}'"),
    })
}

/// Executes a planned-change command.
pub async fn run(client: &FolioClient, command: ChangeCommands) -> Result<()> {
    match command {
        ChangeCommands::Add(args) => {
            let payload = ChangePayload {
                change_type: args.change_type,
                change_date: args.date,
                amount: args.amount,
                description: args.description,
            };
            let change = client.changes().create(args.portfolio, &payload).await?;
            println!(
                "Added {} on {} ({})",
                change.change_type, change.change_date, change.id
            );
        }
        ChangeCommands::Update(args) => {
            let payload = ChangePayload {
                change_type: args.change_type,
                change_date: args.date,
                amount: args.amount,
                description: args.description,
            };
            let change = client
                .changes()
                .update(args.portfolio, args.id, &payload)
                .await?;
            println!(
                "Updated {} on {} ({})",
                change.change_type, change.change_date, change.id
            );
        }
        ChangeCommands::Delete(args) => {
            client.changes().delete(args.portfolio, args.id).await?;
            println!("Deleted planned change {}", args.id);
        }
    }
    Ok(())
}
