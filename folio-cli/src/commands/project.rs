//! Projection command.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::Parser;
use rust_decimal::Decimal;

use folio_client::FolioClient;
use folio_core::types::{PortfolioId, ProjectionRequest};

use super::OutputFormat;

/// Arguments for `project`.
#[derive(Parser)]
pub struct ProjectArgs {
    /// Portfolio id
    #[arg(short, long)]
    portfolio: PortfolioId,

    /// Projection start date (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Projection end date (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,

    /// Current total portfolio value in account currency
    #[arg(short, long)]
    initial: Decimal,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

/// Runs a backend projection and prints the resulting series.
pub async fn run(client: &FolioClient, args: ProjectArgs) -> Result<()> {
    if args.end <= args.start {
        bail!("end date must be after start date");
    }

    let request = ProjectionRequest {
        start_date: args.start,
        end_date: args.end,
        initial_total_value: args.initial,
    };
    let points = client.projection().run(args.portfolio, &request).await?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
        OutputFormat::Table => {
            if points.is_empty() {
                println!("(empty series)");
                return Ok(());
            }
            println!("{:<12} {:>16}", "DATE", "VALUE");
            for point in &points {
                println!("{:<12} {:>16}", point.date.to_string(), point.value);
            }
        }
    }
    Ok(())
}
