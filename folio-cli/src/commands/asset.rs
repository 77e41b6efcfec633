//! Asset management commands.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use folio_client::FolioClient;
use folio_core::types::{AssetId, AssetPayload, AssetType, PortfolioId};

/// Asset subcommands.
#[derive(Subcommand)]
pub enum AssetCommands {
    /// Add an asset to a portfolio
    Add(AddArgs),

    /// Update an asset
    Update(UpdateArgs),

    /// Remove an asset from a portfolio
    Delete(DeleteArgs),
}

/// Arguments for `asset add`.
#[derive(Parser)]
pub struct AddArgs {
    /// Portfolio id
    portfolio: PortfolioId,

    /// Asset type (stock, etf, bond, crypto, cash, other)
    #[arg(short = 't', long, value_parser = parse_asset_type)]
    asset_type: AssetType,

    /// Display name or ticker symbol
    #[arg(short, long)]
    name: String,

    /// Target allocation percentage
    #[arg(short, long)]
    allocation: Option<Decimal>,

    /// Manual expected annual return, in percent
    #[arg(short, long)]
    expected_return: Option<Decimal>,
}

/// Arguments for `asset update`.
#[derive(Parser)]
pub struct UpdateArgs {
    /// Portfolio id
    portfolio: PortfolioId,

    /// Asset id
    id: AssetId,

    /// Asset type (stock, etf, bond, crypto, cash, other)
    #[arg(short = 't', long, value_parser = parse_asset_type)]
    asset_type: AssetType,

    /// Display name or ticker symbol
    #[arg(short, long)]
    name: String,

    /// Target allocation percentage
    #[arg(short, long)]
    allocation: Option<Decimal>,

    /// Manual expected annual return, in percent
    #[arg(short, long)]
    expected_return: Option<Decimal>,
}

/// Arguments for `asset delete`.
#[derive(Parser)]
pub struct DeleteArgs {
    /// Portfolio id
    portfolio: PortfolioId,

    /// Asset id
    id: AssetId,
}

fn parse_asset_type(raw: &str) -> Result<AssetType> {
    Ok(match raw.to_lowercase().as_str() {
        "stock" => AssetType::Stock,
        "etf" => AssetType::Etf,
        "bond" => AssetType::Bond,
        "crypto" => AssetType::Crypto,
        "cash" => AssetType::Cash,
        "other" => AssetType::Other,
        other => bail!("unknown asset type '{other}'"),
    })
}

/// Executes an asset command.
pub async fn run(client: &FolioClient, command: AssetCommands) -> Result<()> {
    match command {
        AssetCommands::Add(args) => {
            let payload = AssetPayload {
                asset_type: args.asset_type,
                name_or_ticker: args.name,
                allocation_percentage: args.allocation,
                manual_expected_return: args.expected_return,
            };
            let asset = client.assets().create(args.portfolio, &payload).await?;
            println!("Added asset {} ({})", asset.name_or_ticker, asset.id);
        }
        AssetCommands::Update(args) => {
            let payload = AssetPayload {
                asset_type: args.asset_type,
                name_or_ticker: args.name,
                allocation_percentage: args.allocation,
                manual_expected_return: args.expected_return,
            };
            let asset = client
                .assets()
                .update(args.portfolio, args.id, &payload)
                .await?;
            println!("Updated asset {} ({})", asset.name_or_ticker, asset.id);
        }
        AssetCommands::Delete(args) => {
            client.assets().delete(args.portfolio, args.id).await?;
            println!("Deleted asset {}", args.id);
        }
    }
    Ok(())
}
