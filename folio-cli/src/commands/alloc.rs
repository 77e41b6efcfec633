//! Allocation editing commands.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use folio_client::FolioClient;
use folio_client::allocation::AllocationStore;
use folio_core::types::{AssetId, Portfolio, PortfolioId};

/// Allocation subcommands.
#[derive(Subcommand)]
pub enum AllocCommands {
    /// Show a portfolio's current target allocations
    Show(ShowArgs),

    /// Edit target allocations and optionally save them
    Set(SetArgs),
}

/// Arguments for `alloc show`.
#[derive(Parser)]
pub struct ShowArgs {
    /// Portfolio id
    portfolio: PortfolioId,
}

/// Arguments for `alloc set`.
#[derive(Parser)]
pub struct SetArgs {
    /// Portfolio id
    portfolio: PortfolioId,

    /// Allocation edits as ASSET_ID=PERCENT pairs (e.g. 3=58.5)
    #[arg(required = true)]
    pairs: Vec<String>,

    /// Save to the server when the edited set sums to 100%
    #[arg(short, long)]
    save: bool,
}

/// Executes an allocation command.
pub async fn run(client: &FolioClient, command: AllocCommands) -> Result<()> {
    match command {
        AllocCommands::Show(args) => {
            let portfolio = client.portfolios().get(args.portfolio).await?;
            let mut store = AllocationStore::new(portfolio.id);
            store.initialize(&portfolio.assets);
            print_allocations(&store, &portfolio);
        }
        AllocCommands::Set(args) => {
            let portfolio = client.portfolios().get(args.portfolio).await?;
            let mut store = AllocationStore::new(portfolio.id);
            store.initialize(&portfolio.assets);

            for pair in &args.pairs {
                let (id, value) = parse_pair(pair)?;
                if !store.set(id, value) {
                    bail!("'{value}' is not a valid percentage");
                }
            }

            print_allocations(&store, &portfolio);

            if args.save {
                if !store.can_save() {
                    bail!(
                        "cannot save: allocations sum to {}%, expected 100%",
                        store.total()
                    );
                }
                store.save(&client.assets(), &client.portfolios()).await?;
                println!("Saved.");
            } else if store.is_dirty() {
                println!("Not saved (pass --save to persist).");
            }
        }
    }
    Ok(())
}

fn parse_pair(pair: &str) -> Result<(AssetId, &str)> {
    let Some((id, value)) = pair.split_once('=') else {
        bail!("expected ASSET_ID=PERCENT, got '{pair}'");
    };
    let id: AssetId = id
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("'{id}' is not a valid asset id"))?;
    Ok((id, value.trim()))
}

fn print_allocations(store: &AllocationStore, portfolio: &Portfolio) {
    println!("{:<6} {:<20} {:>8}", "ID", "NAME", "TARGET %");
    for (id, value) in store.entries() {
        let name = portfolio
            .assets
            .iter()
            .find(|a| a.id == id)
            .map_or("(unknown)", |a| a.name_or_ticker.as_str());
        println!("{id:<6} {name:<20} {value:>8}");
    }
    let marker = if store.is_balanced() { "balanced" } else { "unbalanced" };
    println!("{:<6} {:<20} {:>8}  ({marker})", "", "TOTAL", store.total());
}
