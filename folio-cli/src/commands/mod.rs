//! CLI command implementations.

pub mod alloc;
pub mod asset;
pub mod auth;
pub mod change;
pub mod portfolio;
pub mod project;

use anyhow::{Context, Result};

use folio_client::FolioClient;
use folio_core::config::load_settings_or_default;

/// Output format for list/show commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Table => "table",
            Self::Json => "json",
        };
        write!(f, "{label}")
    }
}

/// Builds the API client from the configuration file (falling back to
/// defaults plus environment overrides when the file is absent).
pub fn build_client(config_path: &str) -> Result<FolioClient> {
    let settings = load_settings_or_default(config_path)
        .with_context(|| format!("failed to load settings from {config_path}"))?;
    FolioClient::new(&settings).context("failed to create API client")
}
