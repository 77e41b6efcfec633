//! Authentication commands.

use anyhow::Result;
use clap::{Parser, Subcommand};

use folio_client::FolioClient;
use folio_core::validate::score_password;

/// Authentication subcommands.
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Register a new account
    Register(CredentialArgs),

    /// Log in and store the bearer token
    Login(CredentialArgs),

    /// Clear the stored bearer token
    Logout,

    /// Show whether a token is stored
    Status,
}

/// Email/password pair for register and login.
#[derive(Parser)]
pub struct CredentialArgs {
    /// Account email address
    #[arg(short, long)]
    email: String,

    /// Account password
    #[arg(short, long)]
    password: String,
}

/// Executes an authentication command.
pub async fn run(client: &FolioClient, command: AuthCommands) -> Result<()> {
    match command {
        AuthCommands::Register(args) => {
            let strength = score_password(&args.password);
            if !strength.acceptable() {
                anyhow::bail!(
                    "password too weak ({}); use at least 8 characters with mixed case and a digit or symbol",
                    strength.label()
                );
            }
            client.auth().register(&args.email, &args.password).await?;
            println!("Registered and logged in as {}", args.email);
        }
        AuthCommands::Login(args) => {
            client.auth().login(&args.email, &args.password).await?;
            println!("Logged in as {}", args.email);
        }
        AuthCommands::Logout => {
            client.auth().logout()?;
            println!("Logged out");
        }
        AuthCommands::Status => {
            if client.auth().is_authenticated() {
                println!("Authenticated (token stored)");
            } else {
                println!("Not authenticated");
            }
        }
    }
    Ok(())
}
