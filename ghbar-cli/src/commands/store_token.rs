//! Store-token command - save a personal access token in the keychain.

use anyhow::{bail, Context, Result};
use clap::Args;
use ghbar_fetch::{services, KeychainApi, SystemKeychain};
use std::io::{self, BufRead};
use tracing::info;

use crate::Cli;

/// Arguments for store-token command.
#[derive(Args)]
pub struct StoreTokenArgs {
    /// Read the token from stdin instead of --token / GITHUB_TOKEN.
    #[arg(long)]
    pub stdin: bool,
}

/// Runs the store-token command.
pub async fn run(args: &StoreTokenArgs, cli: &Cli) -> Result<()> {
    let Some(username) = cli.username.as_deref().filter(|u| !u.is_empty()) else {
        bail!("--username (or GITHUB_USERNAME) is required to store a token");
    };

    let token = if args.stdin {
        read_token(io::stdin().lock())?
    } else {
        cli.token.clone().unwrap_or_default()
    };

    store(&SystemKeychain::new(), username, &token).await?;
    if !cli.quiet {
        println!("Token stored for {username}");
    }
    Ok(())
}

/// Validates and stores `token` for `username`.
async fn store(keychain: &dyn KeychainApi, username: &str, token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        bail!("No token given; pass --token, set GITHUB_TOKEN, or use --stdin");
    }
    keychain
        .set(services::GITHUB, username, token)
        .await
        .context("Failed to store token in keychain")?;
    info!(username = %username, "Token stored");
    Ok(())
}

/// Reads the first line of `reader` as the token.
fn read_token(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line).context("Failed to read token from stdin")?;
    Ok(line.trim().to_string())
}
