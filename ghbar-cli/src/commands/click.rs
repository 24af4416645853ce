//! Click command - forward a pointer click to the provider.

use anyhow::Result;
use clap::Args;
use ghbar_core::StatusProvider;
use tracing::debug;

use super::build_provider;
use crate::host::SystemHost;
use crate::Cli;

/// Arguments for click command.
#[derive(Args)]
pub struct ClickArgs {
    /// Pointer button that was pressed (1 = left, 2 = middle, 3 = right).
    #[arg(long, short, default_value = "1")]
    pub button: u8,
}

/// Runs the click command.
pub async fn run(args: &ClickArgs, cli: &Cli) -> Result<()> {
    let provider = build_provider(cli).await?;
    debug!(button = args.button, "Dispatching click");
    provider.handle_click(args.button, &SystemHost::new());
    Ok(())
}
