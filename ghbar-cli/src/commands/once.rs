//! Once command - poll and print a single status line.

use anyhow::Result;
use ghbar_core::{Host, ResponseEnvelope, StatusProvider};
use tracing::debug;

use super::{build_provider, render};
use crate::host::SystemHost;
use crate::Cli;

/// Runs the once command.
pub async fn run(cli: &Cli) -> Result<()> {
    let mut provider = build_provider(cli).await?;
    let host = SystemHost::new();

    let envelope = poll_settled(&mut provider, &host).await;
    println!("{}", render(&envelope, cli)?);
    Ok(())
}

/// Polls, then polls once more if the provider asked to be called again
/// immediately (the startup poll never touches the network).
pub async fn poll_settled(provider: &mut dyn StatusProvider, host: &dyn Host) -> ResponseEnvelope {
    let envelope = provider.poll(host).await;
    if !envelope.is_expired(host.now()) {
        return envelope;
    }
    debug!(provider = provider.name(), "Envelope already expired, polling again");
    provider.poll(host).await
}
