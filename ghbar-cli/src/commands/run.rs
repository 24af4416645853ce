//! Run command - keep a status line updated.

use anyhow::Result;
use clap::Args;
use ghbar_core::{Host, ResponseEnvelope, StatusProvider};
use std::io::{stdout, Write};
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use super::{build_provider, render};
use crate::host::SystemHost;
use crate::Cli;

/// Arguments for run command.
#[derive(Args)]
pub struct RunArgs {
    /// Stop after this many printed lines (runs forever when unset).
    #[arg(long)]
    pub count: Option<u64>,

    /// Minimum pause between polls in seconds.
    #[arg(long, default_value = "1")]
    pub min_interval: u64,
}

/// Runs the run command.
pub async fn run(args: &RunArgs, cli: &Cli) -> Result<()> {
    let mut provider = build_provider(cli).await?;
    let host = SystemHost::new();
    info!(provider = provider.name(), "Starting run mode");

    let mut printed = 0u64;
    loop {
        let envelope = provider.poll(&host).await;

        // The startup poll asks to be called again at once; skip printing it
        // unless it is the only thing we will ever print.
        let settled = !envelope.is_expired(host.now());
        if settled || printed > 0 {
            let mut out = stdout().lock();
            writeln!(out, "{}", render(&envelope, cli)?)?;
            out.flush()?;
            printed += 1;
        }

        if args.count.is_some_and(|limit| printed >= limit) {
            return Ok(());
        }

        let wait = wait_for(&envelope, &host, args.min_interval);
        debug!(seconds = wait.as_secs(), "Sleeping until next poll");
        sleep(wait).await;
    }
}

/// Time to wait before polling again, never below `min_interval` seconds
/// once a real poll has happened.
fn wait_for(envelope: &ResponseEnvelope, host: &dyn Host, min_interval: u64) -> Duration {
    let remaining = (envelope.cached_until - host.now())
        .to_std()
        .unwrap_or(Duration::ZERO);
    if remaining.is_zero() {
        // Expired envelopes are re-polled right away.
        return Duration::ZERO;
    }
    remaining.max(Duration::from_secs(min_interval))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    struct FixedHost(DateTime<Utc>);

    impl Host for FixedHost {
        fn notify_user(&self, _message: &str) {}

        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_wait_for_expired_is_zero() {
        let host = FixedHost(Utc::now());
        let envelope = ResponseEnvelope::new("x", host.0);
        assert_eq!(wait_for(&envelope, &host, 5), Duration::ZERO);
    }

    #[test]
    fn test_wait_for_uses_cached_until() {
        let host = FixedHost(Utc::now());
        let envelope = ResponseEnvelope::new("x", host.time_in(60));
        assert_eq!(wait_for(&envelope, &host, 1), Duration::from_secs(60));
    }

    #[test]
    fn test_wait_for_respects_min_interval() {
        let host = FixedHost(Utc::now());
        let envelope = ResponseEnvelope::new("x", host.time_in(2));
        assert_eq!(wait_for(&envelope, &host, 10), Duration::from_secs(10));
    }
}
