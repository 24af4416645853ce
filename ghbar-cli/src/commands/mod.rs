//! CLI command implementations.

pub mod click;
pub mod once;
pub mod run;
pub mod store_token;

use anyhow::{Context, Result};
use ghbar_core::ResponseEnvelope;
use ghbar_fetch::{services, GithubQueryClient, KeychainApi, SystemKeychain};
use ghbar_providers::{GithubConfig, GithubProvider};
use tracing::{debug, warn};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

// ============================================================================
// Provider Construction
// ============================================================================

/// Maps command-line options onto a provider configuration.
///
/// Options left unset keep the provider defaults.
pub fn config_from_cli(cli: &Cli) -> GithubConfig {
    let mut config = GithubConfig::default();
    if let Some(repo) = &cli.repo {
        config.repo.clone_from(repo);
    }
    config.username = cli.username.clone().filter(|u| !u.is_empty());
    config.auth_token = cli.token.clone().filter(|t| !t.is_empty());
    if let Some(format) = &cli.format {
        config.format.clone_from(format);
    }
    if let Some(format) = &cli.format_notifications {
        config.format_notifications.clone_from(format);
    }
    if let Some(scope) = cli.notifications {
        config.notifications = scope.into();
    }
    if let Some(timeout) = cli.cache_timeout {
        config.cache_timeout = timeout;
    }
    if let Some(button) = cli.button_notifications {
        config.button_notifications = button;
    }
    if cli.color.is_some() {
        config.color.clone_from(&cli.color);
    }
    if let Some(base) = &cli.api_base {
        config.api_base.clone_from(base);
    }
    config
}

/// Fills in a missing token from the keychain. Lookup failures count as
/// "no token".
pub async fn fill_token_from_keychain(config: &mut GithubConfig, keychain: &dyn KeychainApi) {
    if config.auth_token.is_some() {
        return;
    }
    let Some(username) = config.username.as_deref() else {
        warn!("--keychain needs --username to look a token up");
        return;
    };

    match keychain.get(services::GITHUB, username).await {
        Ok(Some(token)) => {
            debug!(username = %username, "Using token from keychain");
            config.auth_token = Some(token);
        }
        Ok(None) => debug!(username = %username, "No token in keychain"),
        Err(e) => warn!(username = %username, error = %e, "Keychain lookup failed"),
    }
}

/// Builds a validated provider talking to the real API.
pub async fn build_provider(cli: &Cli) -> Result<GithubProvider> {
    let mut config = config_from_cli(cli);
    if cli.keychain {
        fill_token_from_keychain(&mut config, &SystemKeychain::new()).await;
    }
    config.validate()?;

    let client = GithubQueryClient::for_base_url(&config.api_base)
        .context("Failed to create GitHub client")?;
    Ok(GithubProvider::new(config, Box::new(client)))
}

// ============================================================================
// Output
// ============================================================================

/// Renders an envelope in the selected output format.
pub fn render(envelope: &ResponseEnvelope, cli: &Cli) -> Result<String> {
    match cli.output {
        OutputFormat::Text => Ok(TextFormatter::new(!cli.no_color).format_envelope(envelope)),
        OutputFormat::Json => JsonFormatter::new(cli.pretty).format_envelope(envelope),
    }
}
