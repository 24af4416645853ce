// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! ghbar - GitHub issue, pull request and notification counts for status bars.
//!
//! # Examples
//!
//! ```bash
//! # Poll once and print the rendered line
//! ghbar --repo rust-lang/rust
//!
//! # Keep a status line updated, one JSON object per refresh
//! GITHUB_USERNAME=octocat GITHUB_TOKEN=ghp_... ghbar --output json run
//!
//! # Read the token from the system keychain
//! ghbar --username octocat --keychain once
//!
//! # Store a token in the system keychain
//! ghbar --username octocat store-token
//!
//! # Forward a left click
//! ghbar click --button 1
//! ```

mod commands;
mod host;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use ghbar_providers::github::NotificationScope;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{click, once, run, store_token};

// ============================================================================
// CLI Definition
// ============================================================================

/// ghbar - GitHub counts for status bars.
#[derive(Parser)]
#[command(name = "ghbar")]
#[command(about = "GitHub issue, pull request and notification counts for status bars")]
#[command(long_about = r#"
ghbar polls the GitHub API and prints a short status line.

Placeholders for --format:
  {repo}            configured repository
  {issues}          open issues ("?" until known)
  {pull_requests}   open pull requests ("?" until known)
  {notifications}   unread notifications, rendered with --format-notifications

Notifications need a username and token (--username/--token, the
GITHUB_USERNAME/GITHUB_TOKEN environment variables, or --keychain).

Examples:
  ghbar                                # Poll once
  ghbar run                            # Continuous status line
  ghbar --output json run              # One JSON object per refresh
  ghbar click --button 1               # Open github.com/notifications
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'once' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Repository to check, as owner/name. Empty disables repo scoping.
    #[arg(long, short, global = true)]
    pub repo: Option<String>,

    /// GitHub username, needed for notifications.
    #[arg(long, short, env = "GITHUB_USERNAME", global = true)]
    pub username: Option<String>,

    /// Personal access token, needed for notifications.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Look the token up in the system keychain when none is given.
    #[arg(long, global = true)]
    pub keychain: bool,

    /// Display template.
    #[arg(long, short, global = true)]
    pub format: Option<String>,

    /// Template for the notification badge ({count}).
    #[arg(long, global = true)]
    pub format_notifications: Option<String>,

    /// Which notifications to count.
    #[arg(long, global = true)]
    pub notifications: Option<ScopeArg>,

    /// Refresh interval in seconds.
    #[arg(long, global = true)]
    pub cache_timeout: Option<u64>,

    /// Pointer button that opens the notifications page (0 disables).
    #[arg(long, global = true)]
    pub button_notifications: Option<u8>,

    /// Display color passed through to the status bar (e.g. #FF0000).
    #[arg(long, global = true)]
    pub color: Option<String>,

    /// API root, for GitHub Enterprise.
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Output format (text or json).
    #[arg(long, short, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable ANSI styling in text output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no logging).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Poll once and print the result (default if no command specified).
    #[command(visible_alias = "o")]
    Once,

    /// Poll forever, printing one line per refresh.
    #[command(visible_alias = "r")]
    Run(run::RunArgs),

    /// Dispatch a pointer click to the provider.
    Click(click::ClickArgs),

    /// Store a token in the system keychain for --username.
    StoreToken(store_token::StoreTokenArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Plain status line.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Notification scope as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// Every unread notification.
    All,
    /// Only notifications for --repo.
    Repo,
}

impl From<ScopeArg> for NotificationScope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::All => Self::All,
            ScopeArg::Repo => Self::Repo,
        }
    }
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Invalid options.
    ConfigError = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("ghbar=debug,info")
    } else {
        EnvFilter::new("ghbar=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Once) | None => once::run(&cli).await,
        Some(Commands::Run(args)) => run::run(args, &cli).await,
        Some(Commands::Click(args)) => click::run(args, &cli).await,
        Some(Commands::StoreToken(args)) => store_token::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        let code = if e.downcast_ref::<ghbar_core::CoreError>().is_some() {
            ExitCode::ConfigError
        } else {
            ExitCode::Error
        };
        std::process::exit(code as i32);
    }

    std::process::exit(ExitCode::Success as i32);
}
