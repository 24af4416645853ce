// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ghbar` Providers
//!
//! Status providers for the `ghbar` status-bar host. Every provider
//! implements [`ghbar_core::StatusProvider`]: the host polls it, renders the
//! returned [`ghbar_core::ResponseEnvelope`], and waits until the envelope's
//! `cached_until` before polling again.
//!
//! ## Usage
//!
//! ```ignore
//! use ghbar_core::StatusProvider;
//! use ghbar_fetch::GithubQueryClient;
//! use ghbar_providers::github::{GithubConfig, GithubProvider};
//!
//! let client = GithubQueryClient::new()?;
//! let mut provider = GithubProvider::new(GithubConfig::default(), Box::new(client));
//! let envelope = provider.poll(&host).await;
//! println!("{}", envelope.full_text);
//! ```

pub mod github;

pub use github::{GithubConfig, GithubProvider};
