// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ghbar` Fetch
//!
//! Remote query client and host APIs for `ghbar` providers.
//!
//! ## Host APIs
//!
//! - [`host::http`] - HTTP client with tracing, basic auth, and domain allowlist
//! - [`host::keychain`] - Secure credential storage (system keychain)
//!
//! ## Remote Queries
//!
//! - [`query::RemoteQuery`] - One GET, classified into a [`QueryOutcome`]
//! - [`query::GithubQueryClient`] - The GitHub REST implementation
//!
//! ## Example
//!
//! ```ignore
//! use ghbar_fetch::{GithubQueryClient, QueryOutcome, RemoteQuery};
//!
//! let client = GithubQueryClient::new()?;
//! match client.query("https://api.github.com/notifications", Some(&creds)).await {
//!     QueryOutcome::Success(body) => println!("{body}"),
//!     other => eprintln!("query failed: {other}"),
//! }
//! ```

pub mod error;
pub mod host;
pub mod query;

// Errors
pub use error::{HttpError, KeychainError};

// Host APIs
pub use host::{
    http::{HttpClient, RateLimit, ResponseExt},
    keychain::{services, KeychainApi, SystemKeychain},
};

// Queries
pub use query::{GithubQueryClient, QueryOutcome, RemoteQuery, GITHUB_API_URL};
