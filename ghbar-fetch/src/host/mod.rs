//! Host APIs for `ghbar` providers.
//!
//! - [`http`] - HTTP client with tracing and domain allowlist
//! - [`keychain`] - Secure credential storage (system keychain)

pub mod http;
pub mod keychain;

pub use http::HttpClient;
pub use keychain::{KeychainApi, SystemKeychain};
