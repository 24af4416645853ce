// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ghbar` Core
//!
//! Core types, templates, and traits shared by every `ghbar` crate.
//!
//! - Domain models (response envelope, metrics, credentials)
//! - Display template rendering
//! - The [`Host`] and [`StatusProvider`] seams between a status bar and
//!   the providers it polls
//! - Error types
//!
//! ## Key Types
//!
//! - [`ResponseEnvelope`] - What a provider hands back to the host on every poll
//! - [`Metric`] / [`MetricValue`] - One independently cached count and its value
//! - [`Credentials`] - Username/token pair for authenticated queries

pub mod error;
pub mod format;
pub mod models;
pub mod traits;

pub use error::CoreError;

pub use models::{Credentials, Metric, MetricValue, ResponseEnvelope};

pub use traits::{Host, StatusProvider};
