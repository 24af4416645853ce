//! Domain models for `ghbar`.
//!
//! ## Submodules
//!
//! - [`envelope`] - The response every provider returns to the host
//! - [`metric`] - Metrics and their cached values
//! - [`credentials`] - Optional username/token pair

mod credentials;
mod envelope;
mod metric;

pub use credentials::Credentials;
pub use envelope::ResponseEnvelope;
pub use metric::{Metric, MetricValue};
