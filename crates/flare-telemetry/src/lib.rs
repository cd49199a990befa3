//! Prometheus metrics and structured logging for the Flare trading assistant.
//!
//! - Prometheus counters and gauges for price refreshes, trades, chat and wallet activity
//! - Structured logging with tracing (JSON in production)

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
