//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chain error: {0}")]
    Chain(#[from] flare_chain::ChainError),

    #[error("Feed error: {0}")]
    Feed(#[from] flare_feed::FeedError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] flare_telemetry::TelemetryError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] flare_persistence::PersistenceError),

    #[error("Dashboard error: {0}")]
    Dashboard(#[from] flare_dashboard::DashboardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
