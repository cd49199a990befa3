//! Flare trading assistant.
//!
//! Wires the simulated ledger, the price sources, the onchain helpers and the
//! chat assistant into one dashboard process:
//! - Demo mode walks prices locally
//! - Live mode reads FTSOv2 and falls back to CoinGecko
//! - Trades and chat are journaled to JSON Lines and restored on start

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
