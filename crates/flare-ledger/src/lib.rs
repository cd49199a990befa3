//! In-process mock ledger for the Flare trading assistant.
//!
//! Simulates trading without touching a chain:
//! - [`Ledger`]: token price table, holdings, trade log and chat transcript
//! - [`TradeRequest`] / [`TradeOutcome`]: input and result of a simulated trade
//! - [`PortfolioSummary`]: valuation and P&L per holding
//! - [`PriceHistory`]: synthetic hourly series for the price chart
//! - [`catalog`]: the default token set

pub mod catalog;
pub mod error;
pub mod history;
pub mod ledger;
pub mod portfolio;

pub use error::{LedgerError, LedgerResult};
pub use history::PriceHistory;
pub use ledger::{Ledger, TradeOutcome, TradeRequest};
pub use portfolio::{PortfolioLine, PortfolioSummary};
