//! Core domain types for the Flare trading assistant.
//!
//! This crate provides the flat records shared by every other crate:
//! - `Symbol`: Normalized token ticker
//! - `Price`, `Amount`: Precision-safe numeric types
//! - `Token`, `Holding`: Price table row and portfolio position
//! - `TradeKind`, `TradeRecord`, `ChatRecord`: Trade log and chat transcript rows
//! - `Chain`: Networks known to the assistant and bridge routes

pub mod chain;
pub mod decimal;
pub mod error;
pub mod record;
pub mod symbol;
pub mod token;

pub use chain::Chain;
pub use decimal::{Amount, Price};
pub use error::{CoreError, Result};
pub use record::{ChatRecord, TradeKind, TradeRecord, TradeStatus};
pub use symbol::Symbol;
pub use token::{Holding, Token};
