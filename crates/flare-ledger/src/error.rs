//! Ledger error types.
//!
//! Display strings are user-facing: they are returned verbatim in API
//! responses and chat replies.

use flare_core::{Amount, TradeKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Amount must be greater than 0")]
    AmountNotPositive,

    #[error("Amount is too large to trade")]
    AmountOutOfRange,

    #[error("Token {0} not found")]
    TokenNotFound(String),

    #[error("Insufficient {symbol} balance (have {available}, need {requested})")]
    InsufficientBalance {
        symbol: String,
        available: Amount,
        requested: Amount,
    },

    #[error("From token required for swap")]
    MissingFromToken,

    #[error("Cannot swap {0} for itself")]
    SameToken(String),

    #[error("No price available for {0}")]
    NoPrice(String),

    #[error("{0} trades are not simulated; use the bridge")]
    Unsupported(TradeKind),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
