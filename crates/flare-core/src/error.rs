//! Error types for flare-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    #[error("Unknown trade type: {0}")]
    UnknownTradeKind(String),

    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    #[error("Decimal parse error: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
