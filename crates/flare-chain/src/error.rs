//! Chain error types.
//!
//! Display strings surface in API responses, so they are phrased for users.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Not connected to Flare network: {0}")]
    NotConnected(String),

    #[error("DEX contract not deployed")]
    DexNotDeployed,

    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("Token addresses not found for {0} or {1}")]
    TokenPairUnknown(String, String),

    #[error("Token address not found for {0}")]
    TokenUnknown(String),

    #[error("Failed to get 1inch swap data: {0}")]
    AggregatorUnavailable(String),

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    #[error("Unsupported chain: {0}")]
    UnknownChain(String),

    #[error("Source and destination chains must differ")]
    SameChain,

    #[error("Amount must be greater than 0")]
    AmountNotPositive,

    #[error("No price available for {0}")]
    MissingPrice(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("ABI error: {0}")]
    Abi(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<alloy::sol_types::Error> for ChainError {
    fn from(e: alloy::sol_types::Error) -> Self {
        Self::Abi(e.to_string())
    }
}

pub type ChainResult<T> = Result<T, ChainError>;
