//! Feed error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Chain read failed: {0}")]
    Chain(#[from] flare_chain::ChainError),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Unexpected response: {0}")]
    Parse(String),
}

pub type FeedResult<T> = Result<T, FeedError>;
