//! Dashboard errors and their JSON rendering.
//!
//! Handlers return [`DashboardError`]; every variant renders as
//! `{"success": false, "message": ...}` so the browser code only has to
//! inspect `success`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use flare_chain::ChainError;
use flare_chat::ChatError;
use flare_core::CoreError;
use flare_ledger::LedgerError;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Wallet connection required")]
    WalletRequired,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Onchain trading is not configured")]
    ChainUnavailable,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Serialize)]
pub struct Failure {
    pub success: bool,
    pub message: String,
}

impl DashboardError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::WalletRequired => StatusCode::UNAUTHORIZED,
            Self::InvalidRequest(_) | Self::Core(_) => StatusCode::BAD_REQUEST,
            Self::ChainUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Chain(ChainError::NotConnected(_))
            | Self::Chain(ChainError::Rpc { .. })
            | Self::Chain(ChainError::HttpClient(_)) => StatusCode::BAD_GATEWAY,
            Self::Ledger(_) | Self::Chain(_) | Self::Chat(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Bind { .. } | Self::Serve(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "Request failed");
        } else {
            warn!(error = %self, %status, "Request rejected");
        }
        let body = Failure {
            success: false,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
