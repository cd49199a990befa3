//! Dashboard API types.
//!
//! These types are used for JSON serialization in REST and WebSocket APIs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use flare_chain::{CrossChainQuote, PreparedTx};
use flare_core::{Amount, Holding, Price, Symbol, Token, TradeRecord};

use crate::wallet::WalletStatus;

/// Dashboard state snapshot (REST and initial WebSocket message).
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// Timestamp when snapshot was taken (Unix milliseconds).
    pub timestamp_ms: i64,
    pub tokens: Vec<Token>,
    /// Positive balances only.
    pub portfolio: Vec<Holding>,
    /// Newest first.
    pub recent_trades: Vec<TradeRecord>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    /// Source of the last successful price refresh.
    pub price_source: Option<&'static str>,
    pub wallet: WalletStatus,
}

/// Price row as streamed and returned by `/api/refresh_prices`.
#[derive(Debug, Clone, Serialize)]
pub struct TokenQuote {
    pub symbol: Symbol,
    pub price: Price,
    #[serde(with = "rust_decimal::serde::float")]
    pub change_24h: Decimal,
}

impl From<&Token> for TokenQuote {
    fn from(token: &Token) -> Self {
        Self {
            symbol: token.symbol.clone(),
            price: token.price,
            change_24h: token.change_24h,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenList {
    pub tokens: Vec<TokenQuote>,
}

/// WebSocket message types (tagged enum for type safety).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardMessage {
    /// Full snapshot (sent on connect).
    Snapshot(DashboardSnapshot),
    /// Periodic price update.
    Prices {
        timestamp_ms: i64,
        tokens: Vec<TokenQuote>,
        #[serde(with = "rust_decimal::serde::float")]
        total_value: Decimal,
    },
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TradeBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub token: String,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default)]
    pub from_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteBody {
    pub from_chain: String,
    pub to_chain: String,
    pub from_token: String,
    pub to_token: String,
    #[serde(default)]
    pub amount: Amount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexSwapBody {
    pub from_token: String,
    pub to_token: String,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default)]
    pub use_oneinch: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrossChainBody {
    pub from_token: String,
    #[serde(default)]
    pub amount: Amount,
    pub destination_chain: String,
    pub to_token: String,
    /// Defaults to the connected wallet.
    #[serde(default)]
    pub recipient: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiquidityBody {
    pub token_a: String,
    pub token_b: String,
    #[serde(default)]
    pub amount_a: Amount,
    #[serde(default)]
    pub amount_b: Amount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletConnectBody {
    pub address: String,
    #[serde(rename = "chainId")]
    pub chain_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FdcRequestBody {
    pub attestation_type: String,
    #[serde(default)]
    pub request_data: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TradeResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade: Option<TradeRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub trade_executed: bool,
    pub trade_info: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteResponse {
    pub success: bool,
    pub quote: CrossChainQuote,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreparedTxResponse {
    pub success: bool,
    pub message: String,
    pub transaction: PreparedTx,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
