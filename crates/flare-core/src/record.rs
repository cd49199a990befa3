//! Trade log and chat transcript rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;
use crate::{Amount, Price, Symbol};

/// Kind of trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeKind {
    Buy,
    Sell,
    Swap,
    CrossChain,
}

impl TradeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Swap => "swap",
            Self::CrossChain => "cross_chain",
        }
    }
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            "swap" => Ok(Self::Swap),
            "cross_chain" | "cross-chain" | "bridge" => Ok(Self::CrossChain),
            other => Err(CoreError::UnknownTradeKind(other.to_string())),
        }
    }
}

/// Trade status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    #[default]
    Completed,
    /// Transaction parameters prepared, awaiting wallet signature.
    Pending,
}

/// One row of the trade log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TradeKind,
    pub from_token: Option<Symbol>,
    pub to_token: Symbol,
    pub amount: Amount,
    pub price: Price,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
    #[serde(default)]
    pub status: TradeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TradeRecord {
    pub fn new(
        kind: TradeKind,
        from_token: Option<Symbol>,
        to_token: Symbol,
        amount: Amount,
        price: Price,
        total_value: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            from_token,
            to_token,
            amount,
            price,
            total_value,
            status: TradeStatus::Completed,
            wallet_address: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_wallet(mut self, wallet: impl Into<String>) -> Self {
        self.wallet_address = Some(wallet.into());
        self
    }

    pub fn with_status(mut self, status: TradeStatus) -> Self {
        self.status = status;
        self
    }
}

/// One exchange in the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: Uuid,
    pub message: String,
    pub response: String,
    /// Short description of the trade the message triggered, if any.
    #[serde(default)]
    pub trade_executed: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatRecord {
    pub fn new(message: impl Into<String>, response: impl Into<String>, trade_executed: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            response: response.into(),
            trade_executed,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_trade_kind_parse() {
        assert_eq!("BUY".parse::<TradeKind>().unwrap(), TradeKind::Buy);
        assert_eq!("cross_chain".parse::<TradeKind>().unwrap(), TradeKind::CrossChain);
        assert!("lend".parse::<TradeKind>().is_err());
    }

    #[test]
    fn test_trade_record_wire_format() {
        let record = TradeRecord::new(
            TradeKind::Swap,
            Some(Symbol::new("FLR").unwrap()),
            Symbol::new("WFLR").unwrap(),
            Amount::new(dec!(10)),
            Price::new(dec!(0.02)),
            dec!(0.2),
        );

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"swap\""));
        assert!(json.contains("\"status\":\"completed\""));
        assert!(!json.contains("wallet_address"));
    }
}
