//! Token price table row and portfolio holding.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::{Amount, Price, Symbol};

/// Token known to the assistant, with its latest market data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: Symbol,
    pub name: String,
    /// Contract address on Flare (native FLR uses a sentinel address).
    pub contract_address: String,
    pub price: Price,
    #[serde(with = "rust_decimal::serde::float")]
    pub market_cap: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub volume_24h: Decimal,
    /// Percentage change since the previous price update.
    #[serde(with = "rust_decimal::serde::float")]
    pub change_24h: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl Token {
    pub fn new(symbol: Symbol, name: impl Into<String>, contract_address: impl Into<String>, price: Price) -> Self {
        Self {
            symbol,
            name: name.into(),
            contract_address: contract_address.into(),
            price,
            market_cap: Decimal::ZERO,
            volume_24h: Decimal::ZERO,
            change_24h: Decimal::ZERO,
            updated_at: Utc::now(),
        }
    }

    /// Set a new price and recompute the change against the previous one.
    ///
    /// Change is zero when the previous price was zero.
    pub fn reprice(&mut self, price: Price) {
        self.change_24h = price.pct_from(self.price).unwrap_or(Decimal::ZERO);
        self.price = price;
        self.updated_at = Utc::now();
    }
}

/// Portfolio position in a single token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: Symbol,
    pub balance: Amount,
    pub avg_buy_price: Price,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Holding {
    pub fn empty(symbol: Symbol) -> Self {
        let now = Utc::now();
        Self {
            symbol,
            balance: Amount::ZERO,
            avg_buy_price: Price::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total cost paid for the current balance.
    pub fn cost_basis(&self) -> Decimal {
        self.balance.saturating_value_at(self.avg_buy_price)
    }

    pub fn value_at(&self, price: Price) -> Decimal {
        self.balance.saturating_value_at(price)
    }

    /// Add `amount` bought at `price`, updating the balance-weighted average.
    ///
    /// The holding is left unchanged when the new balance or cost basis
    /// does not fit in a `Decimal`.
    pub fn credit(&mut self, amount: Amount, price: Price) -> Result<()> {
        let out_of_range = || CoreError::AmountOutOfRange(amount.to_string());
        let new_balance = self.balance.checked_add(amount).ok_or_else(out_of_range)?;
        if new_balance.is_positive() {
            let total_cost = amount
                .value_at(price)
                .and_then(|v| v.checked_add(self.cost_basis()))
                .and_then(|v| v.checked_div(new_balance.inner()))
                .ok_or_else(out_of_range)?;
            self.avg_buy_price = Price::new(total_cost);
        }
        self.balance = new_balance;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Remove `amount`. Callers check the balance first; this never goes negative.
    pub fn debit(&mut self, amount: Amount) {
        self.balance = self.balance.saturating_sub(amount);
        self.updated_at = Utc::now();
    }
}
