//! Cross-chain transfer quotes.
//!
//! Quotes are computed locally from the current price table and static route
//! data; no bridge is contacted.

use flare_core::{Amount, Chain, Price, Symbol};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{ChainError, ChainResult};
use crate::networks::{gas_estimate_usd, route_info};

/// Proportional bridge fee, 0.1%.
const BRIDGE_FEE_RATE: Decimal = dec!(0.001);

/// Transfer size at which price impact reaches 100%; capped well before that.
const IMPACT_DEPTH_USD: Decimal = dec!(1000000);

const MAX_IMPACT_PCT: Decimal = dec!(5);

#[derive(Debug, Clone, Serialize)]
pub struct QuoteRoute {
    pub name: &'static str,
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrossChainQuote {
    pub from_chain: Chain,
    pub to_chain: Chain,
    pub from_token: Symbol,
    pub to_token: Symbol,
    pub amount_in: Amount,
    pub amount_out: Amount,
    #[serde(with = "rust_decimal::serde::float")]
    pub usd_value: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub bridge_fee: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub gas_estimate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_fee_usd: Decimal,
    /// Percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub price_impact: Decimal,
    pub estimated_time: &'static str,
    pub route: QuoteRoute,
}

/// Prices bridge transfers between the supported chains.
#[derive(Debug, Clone, Default)]
pub struct BridgeQuoter;

impl BridgeQuoter {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a chain name, restricted to chains the bridge serves.
    pub fn parse_chain(raw: &str) -> ChainResult<Chain> {
        Chain::parse_alias(raw)
            .filter(|c| Chain::BRIDGE_TARGETS.contains(c) || *c == Chain::Songbird)
            .ok_or_else(|| ChainError::UnknownChain(raw.to_string()))
    }

    pub fn quote(
        &self,
        from_chain: &str,
        to_chain: &str,
        from_token: &Symbol,
        to_token: &Symbol,
        amount: Amount,
        prices: &HashMap<Symbol, Price>,
    ) -> ChainResult<CrossChainQuote> {
        let from = Self::parse_chain(from_chain)?;
        let to = Self::parse_chain(to_chain)?;
        if from == to {
            return Err(ChainError::SameChain);
        }
        if !amount.is_positive() {
            return Err(ChainError::AmountNotPositive);
        }

        let price_in = lookup(prices, from_token)?;
        let price_out = lookup(prices, to_token)?;

        // The remote side of the transfer picks the route.
        let route = route_info(if from == Chain::Flare { to } else { from });

        let usd_in = amount
            .value_at(price_in)
            .ok_or_else(|| ChainError::AmountOutOfRange(amount.to_string()))?;
        let bridge_fee = (usd_in * BRIDGE_FEE_RATE).max(route.min_fee_usd);
        let gas = gas_estimate_usd(to);
        let total_fee = bridge_fee + gas;
        let impact = (usd_in / IMPACT_DEPTH_USD * Decimal::ONE_HUNDRED).min(MAX_IMPACT_PCT);

        let net_usd = (usd_in - total_fee).max(Decimal::ZERO)
            * (Decimal::ONE - impact / Decimal::ONE_HUNDRED);
        let amount_out = net_usd
            .checked_div(price_out.inner())
            .ok_or_else(|| ChainError::AmountOutOfRange(amount.to_string()))?
            .round_dp(8);

        debug!(%from, %to, %usd_in, %total_fee, %impact, "Computed bridge quote");

        Ok(CrossChainQuote {
            from_chain: from,
            to_chain: to,
            from_token: from_token.clone(),
            to_token: to_token.clone(),
            amount_in: amount,
            amount_out: Amount::new(amount_out),
            usd_value: usd_in.round_dp(2),
            bridge_fee: bridge_fee.round_dp(4),
            gas_estimate: gas,
            total_fee_usd: total_fee.round_dp(4),
            price_impact: impact.round_dp(4),
            estimated_time: route.estimated_time,
            route: QuoteRoute {
                name: route.name,
                from: from.key(),
                to: to.key(),
            },
        })
    }
}

fn lookup(prices: &HashMap<Symbol, Price>, symbol: &Symbol) -> ChainResult<Price> {
    prices
        .get(symbol)
        .copied()
        .filter(|p| p.is_positive())
        .ok_or_else(|| ChainError::MissingPrice(symbol.to_string()))
}
