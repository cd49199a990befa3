//! Price source abstraction.

use async_trait::async_trait;
use flare_core::{Price, Symbol};
use std::collections::HashMap;

use crate::error::FeedResult;

/// Token prices in USD keyed by symbol.
pub type PriceMap = HashMap<Symbol, Price>;

/// A provider of current token prices.
///
/// An empty map means the source had nothing to offer; the aggregator moves
/// on to the next source just as it does for an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Short label used in logs and metrics.
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> FeedResult<PriceMap>;
}

/// Insert a price under `symbol` if both parse; zero and negative prices are dropped.
pub(crate) fn insert_price(map: &mut PriceMap, symbol: &str, price: Price) {
    if !price.is_positive() {
        return;
    }
    if let Ok(symbol) = Symbol::new(symbol) {
        map.insert(symbol, price);
    }
}
