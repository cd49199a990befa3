//! On-chain FTSOv2 price source.

use async_trait::async_trait;
use flare_chain::{FeedValue, FtsoReader, DEFAULT_FEEDS};
use flare_core::Price;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use crate::error::FeedResult;
use crate::source::{insert_price, PriceMap, PriceSource};

/// Rough XRP-to-MATIC ratio; no MATIC feed is read directly.
const XRP_TO_MATIC: Decimal = dec!(0.0003);

pub struct FtsoSource {
    reader: FtsoReader,
}

impl FtsoSource {
    pub fn new(reader: FtsoReader) -> Self {
        Self { reader }
    }
}

/// Translate feed values into token prices.
///
/// FLR also prices WFLR, XRP stands in for MATIC, BTC has no token here.
pub fn map_feeds(feeds: &[FeedValue]) -> PriceMap {
    let mut prices = PriceMap::new();
    for feed in feeds {
        let price = Price::new(feed.value);
        match feed.base() {
            "FLR" => {
                insert_price(&mut prices, "FLR", price);
                insert_price(&mut prices, "WFLR", price);
            }
            "ETH" => insert_price(&mut prices, "ETH", price),
            "USDT" => insert_price(&mut prices, "USDT", price),
            "XRP" => insert_price(&mut prices, "MATIC", price * XRP_TO_MATIC),
            _ => {}
        }
    }
    prices
}

#[async_trait]
impl PriceSource for FtsoSource {
    fn name(&self) -> &'static str {
        "ftso"
    }

    async fn fetch(&self) -> FeedResult<PriceMap> {
        let feeds = self.reader.read_feeds(&DEFAULT_FEEDS).await?;
        let prices = map_feeds(&feeds);
        info!(count = prices.len(), "Retrieved FTSO prices");
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_core::Symbol;

    fn feed(name: &str, value: Decimal) -> FeedValue {
        FeedValue {
            name: name.to_string(),
            value,
            timestamp: 0,
        }
    }

    #[test]
    fn test_map_feeds() {
        let prices = map_feeds(&[
            feed("FLR/USD", dec!(0.0241)),
            feed("BTC/USD", dec!(65000)),
            feed("ETH/USD", dec!(3100)),
            feed("XRP/USD", dec!(2)),
            feed("USDT/USD", dec!(0.9998)),
        ]);

        let get = |s: &str| prices[&Symbol::new(s).unwrap()].inner();
        assert_eq!(prices.len(), 5);
        assert_eq!(get("FLR"), dec!(0.0241));
        assert_eq!(get("WFLR"), dec!(0.0241));
        assert_eq!(get("ETH"), dec!(3100));
        assert_eq!(get("MATIC"), dec!(0.0006));
        assert_eq!(get("USDT"), dec!(0.9998));
    }

    #[test]
    fn test_zero_feed_values_dropped() {
        let prices = map_feeds(&[feed("ETH/USD", Decimal::ZERO)]);
        assert!(prices.is_empty());
    }
}
