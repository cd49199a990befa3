//! CoinGecko simple-price source.

use async_trait::async_trait;
use flare_core::Price;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{FeedError, FeedResult};
use crate::source::{insert_price, PriceMap, PriceSource};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const COINGECKO_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

/// Token symbol to CoinGecko id.
pub const COIN_IDS: [(&str, &str); 7] = [
    ("FLR", "flare-networks"),
    ("WFLR", "wrapped-flare"),
    ("ETH", "ethereum"),
    ("MATIC", "matic-network"),
    ("METIS", "metis-token"),
    ("APE", "apecoin"),
    ("USDT", "tether"),
];

/// `{"ethereum": {"usd": 3200.5}, ...}`
pub type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

pub struct CoinGeckoSource {
    client: Client,
    url: String,
}

impl CoinGeckoSource {
    pub fn new() -> FeedResult<Self> {
        Self::with_url(COINGECKO_URL)
    }

    pub fn with_url(url: impl Into<String>) -> FeedResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| FeedError::HttpClient(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

fn usd(data: &SimplePriceResponse, id: &str) -> Option<f64> {
    data.get(id).and_then(|m| m.get("usd")).copied()
}

/// Map a CoinGecko response to token prices.
///
/// WFLR falls back to FLR, USDT defaults to 1.0, anything else missing is dropped.
pub fn map_response(data: &SimplePriceResponse) -> PriceMap {
    let mut prices = PriceMap::new();
    for (symbol, id) in COIN_IDS {
        let value = match symbol {
            "WFLR" => usd(data, id)
                .filter(|v| *v > 0.0)
                .or_else(|| usd(data, "flare-networks")),
            "USDT" => usd(data, id).or(Some(1.0)),
            _ => usd(data, id),
        };
        if let Some(price) = value.and_then(Price::from_f64) {
            insert_price(&mut prices, symbol, price);
        }
    }
    prices
}

#[async_trait]
impl PriceSource for CoinGeckoSource {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    async fn fetch(&self) -> FeedResult<PriceMap> {
        let ids = COIN_IDS
            .iter()
            .map(|(_, id)| *id)
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .client
            .get(&self.url)
            .query(&[("ids", ids.as_str()), ("vs_currencies", "usd")])
            .send()
            .await
            .map_err(|e| FeedError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "CoinGecko request failed");
            return Err(FeedError::HttpClient(format!("HTTP {status}")));
        }

        let data: SimplePriceResponse = response
            .json()
            .await
            .map_err(|e| FeedError::Parse(format!("CoinGecko response: {e}")))?;

        let prices = map_response(&data);
        info!(count = prices.len(), "Retrieved CoinGecko prices");
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_core::Symbol;

    fn parse(json: &str) -> SimplePriceResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_full_response() {
        let data = parse(
            r#"{
                "flare-networks": {"usd": 0.025},
                "wrapped-flare": {"usd": 0.0251},
                "ethereum": {"usd": 3300.0},
                "matic-network": {"usd": 0.7},
                "metis-token": {"usd": 40.0},
                "apecoin": {"usd": 1.2},
                "tether": {"usd": 1.001}
            }"#,
        );
        let prices = map_response(&data);
        assert_eq!(prices.len(), 7);
        assert_eq!(
            prices[&Symbol::new("WFLR").unwrap()].to_f64(),
            0.0251
        );
    }

    #[test]
    fn test_wflr_falls_back_and_usdt_defaults() {
        let data = parse(r#"{"flare-networks": {"usd": 0.025}}"#);
        let prices = map_response(&data);

        assert_eq!(prices[&Symbol::new("WFLR").unwrap()].to_f64(), 0.025);
        assert_eq!(prices[&Symbol::new("USDT").unwrap()].to_f64(), 1.0);
        assert!(!prices.contains_key(&Symbol::new("ETH").unwrap()));
    }

    #[test]
    fn test_zero_prices_dropped() {
        let data = parse(r#"{"apecoin": {"usd": 0.0}}"#);
        let prices = map_response(&data);
        assert!(!prices.contains_key(&Symbol::new("APE").unwrap()));
    }
}
