//! Ordered price-source fallback and the last-good price cache.

use chrono::{DateTime, Utc};
use flare_telemetry::Metrics;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::source::{PriceMap, PriceSource};

/// Prices from one successful refresh.
#[derive(Debug, Clone)]
pub struct PriceSnapshot {
    /// Name of the source that answered.
    pub source: &'static str,
    pub prices: PriceMap,
    pub fetched_at: DateTime<Utc>,
}

impl PriceSnapshot {
    pub fn age_ms(&self) -> i64 {
        (Utc::now() - self.fetched_at).num_milliseconds()
    }
}

/// Most recent successful refresh.
#[derive(Debug, Default)]
pub struct PriceCache {
    last: RwLock<Option<PriceSnapshot>>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, snapshot: PriceSnapshot) {
        *self.last.write() = Some(snapshot);
    }

    pub fn latest(&self) -> Option<PriceSnapshot> {
        self.last.read().clone()
    }

    /// Milliseconds since the last refresh, `None` before the first one.
    pub fn age_ms(&self) -> Option<i64> {
        self.last.read().as_ref().map(PriceSnapshot::age_ms)
    }

    pub fn is_stale(&self, max_age_ms: i64) -> bool {
        self.age_ms().map_or(true, |age| age > max_age_ms)
    }
}

/// Tries each source in order; the first non-empty answer wins.
pub struct PriceAggregator {
    sources: Vec<Arc<dyn PriceSource>>,
    cache: PriceCache,
}

impl PriceAggregator {
    pub fn new(sources: Vec<Arc<dyn PriceSource>>) -> Self {
        Self {
            sources,
            cache: PriceCache::new(),
        }
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    /// Fetch current prices.
    ///
    /// Returns an empty map when every source fails or returns nothing; the
    /// caller keeps whatever prices it already has.
    pub async fn fetch(&self) -> PriceMap {
        for source in &self.sources {
            let name = source.name();
            let started = Instant::now();
            let result = source.fetch().await;
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

            match result {
                Ok(prices) if !prices.is_empty() => {
                    Metrics::price_fetch(name, "ok", elapsed_ms);
                    for (symbol, price) in &prices {
                        Metrics::token_price(symbol.as_str(), price.to_f64());
                    }
                    info!(source = name, count = prices.len(), "Price refresh succeeded");
                    self.cache.store(PriceSnapshot {
                        source: name,
                        prices: prices.clone(),
                        fetched_at: Utc::now(),
                    });
                    return prices;
                }
                Ok(_) => {
                    Metrics::price_fetch(name, "empty", elapsed_ms);
                    debug!(source = name, "Price source returned nothing");
                }
                Err(e) => {
                    Metrics::price_fetch(name, "error", elapsed_ms);
                    warn!(source = name, error = %e, "Price source failed");
                }
            }
        }

        warn!("All price sources failed; keeping existing prices");
        PriceMap::new()
    }
}
