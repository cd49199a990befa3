//! Demo-mode price source: a bounded random walk.

use async_trait::async_trait;
use flare_core::{Price, Symbol};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::FeedResult;
use crate::source::{PriceMap, PriceSource};

/// Maximum relative move per refresh for ordinary tokens.
pub const MAX_STEP: f64 = 0.05;

/// Maximum relative move for dollar-pegged tokens.
pub const PEGGED_MAX_STEP: f64 = 0.001;

const PEGGED: [&str; 2] = ["USDT", "USDC"];

/// Walks each price by up to ±5% per fetch. WFLR tracks FLR.
pub struct SimulatedSource {
    state: Mutex<(PriceMap, StdRng)>,
}

impl SimulatedSource {
    pub fn new(seed_prices: PriceMap) -> Self {
        Self {
            state: Mutex::new((seed_prices, StdRng::from_entropy())),
        }
    }

    /// Deterministic walk for tests.
    pub fn with_seed(seed_prices: PriceMap, seed: u64) -> Self {
        Self {
            state: Mutex::new((seed_prices, StdRng::seed_from_u64(seed))),
        }
    }

    /// Reset the walk to externally known prices.
    pub fn reseed(&self, prices: &PriceMap) {
        let mut state = self.state.lock();
        for (symbol, price) in prices {
            if price.is_positive() {
                state.0.insert(symbol.clone(), *price);
            }
        }
    }
}

fn step(price: Price, max_step: f64, rng: &mut StdRng) -> Price {
    let factor = 1.0 + rng.gen_range(-max_step..=max_step);
    let factor = Decimal::from_f64(factor).unwrap_or(Decimal::ONE);
    let next = (price.inner() * factor).round_dp(8);
    if next.is_sign_positive() && !next.is_zero() {
        Price::new(next)
    } else {
        price
    }
}

#[async_trait]
impl PriceSource for SimulatedSource {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn fetch(&self) -> FeedResult<PriceMap> {
        let mut guard = self.state.lock();
        let (prices, rng) = &mut *guard;

        let mut symbols: Vec<Symbol> = prices.keys().cloned().collect();
        symbols.sort();
        for symbol in symbols {
            let max_step = if PEGGED.contains(&symbol.as_str()) {
                PEGGED_MAX_STEP
            } else {
                MAX_STEP
            };
            if let Some(price) = prices.get_mut(&symbol) {
                *price = step(*price, max_step, rng);
            }
        }

        let flr = Symbol::new("FLR").ok().and_then(|s| prices.get(&s).copied());
        if let (Some(flr), Ok(wflr)) = (flr, Symbol::new("WFLR")) {
            if prices.contains_key(&wflr) {
                prices.insert(wflr, flr);
            }
        }

        debug!(count = prices.len(), "Simulated price step");
        Ok(prices.clone())
    }
}
