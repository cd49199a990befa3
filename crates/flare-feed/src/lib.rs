//! Token price sources for the Flare trading assistant.
//!
//! Live mode reads FTSOv2 on-chain and falls back to CoinGecko; demo mode
//! random-walks the seeded prices. `PriceAggregator` applies the fallback
//! order and remembers the last good answer.

pub mod aggregator;
pub mod coingecko;
pub mod error;
pub mod ftso;
pub mod simulated;
pub mod source;

pub use aggregator::{PriceAggregator, PriceCache, PriceSnapshot};
pub use coingecko::CoinGeckoSource;
pub use error::{FeedError, FeedResult};
pub use ftso::FtsoSource;
pub use simulated::SimulatedSource;
pub use source::{PriceMap, PriceSource};
