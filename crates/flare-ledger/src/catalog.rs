//! Default token set.

use flare_core::{Price, Symbol, Token};
use rust_decimal::Decimal;

/// Static description of a default token.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub symbol: &'static str,
    pub name: &'static str,
    pub contract_address: &'static str,
    /// Starting demo price in USD, scaled by 1e4.
    pub demo_price_e4: i64,
}

/// Native FLR has no contract; this sentinel stands in for it.
pub const NATIVE_FLR_ADDRESS: &str = "0x0000000000000000000000000000000000000001";

pub const DEFAULT_TOKENS: [CatalogEntry; 7] = [
    CatalogEntry { symbol: "FLR", name: "Flare", contract_address: NATIVE_FLR_ADDRESS, demo_price_e4: 235 },
    CatalogEntry { symbol: "WFLR", name: "Wrapped Flare", contract_address: "0x1D80c49BbBCd1C0911346656B529DF9E5c2F783d", demo_price_e4: 235 },
    CatalogEntry { symbol: "ETH", name: "Ethereum", contract_address: "0x6B7a87899490EcE95443e979cA9485CBE7E71522", demo_price_e4: 32_000_000 },
    CatalogEntry { symbol: "USDT", name: "Tether USD", contract_address: "0xf56e6317dC9B91F36bCDBEA4ee6c1aFd6C537e30", demo_price_e4: 10_000 },
    CatalogEntry { symbol: "MATIC", name: "Polygon", contract_address: "0x2C78f1b70Ccf63CDEe49F9233e9fAa99D43AA07e", demo_price_e4: 7_200 },
    CatalogEntry { symbol: "METIS", name: "Metis", contract_address: "0x8bE71B7871C8B4B0BA2d3aD0b1C0b7f7a83b4B2f", demo_price_e4: 450_000 },
    CatalogEntry { symbol: "APE", name: "ApeCoin", contract_address: "0x3c78f1b70Ccf63CDEe49F9233e9fAa99D43AA07e", demo_price_e4: 13_500 },
];

impl CatalogEntry {
    pub fn demo_price(&self) -> Price {
        Price::new(Decimal::new(self.demo_price_e4, 4))
    }

    /// Build the token row. `live` starts at zero until the first price fetch.
    pub fn to_token(&self, live: bool) -> Token {
        let symbol = Symbol::new(self.symbol).expect("catalog symbols are valid");
        let price = if live { Price::ZERO } else { self.demo_price() };
        Token::new(symbol, self.name, self.contract_address, price)
    }
}

/// Comma-separated list for chat replies.
pub fn supported_symbols() -> String {
    DEFAULT_TOKENS
        .iter()
        .map(|t| t.symbol)
        .collect::<Vec<_>>()
        .join(", ")
}
