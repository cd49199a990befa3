//! Networks known to the assistant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A blockchain network.
///
/// Flare and its testnets are where trades execute; the others are bridge
/// destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Flare,
    Coston,
    Coston2,
    Songbird,
    Ethereum,
    Polygon,
    Bsc,
    Avalanche,
}

impl Chain {
    /// Bridge destinations offered in the UI and chat.
    pub const BRIDGE_TARGETS: [Chain; 5] = [
        Chain::Flare,
        Chain::Ethereum,
        Chain::Polygon,
        Chain::Bsc,
        Chain::Avalanche,
    ];

    /// Resolve a user-typed chain name, accepting common aliases.
    pub fn parse_alias(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "flare" | "flr" => Some(Self::Flare),
            "coston" => Some(Self::Coston),
            "coston2" => Some(Self::Coston2),
            "songbird" | "sgb" => Some(Self::Songbird),
            "ethereum" | "eth" => Some(Self::Ethereum),
            "polygon" | "matic" | "poly" => Some(Self::Polygon),
            "bsc" | "bnb" | "binance" => Some(Self::Bsc),
            "avalanche" | "avax" => Some(Self::Avalanche),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Flare => "flare",
            Self::Coston => "coston",
            Self::Coston2 => "coston2",
            Self::Songbird => "songbird",
            Self::Ethereum => "ethereum",
            Self::Polygon => "polygon",
            Self::Bsc => "bsc",
            Self::Avalanche => "avalanche",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Flare => "Flare",
            Self::Coston => "Coston",
            Self::Coston2 => "Coston2",
            Self::Songbird => "Songbird",
            Self::Ethereum => "Ethereum",
            Self::Polygon => "Polygon",
            Self::Bsc => "BSC",
            Self::Avalanche => "Avalanche",
        }
    }

    /// EVM chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Flare => 14,
            Self::Coston => 16,
            Self::Coston2 => 114,
            Self::Songbird => 19,
            Self::Ethereum => 1,
            Self::Polygon => 137,
            Self::Bsc => 56,
            Self::Avalanche => 43114,
        }
    }

    pub fn from_chain_id(id: u64) -> Option<Self> {
        [
            Self::Flare,
            Self::Coston,
            Self::Coston2,
            Self::Songbird,
            Self::Ethereum,
            Self::Polygon,
            Self::Bsc,
            Self::Avalanche,
        ]
        .into_iter()
        .find(|c| c.chain_id() == id)
    }

    pub fn native_currency(&self) -> &'static str {
        match self {
            Self::Flare => "FLR",
            Self::Coston => "CFLR",
            Self::Coston2 => "C2FLR",
            Self::Songbird => "SGB",
            Self::Ethereum => "ETH",
            Self::Polygon => "MATIC",
            Self::Bsc => "BNB",
            Self::Avalanche => "AVAX",
        }
    }

    pub fn is_flare_family(&self) -> bool {
        matches!(self, Self::Flare | Self::Coston | Self::Coston2 | Self::Songbird)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Chain {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_alias(s).ok_or_else(|| CoreError::UnknownChain(s.to_string()))
    }
}
