//! Static network tables: gas costs, bridge routes, tokens offered per chain.

use flare_core::Chain;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;

/// Gas cost profile shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GasInfo {
    pub cost: &'static str,
    pub speed: &'static str,
    pub note: &'static str,
}

/// Bridge route towards or from a chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteInfo {
    pub name: &'static str,
    pub min_fee_usd: Decimal,
    pub estimated_time: &'static str,
}

pub fn gas_info(chain: Chain) -> Option<GasInfo> {
    let info = match chain {
        Chain::Ethereum => GasInfo {
            cost: "$20-80",
            speed: "Fast",
            note: "High but secure",
        },
        Chain::Flare => GasInfo {
            cost: "$0.01-0.10",
            speed: "Very Fast",
            note: "Ultra-low fees!",
        },
        Chain::Polygon => GasInfo {
            cost: "$0.001-0.01",
            speed: "Fast",
            note: "Great for small trades",
        },
        Chain::Bsc => GasInfo {
            cost: "$0.10-0.50",
            speed: "Fast",
            note: "Good middle ground",
        },
        Chain::Avalanche => GasInfo {
            cost: "$0.25-1.00",
            speed: "Fast",
            note: "High throughput",
        },
        Chain::Songbird => GasInfo {
            cost: "$0.01-0.05",
            speed: "Very Fast",
            note: "Flare's canary network",
        },
        Chain::Coston | Chain::Coston2 => return None,
    };
    Some(info)
}

/// Expected gas spend in USD for landing a bridge transfer on `chain`.
pub fn gas_estimate_usd(chain: Chain) -> Decimal {
    match chain {
        Chain::Ethereum => dec!(35),
        Chain::Avalanche => dec!(0.50),
        Chain::Bsc => dec!(0.30),
        Chain::Flare => dec!(0.05),
        Chain::Songbird => dec!(0.02),
        Chain::Polygon => dec!(0.01),
        Chain::Coston | Chain::Coston2 => Decimal::ZERO,
    }
}

/// Route used between Flare and `chain`.
pub fn route_info(chain: Chain) -> RouteInfo {
    match chain {
        Chain::Ethereum => RouteInfo {
            name: "LayerZero",
            min_fee_usd: dec!(2.00),
            estimated_time: "10-20 minutes",
        },
        Chain::Polygon => RouteInfo {
            name: "LayerZero",
            min_fee_usd: dec!(0.50),
            estimated_time: "5-10 minutes",
        },
        Chain::Bsc => RouteInfo {
            name: "LayerZero",
            min_fee_usd: dec!(0.50),
            estimated_time: "3-5 minutes",
        },
        Chain::Avalanche => RouteInfo {
            name: "LayerZero",
            min_fee_usd: dec!(0.75),
            estimated_time: "2-5 minutes",
        },
        Chain::Flare | Chain::Songbird | Chain::Coston | Chain::Coston2 => RouteInfo {
            name: "Flare Native Bridge",
            min_fee_usd: dec!(0.10),
            estimated_time: "1-2 minutes",
        },
    }
}

/// Tokens the assistant can price and offer on each bridge target.
pub fn chain_tokens(chain: Chain) -> &'static [&'static str] {
    match chain {
        Chain::Flare => &["FLR", "WFLR", "ETH", "USDT", "MATIC", "METIS", "APE"],
        Chain::Ethereum => &["ETH", "USDT", "APE", "MATIC"],
        Chain::Polygon => &["MATIC", "USDT", "ETH"],
        Chain::Bsc | Chain::Avalanche => &["USDT", "ETH"],
        Chain::Songbird => &["FLR", "WFLR"],
        Chain::Coston | Chain::Coston2 => &[],
    }
}

/// Chain entry for the cross-chain UI.
#[derive(Debug, Clone, Serialize)]
pub struct ChainInfo {
    pub name: &'static str,
    pub chain_id: u64,
    pub native_token: &'static str,
    pub tokens: &'static [&'static str],
    pub gas_cost: Option<&'static str>,
    pub bridge: &'static str,
    pub bridge_time: &'static str,
    pub rpc_connected: bool,
}

/// Bridge targets keyed by chain key (`flare`, `ethereum`, ...).
///
/// `flare_connected` reflects the live RPC check; remote chains are only
/// quoted, never queried, so they are always offered.
pub fn supported_chains(flare_connected: bool) -> BTreeMap<&'static str, ChainInfo> {
    Chain::BRIDGE_TARGETS
        .iter()
        .map(|chain| {
            let route = route_info(*chain);
            let info = ChainInfo {
                name: chain.display_name(),
                chain_id: chain.chain_id(),
                native_token: chain.native_currency(),
                tokens: chain_tokens(*chain),
                gas_cost: gas_info(*chain).map(|g| g.cost),
                bridge: route.name,
                bridge_time: route.estimated_time,
                rpc_connected: *chain != Chain::Flare || flare_connected,
            };
            (chain.key(), info)
        })
        .collect()
}
