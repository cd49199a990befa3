//! Network endpoints and contract addresses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::fdc::FDC_MAINNET_URL;

fn default_flare_rpc() -> String {
    "https://flare-api.flare.network/ext/C/rpc".to_string()
}

fn default_coston2_rpc() -> String {
    "https://coston2-api.flare.network/ext/C/rpc".to_string()
}

fn default_songbird_rpc() -> String {
    "https://songbird-api.flare.network/ext/C/rpc".to_string()
}

fn default_contract_registry() -> String {
    "0xaD67FE66660Fb8dFE9d6b1b4240d8650e30F6019".to_string()
}

fn default_fdc_url() -> String {
    FDC_MAINNET_URL.to_string()
}

fn default_chain_id() -> u64 {
    14
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_flare_rpc")]
    pub flare_rpc_url: String,
    #[serde(default = "default_coston2_rpc")]
    pub coston2_rpc_url: String,
    #[serde(default = "default_songbird_rpc")]
    pub songbird_rpc_url: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Flare contract registry used to locate FTSOv2.
    #[serde(default = "default_contract_registry")]
    pub contract_registry: String,
    /// Trading contract; empty until deployed.
    #[serde(default)]
    pub dex_contract_address: String,
    #[serde(default = "default_fdc_url")]
    pub fdc_url: String,
    /// FDC attestation of wallet addresses is skipped without a key.
    #[serde(default)]
    pub fdc_api_key: String,
    #[serde(default)]
    pub use_oneinch: bool,
    /// Extra token contract addresses beyond FLR and WFLR.
    #[serde(default)]
    pub token_addresses: BTreeMap<String, String>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            flare_rpc_url: default_flare_rpc(),
            coston2_rpc_url: default_coston2_rpc(),
            songbird_rpc_url: default_songbird_rpc(),
            chain_id: default_chain_id(),
            contract_registry: default_contract_registry(),
            dex_contract_address: String::new(),
            fdc_url: default_fdc_url(),
            fdc_api_key: String::new(),
            use_oneinch: false,
            token_addresses: BTreeMap::new(),
        }
    }
}

impl ChainConfig {
    pub fn fdc_enabled(&self) -> bool {
        !self.fdc_api_key.trim().is_empty()
    }
}
