//! Browser wallet session.
//!
//! The dashboard serves a single user, so there is one session per process.
//! The browser wallet signs everything; the server only remembers which
//! address and chain are connected.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::info;

use flare_chain::validate_address;
use flare_telemetry::Metrics;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};

/// Network a wallet may connect on.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletChain {
    pub chain_id: u64,
    pub name: &'static str,
    pub currency: &'static str,
    pub explorer_url: &'static str,
    pub rpc_url: &'static str,
}

pub const WALLET_CHAINS: [WalletChain; 2] = [
    WalletChain {
        chain_id: 14,
        name: "Flare Network",
        currency: "FLR",
        explorer_url: "https://flare-explorer.flare.network/",
        rpc_url: "https://flare-api.flare.network/ext/C/rpc",
    },
    WalletChain {
        chain_id: 16,
        name: "Coston Testnet",
        currency: "C2FLR",
        explorer_url: "https://coston-explorer.flare.network/",
        rpc_url: "https://coston-api.flare.network/ext/C/rpc",
    },
];

const APP_NAME: &str = "Flare Trading Bot";
const APP_DESCRIPTION: &str = "AI-powered trading on Flare Network";
const APP_ICON: &str = "https://avatars.githubusercontent.com/u/37784886";

#[derive(Debug, Clone, Serialize)]
pub struct WalletSession {
    pub address: String,
    pub chain_id: u64,
    pub connected_at: DateTime<Utc>,
}

impl WalletSession {
    pub fn chain(&self) -> Option<&'static WalletChain> {
        WALLET_CHAINS.iter().find(|c| c.chain_id == self.chain_id)
    }
}

/// `GET /api/wallet/status` body.
#[derive(Debug, Clone, Serialize)]
pub struct WalletStatus {
    pub connected: bool,
    pub address: Option<String>,
    pub chain: Option<&'static WalletChain>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletMetadata {
    pub name: &'static str,
    pub description: &'static str,
    pub url: String,
    pub icons: Vec<&'static str>,
}

/// `GET /api/wallet/config` body, consumed by the WalletConnect client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletConfig {
    pub project_id: String,
    pub metadata: WalletMetadata,
    pub chains: Vec<WalletChain>,
}

impl WalletConfig {
    pub fn from_dashboard(config: &DashboardConfig) -> Self {
        Self {
            project_id: config.walletconnect_project_id.clone(),
            metadata: WalletMetadata {
                name: APP_NAME,
                description: APP_DESCRIPTION,
                url: format!("https://{}", config.app_domain),
                icons: vec![APP_ICON],
            },
            chains: WALLET_CHAINS.to_vec(),
        }
    }
}

/// Shared slot holding the connected wallet, if any.
#[derive(Clone, Default)]
pub struct WalletSessions {
    current: Arc<RwLock<Option<WalletSession>>>,
}

impl WalletSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self, address: &str, chain_id: u64) -> DashboardResult<WalletSession> {
        if !validate_address(address) {
            return Err(DashboardError::InvalidRequest(format!(
                "Invalid wallet address: {address}"
            )));
        }
        if !WALLET_CHAINS.iter().any(|c| c.chain_id == chain_id) {
            return Err(DashboardError::InvalidRequest(format!(
                "Unsupported chain id: {chain_id}"
            )));
        }

        let session = WalletSession {
            address: address.to_string(),
            chain_id,
            connected_at: Utc::now(),
        };
        *self.current.write() = Some(session.clone());
        Metrics::wallet_connected(true);
        info!(address, chain_id, "Wallet connected");
        Ok(session)
    }

    pub fn disconnect(&self) {
        if self.current.write().take().is_some() {
            Metrics::wallet_connected(false);
            info!("Wallet disconnected");
        }
    }

    pub fn current(&self) -> Option<WalletSession> {
        self.current.read().clone()
    }

    /// Address of the connected wallet, or `WalletRequired`.
    pub fn require(&self) -> DashboardResult<String> {
        self.current
            .read()
            .as_ref()
            .map(|s| s.address.clone())
            .ok_or(DashboardError::WalletRequired)
    }

    pub fn status(&self) -> WalletStatus {
        match self.current() {
            Some(session) => WalletStatus {
                connected: true,
                chain: session.chain(),
                address: Some(session.address),
            },
            None => WalletStatus {
                connected: false,
                address: None,
                chain: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLET: &str = "0x00000000000000000000000000000000000000AA";

    #[test]
    fn test_connect_and_disconnect() {
        let sessions = WalletSessions::new();
        assert!(matches!(sessions.require(), Err(DashboardError::WalletRequired)));

        let session = sessions.connect(WALLET, 14).unwrap();
        assert_eq!(session.chain().unwrap().name, "Flare Network");
        assert_eq!(sessions.require().unwrap(), WALLET);
        assert!(sessions.status().connected);

        sessions.disconnect();
        assert!(!sessions.status().connected);
        assert!(sessions.current().is_none());
    }

    #[test]
    fn test_connect_validation() {
        let sessions = WalletSessions::new();
        assert!(sessions.connect("0x1234", 14).is_err());
        assert!(sessions.connect(WALLET, 1).is_err());
        assert!(sessions.connect(WALLET, 16).is_ok());
    }

    #[test]
    fn test_wallet_config_shape() {
        let config = DashboardConfig {
            walletconnect_project_id: "abc".into(),
            app_domain: "trade.example".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(WalletConfig::from_dashboard(&config)).unwrap();
        assert_eq!(json["projectId"], "abc");
        assert_eq!(json["metadata"]["url"], "https://trade.example");
        assert_eq!(json["chains"][0]["chainId"], 14);
        assert_eq!(json["chains"][1]["explorerUrl"], "https://coston-explorer.flare.network/");
    }
}
