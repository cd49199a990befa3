//! Application configuration.

use std::collections::BTreeMap;
use std::path::Path;

use clap::ValueEnum;
use flare_chain::{validate_address, ChainConfig};
use flare_core::{Amount, Symbol};
use flare_dashboard::DashboardConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OperatingMode {
    /// Simulated prices, seeded demo balances.
    #[default]
    Demo,
    /// FTSOv2 prices with CoinGecko fallback.
    Live,
}

/// Price refresh configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricesConfig {
    /// Seconds between background refreshes. Default: 30.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// Skip CoinGecko in live mode.
    #[serde(default)]
    pub ftso_only: bool,
}

fn default_refresh_interval_secs() -> u64 {
    30
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval_secs(),
            ftso_only: false,
        }
    }
}

/// Trade and chat journal configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Directory for the JSON Lines journals.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Records buffered before a write.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    /// Records loaded back per journal at startup.
    #[serde(default = "default_restore_limit")]
    pub restore_limit: usize,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_buffer_size() -> usize {
    20
}

fn default_restore_limit() -> usize {
    100
}

fn default_enabled() -> bool {
    true
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            buffer_size: default_buffer_size(),
            restore_limit: default_restore_limit(),
            enabled: default_enabled(),
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Default log filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info,flare=debug".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mode: OperatingMode,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub prices: PricesConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Starting balances in demo mode, e.g. `FLR = 1000.0`.
    #[serde(default)]
    pub demo_holdings: BTreeMap<String, f64>,
}

impl AppConfig {
    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        Self::from_toml(&content)
    }

    /// Load from `path`, or defaults when the file does not exist.
    pub fn from_file_or_default(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Apply secrets and endpoints from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`; empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("FLARE_RPC_URL") {
            self.chain.flare_rpc_url = v;
        }
        if let Some(v) = get("COSTON2_RPC_URL") {
            self.chain.coston2_rpc_url = v;
        }
        if let Some(v) = get("SONGBIRD_RPC_URL") {
            self.chain.songbird_rpc_url = v;
        }
        if let Some(v) = get("CONTRACT_REGISTRY") {
            self.chain.contract_registry = v;
        }
        if let Some(v) = get("DEX_CONTRACT_ADDRESS") {
            self.chain.dex_contract_address = v;
        }
        if let Some(v) = get("FDC_API_KEY") {
            self.chain.fdc_api_key = v;
        }
        if let Some(v) = get("WALLETCONNECT_PROJECT_ID") {
            self.dashboard.walletconnect_project_id = v;
        }
        if let Some(v) = get("APP_DOMAIN") {
            self.dashboard.app_domain = v;
        }
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> AppResult<()> {
        if self.prices.refresh_interval_secs == 0 {
            return Err(AppError::Config(
                "prices.refresh_interval_secs must be positive".to_string(),
            ));
        }
        if !validate_address(&self.chain.contract_registry) {
            return Err(AppError::Config(format!(
                "Invalid contract registry address: {}",
                self.chain.contract_registry
            )));
        }
        let dex = self.chain.dex_contract_address.trim();
        if !dex.is_empty() && !validate_address(dex) {
            return Err(AppError::Config(format!("Invalid DEX contract address: {dex}")));
        }
        self.starting_holdings().map(|_| ())
    }

    pub fn is_demo(&self) -> bool {
        self.mode == OperatingMode::Demo
    }

    /// Demo balances as ledger entries.
    pub fn starting_holdings(&self) -> AppResult<Vec<(Symbol, Amount)>> {
        self.demo_holdings
            .iter()
            .map(|(symbol, amount)| {
                let symbol = Symbol::new(symbol)
                    .map_err(|e| AppError::Config(format!("demo_holdings: {e}")))?;
                let amount = Amount::from_f64(*amount).ok_or_else(|| {
                    AppError::Config(format!("demo_holdings: invalid amount for {symbol}"))
                })?;
                Ok((symbol, amount))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.is_demo());
        assert_eq!(config.dashboard.port, 5000);
        assert_eq!(config.prices.refresh_interval_secs, 30);
        assert!(config.demo_holdings.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = AppConfig::from_toml(
            r#"
            mode = "live"

            [dashboard]
            port = 8080

            [chain]
            use_oneinch = true

            [demo_holdings]
            FLR = 1000.0
            usdt = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.mode, OperatingMode::Live);
        assert_eq!(config.dashboard.port, 8080);
        assert_eq!(config.dashboard.bind_address, "0.0.0.0");
        assert!(config.chain.use_oneinch);
        assert_eq!(config.chain.chain_id, 14);

        let holdings = config.starting_holdings().unwrap();
        assert_eq!(holdings.len(), 2);
        assert!(holdings.iter().any(|(s, _)| s.as_str() == "USDT"));
    }

    #[test]
    fn test_env_overrides() {
        let env = HashMap::from([
            ("FLARE_RPC_URL", "http://localhost:9650/ext/C/rpc"),
            ("DEX_CONTRACT_ADDRESS", "0x1D80c49BbBCd1C0911346656B529DF9E5c2F783d"),
            ("APP_DOMAIN", "trade.example.org"),
            ("FDC_API_KEY", "  "),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.chain.flare_rpc_url, "http://localhost:9650/ext/C/rpc");
        assert_eq!(config.dashboard.app_domain, "trade.example.org");
        assert!(!config.chain.fdc_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = AppConfig::default();
        config.chain.dex_contract_address = "0x1234".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = AppConfig::default();
        config.demo_holdings.insert("FLR".to_string(), -1.0);
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.prices.refresh_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AppConfig::from_file_or_default("/nonexistent/flare.toml").unwrap();
        assert!(config.is_demo());
        assert!(AppConfig::from_file("/nonexistent/flare.toml").is_err());
    }

    #[test]
    fn test_config_serialization() {
        let toml_str = toml::to_string(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("mode"));
        assert!(toml_str.contains("refresh_interval_secs"));
    }
}
