//! Dashboard configuration.

use serde::{Deserialize, Serialize};

/// Dashboard server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Address to bind.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Interval in milliseconds between WebSocket price broadcasts.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,
    /// Maximum concurrent WebSocket connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// Basic auth username (empty = disabled).
    #[serde(default)]
    pub username: String,
    /// Basic auth password (empty = disabled).
    #[serde(default)]
    pub password: String,
    /// WalletConnect project id handed to the browser.
    #[serde(default)]
    pub walletconnect_project_id: String,
    /// Public host name used in wallet metadata.
    #[serde(default = "default_app_domain")]
    pub app_domain: String,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_update_interval_ms() -> u64 {
    5000
}

fn default_max_connections() -> usize {
    10
}

fn default_app_domain() -> String {
    "localhost:5000".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            update_interval_ms: default_update_interval_ms(),
            max_connections: default_max_connections(),
            username: String::new(),
            password: String::new(),
            walletconnect_project_id: String::new(),
            app_domain: default_app_domain(),
        }
    }
}

impl DashboardConfig {
    /// Check if basic auth is enabled.
    pub fn auth_enabled(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_table() {
        let config: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.max_connections, 10);
        assert!(!config.auth_enabled());
    }

    #[test]
    fn test_auth_requires_both_fields() {
        let mut config = DashboardConfig {
            username: "admin".into(),
            ..Default::default()
        };
        assert!(!config.auth_enabled());
        config.password = "secret".into();
        assert!(config.auth_enabled());
    }
}
