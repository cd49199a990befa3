//! Client for Flare developer HTTP APIs (FTSO feeds, network stats, FDC requests).

use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{ChainError, ChainResult};
use crate::fdc::ATTESTATION_TYPES;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "FlareTrading/1.0";

pub const DEFAULT_BASE_URL: &str = "https://dev.flare.network/api";
pub const DEFAULT_FTSO_URL: &str = "https://api.flare.network/ftso/v1";
pub const DEFAULT_FDC_URL: &str = "https://api.flare.network/fdc/v1";

/// Feeds requested when the caller passes none.
pub const DEFAULT_API_FEEDS: [&str; 4] = ["FLR/USD", "ETH/USD", "BTC/USD", "USDT/USD"];

#[derive(Debug, Clone)]
pub struct FlareApiEndpoints {
    pub base_url: String,
    pub ftso_url: String,
    pub fdc_url: String,
}

impl Default for FlareApiEndpoints {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ftso_url: DEFAULT_FTSO_URL.to_string(),
            fdc_url: DEFAULT_FDC_URL.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FdcSubmission<'a> {
    attestation_type: &'a str,
    request_data: &'a Value,
    timestamp: i64,
}

pub struct FlareApiClient {
    client: Client,
    endpoints: FlareApiEndpoints,
}

impl FlareApiClient {
    pub fn new(endpoints: FlareApiEndpoints) -> ChainResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ChainError::HttpClient(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, endpoints })
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> ChainResult<Value> {
        let response = self
            .client
            .get(url)
            .header("accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| ChainError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, %status, "Flare API request failed");
            return Err(ChainError::HttpClient(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| ChainError::HttpClient(format!("Failed to parse response: {e}")))
    }

    /// Latest values for the given feeds, or the default feed set when empty.
    pub async fn ftso_feed_data(&self, feeds: &[&str]) -> ChainResult<Value> {
        let feeds: Vec<&str> = if feeds.is_empty() {
            DEFAULT_API_FEEDS.to_vec()
        } else {
            feeds.to_vec()
        };
        let url = format!("{}/feeds", self.endpoints.ftso_url);
        let data = self
            .get_json(&url, &[("symbols", feeds.join(","))])
            .await?;
        info!(feeds = feeds.len(), "Retrieved FTSO API data");
        Ok(data)
    }

    pub async fn network_stats(&self) -> ChainResult<Value> {
        let url = format!("{}/network/stats", self.endpoints.base_url);
        self.get_json(&url, &[]).await
    }

    pub async fn token_info(&self, token_address: &str) -> ChainResult<Value> {
        let url = format!("{}/tokens/{}", self.endpoints.base_url, token_address);
        self.get_json(&url, &[]).await
    }

    pub fn attestation_types(&self) -> &'static [&'static str] {
        &ATTESTATION_TYPES
    }

    /// Submit an attestation request; the FDC answers with a request id.
    pub async fn submit_fdc_request(
        &self,
        attestation_type: &str,
        request_data: &Value,
    ) -> ChainResult<Value> {
        if !ATTESTATION_TYPES.contains(&attestation_type) {
            return Err(ChainError::HttpClient(format!(
                "Unknown attestation type: {attestation_type}"
            )));
        }

        let url = format!("{}/request", self.endpoints.fdc_url);
        let payload = FdcSubmission {
            attestation_type,
            request_data,
            timestamp: Utc::now().timestamp(),
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChainError::HttpClient(format!("FDC request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, attestation_type, "FDC request rejected");
            return Err(ChainError::HttpClient(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| ChainError::HttpClient(format!("Failed to parse FDC response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submission_serialization() {
        let data = json!({"address": "0x01"});
        let payload = FdcSubmission {
            attestation_type: "AddressValidity",
            request_data: &data,
            timestamp: 1_700_000_000,
        };
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["attestationType"], "AddressValidity");
        assert_eq!(value["requestData"]["address"], "0x01");
        assert_eq!(value["timestamp"], 1_700_000_000);
    }

    #[tokio::test]
    async fn test_unknown_attestation_type_rejected_locally() {
        let client = FlareApiClient::new(FlareApiEndpoints::default()).unwrap();
        let err = client
            .submit_fdc_request("Payment", &json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unknown attestation type"));
    }

    #[test]
    fn test_attestation_types() {
        let client = FlareApiClient::new(FlareApiEndpoints::default()).unwrap();
        assert_eq!(
            client.attestation_types(),
            &["AddressValidity", "EVMTransaction", "JsonApi"]
        );
    }
}
