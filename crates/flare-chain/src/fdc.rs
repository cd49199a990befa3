//! Flare Data Connector (FDC) data-availability client.

use alloy::primitives::B256;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ChainError, ChainResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Mainnet data-availability endpoint.
pub const FDC_MAINNET_URL: &str = "https://flr-data-availability.flare.network/api/v1/fdc";
/// Coston2 data-availability endpoint.
pub const FDC_COSTON2_URL: &str = "https://ctn2-data-availability.flare.network/api/v1/fdc";

/// Voting round used when the caller does not supply one.
pub const DEFAULT_VOTING_ROUND: u64 = 1_028_678;

/// Attestation types offered by the FDC.
pub const ATTESTATION_TYPES: [&str; 3] = ["AddressValidity", "EVMTransaction", "JsonApi"];

/// Proves that an address is valid on its network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressAttestor: Send + Sync {
    async fn attest_address(&self, address: &str) -> ChainResult<bool>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProofRequest<'a> {
    voting_round_id: u64,
    request_bytes: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ProofResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Encode an attestation type name as a right-padded `bytes32`.
pub fn encode_attestation_type(name: &str) -> B256 {
    let mut word = [0u8; 32];
    let bytes = name.as_bytes();
    let len = bytes.len().min(32);
    word[..len].copy_from_slice(&bytes[..len]);
    B256::from(word)
}

/// Request bytes for an `AddressValidity` proof lookup.
pub fn encode_address_validation_request(address: &str) -> String {
    let kind = encode_attestation_type("AddressValidity");
    format!(
        "0x{}{}",
        hex::encode(kind.as_slice()),
        address.trim_start_matches("0x").to_ascii_lowercase()
    )
}

pub struct FdcClient {
    client: Client,
    base_url: String,
    api_key: String,
    voting_round: u64,
}

impl FdcClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> ChainResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ChainError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            voting_round: DEFAULT_VOTING_ROUND,
        })
    }

    pub fn with_voting_round(mut self, round: u64) -> Self {
        self.voting_round = round;
        self
    }

    /// Fetch a proof for previously submitted request bytes.
    pub async fn proof_by_request_round(&self, request_bytes: &str) -> ChainResult<ProofResponse> {
        let url = format!("{}/proof-by-request-round", self.base_url);
        let payload = ProofRequest {
            voting_round_id: self.voting_round,
            request_bytes,
        };

        let response = self
            .client
            .post(&url)
            .header("accept", "application/json")
            .header("x-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChainError::HttpClient(format!("FDC request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "FDC proof lookup failed");
            return Err(ChainError::HttpClient(format!("HTTP {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| ChainError::HttpClient(format!("Failed to parse FDC response: {e}")))
    }
}

#[async_trait]
impl AddressAttestor for FdcClient {
    async fn attest_address(&self, address: &str) -> ChainResult<bool> {
        let request = encode_address_validation_request(address);
        let proof = self.proof_by_request_round(&request).await?;
        let valid = proof.status.as_deref() == Some("VALID");
        debug!(address, valid, "FDC address attestation");
        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_attestation_type() {
        let word = encode_attestation_type("AddressValidity");
        assert_eq!(
            hex::encode(&word[..15]),
            "4164647265737356616c6964697479"
        );
        assert!(word[15..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_address_validation_request() {
        let req = encode_address_validation_request("0xABCDEF0000000000000000000000000000000001");
        assert!(req.starts_with("0x4164647265737356616c6964697479"));
        assert!(req.ends_with("abcdef0000000000000000000000000000000001"));
        assert_eq!(req.len(), 2 + 64 + 40);
    }

    #[test]
    fn test_proof_request_serialization() {
        let req = ProofRequest {
            voting_round_id: DEFAULT_VOTING_ROUND,
            request_bytes: "0x00",
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"votingRoundId":1028678,"requestBytes":"0x00"}"#
        );
    }

    #[test]
    fn test_proof_response_status() {
        let proof: ProofResponse =
            serde_json::from_str(r#"{"status":"VALID","response":{}}"#).unwrap();
        assert_eq!(proof.status.as_deref(), Some("VALID"));
        assert!(proof.extra.contains_key("response"));
    }
}
