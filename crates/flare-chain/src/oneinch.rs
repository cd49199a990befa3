//! 1inch aggregator client for Flare (chain id 14).

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{ChainError, ChainResult};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ONEINCH_SWAP_URL: &str = "https://api.1inch.io/v5.0/14/swap";

/// Allowed slippage sent to the aggregator, in percent.
pub const SLIPPAGE_PERCENT: u32 = 1;

/// Router calldata and expected output for one swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorSwap {
    pub to_amount: U256,
    pub calldata: Vec<u8>,
}

impl AggregatorSwap {
    /// Minimum acceptable output: 95% of the quoted amount.
    pub fn min_return(&self) -> U256 {
        self.to_amount * U256::from(95u64) / U256::from(100u64)
    }
}

/// Source of routed swap calldata.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SwapAggregator: Send + Sync {
    async fn swap_data(
        &self,
        from_token: Address,
        to_token: Address,
        amount_wei: U256,
        executor: Address,
    ) -> ChainResult<AggregatorSwap>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSwapResponse {
    to_amount: String,
    tx: RawSwapTx,
}

#[derive(Debug, Deserialize)]
struct RawSwapTx {
    data: String,
}

impl RawSwapResponse {
    fn into_swap(self) -> ChainResult<AggregatorSwap> {
        let to_amount = U256::from_str_radix(&self.to_amount, 10)
            .map_err(|e| ChainError::AggregatorUnavailable(format!("bad toAmount: {e}")))?;
        let calldata = hex::decode(self.tx.data.trim_start_matches("0x"))
            .map_err(|e| ChainError::AggregatorUnavailable(format!("bad tx data: {e}")))?;
        Ok(AggregatorSwap {
            to_amount,
            calldata,
        })
    }
}

pub struct OneInchClient {
    client: Client,
    url: String,
}

impl OneInchClient {
    pub fn new() -> ChainResult<Self> {
        Self::with_url(ONEINCH_SWAP_URL)
    }

    pub fn with_url(url: impl Into<String>) -> ChainResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ChainError::HttpClient(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SwapAggregator for OneInchClient {
    async fn swap_data(
        &self,
        from_token: Address,
        to_token: Address,
        amount_wei: U256,
        executor: Address,
    ) -> ChainResult<AggregatorSwap> {
        let params = [
            ("fromTokenAddress", from_token.to_string()),
            ("toTokenAddress", to_token.to_string()),
            ("amount", amount_wei.to_string()),
            ("fromAddress", executor.to_string()),
            ("slippage", SLIPPAGE_PERCENT.to_string()),
            ("disableEstimate", "true".to_string()),
        ];

        let response = self
            .client
            .get(&self.url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ChainError::AggregatorUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "1inch API error");
            return Err(ChainError::AggregatorUnavailable(format!("HTTP {status}")));
        }

        let raw: RawSwapResponse = response
            .json()
            .await
            .map_err(|e| ChainError::AggregatorUnavailable(e.to_string()))?;
        let swap = raw.into_swap()?;

        info!(to_amount = %swap.to_amount, "Fetched 1inch swap data");
        Ok(swap)
    }
}
