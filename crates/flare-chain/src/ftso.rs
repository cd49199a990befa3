//! FTSOv2 feed reads through the Flare contract registry.

use alloy::primitives::{Address, FixedBytes};
use alloy::sol_types::SolCall;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

use crate::abi::{IFlareContractRegistry, IFtsoV2};
use crate::error::{ChainError, ChainResult};
use crate::rpc::ChainReader;
use crate::units::scaled_to_decimal;

/// Feed category byte for crypto pairs.
const CATEGORY_CRYPTO: u8 = 0x01;

/// Feeds read on every refresh, in request order.
pub const DEFAULT_FEEDS: [&str; 5] = ["FLR/USD", "BTC/USD", "ETH/USD", "XRP/USD", "USDT/USD"];

/// Build a 21-byte feed id: category byte followed by the zero-padded ASCII name.
pub fn feed_id(name: &str) -> ChainResult<FixedBytes<21>> {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes.len() > 20 {
        return Err(ChainError::Abi(format!("Feed name length out of range: {name}")));
    }
    let mut id = [0u8; 21];
    id[0] = CATEGORY_CRYPTO;
    id[1..=bytes.len()].copy_from_slice(bytes);
    Ok(FixedBytes::from(id))
}

/// One decoded feed value.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedValue {
    /// Feed name such as `FLR/USD`.
    pub name: String,
    pub value: Decimal,
    /// Unix seconds of the voting round the value belongs to.
    pub timestamp: u64,
}

impl FeedValue {
    /// Base asset of the pair (`FLR` for `FLR/USD`).
    pub fn base(&self) -> &str {
        self.name.split('/').next().unwrap_or(&self.name)
    }
}

/// Reads FTSOv2 feeds, resolving the FTSOv2 address from the registry on each call.
pub struct FtsoReader {
    reader: Arc<dyn ChainReader>,
    registry: Address,
}

impl FtsoReader {
    pub fn new(reader: Arc<dyn ChainReader>, registry: Address) -> Self {
        Self { reader, registry }
    }

    async fn ftso_address(&self) -> ChainResult<Address> {
        let data = IFlareContractRegistry::getFtsoV2Call {}.abi_encode();
        let ret = self.reader.call(self.registry, data).await?;
        let decoded = IFlareContractRegistry::getFtsoV2Call::abi_decode_returns(&ret, true)?;
        Ok(decoded._0)
    }

    /// Read the named feeds. Values are scaled by `10^|decimals|`.
    pub async fn read_feeds(&self, names: &[&str]) -> ChainResult<Vec<FeedValue>> {
        let ftso = self.ftso_address().await?;
        debug!(%ftso, feeds = names.len(), "Resolved FTSOv2 address");

        let ids = names
            .iter()
            .map(|n| feed_id(n))
            .collect::<ChainResult<Vec<_>>>()?;
        let data = IFtsoV2::getFeedsByIdCall { _feedIds: ids }.abi_encode();
        let ret = self.reader.call(ftso, data).await?;
        let decoded = IFtsoV2::getFeedsByIdCall::abi_decode_returns(&ret, true)?;

        let mut feeds = Vec::with_capacity(names.len());
        for ((name, value), decimals) in names
            .iter()
            .zip(decoded._values.iter())
            .zip(decoded._decimals.iter())
        {
            let value = scaled_to_decimal(*value, u32::from(decimals.unsigned_abs()))?;
            feeds.push(FeedValue {
                name: (*name).to_string(),
                value,
                timestamp: decoded._timestamp,
            });
        }

        info!(count = feeds.len(), "Read FTSO feeds");
        Ok(feeds)
    }
}
