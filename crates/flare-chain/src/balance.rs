//! ERC-20 balance reads for a connected wallet.

use alloy::sol_types::SolCall;
use flare_core::Symbol;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

use crate::abi::IERC20;
use crate::address::{parse_address, TokenDirectory};
use crate::error::{ChainError, ChainResult};
use crate::rpc::ChainReader;
use crate::units::from_wei;

pub struct BalanceReader {
    reader: Arc<dyn ChainReader>,
    tokens: TokenDirectory,
}

impl BalanceReader {
    pub fn new(reader: Arc<dyn ChainReader>, tokens: TokenDirectory) -> Self {
        Self { reader, tokens }
    }

    /// Token balance of `wallet` in whole tokens.
    ///
    /// The native FLR sentinel has no contract, so it reports zero.
    pub async fn wallet_balance(&self, wallet: &str, symbol: &Symbol) -> ChainResult<Decimal> {
        let owner = parse_address(wallet)?;
        let token = self
            .tokens
            .get(symbol)
            .ok_or_else(|| ChainError::TokenUnknown(symbol.to_string()))?;
        if self.tokens.is_native(symbol) {
            return Ok(Decimal::ZERO);
        }

        let data = IERC20::balanceOfCall { _owner: owner }.abi_encode();
        let ret = self.reader.call(token, data).await?;
        let decoded = IERC20::balanceOfCall::abi_decode_returns(&ret, true)?;
        let balance = from_wei(decoded.balance)?;

        debug!(%symbol, wallet, %balance, "Read wallet balance");
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::MockChainReader;
    use alloy::primitives::U256;
    use alloy::sol_types::SolValue;
    use rust_decimal_macros::dec;

    const WALLET: &str = "0x00000000000000000000000000000000000000AA";

    #[tokio::test]
    async fn test_erc20_balance() {
        let mut reader = MockChainReader::new();
        reader
            .expect_call()
            .times(1)
            .returning(|_, _| Ok(U256::from(3_500_000_000_000_000_000u128).abi_encode()));

        let balances = BalanceReader::new(Arc::new(reader), TokenDirectory::flare_defaults());
        let wflr = Symbol::new("WFLR").unwrap();

        assert_eq!(balances.wallet_balance(WALLET, &wflr).await.unwrap(), dec!(3.5));
    }

    #[tokio::test]
    async fn test_native_sentinel_is_zero_without_rpc() {
        let mut reader = MockChainReader::new();
        reader.expect_call().never();

        let balances = BalanceReader::new(Arc::new(reader), TokenDirectory::flare_defaults());
        let flr = Symbol::new("FLR").unwrap();

        assert_eq!(balances.wallet_balance(WALLET, &flr).await.unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let balances = BalanceReader::new(
            Arc::new(MockChainReader::new()),
            TokenDirectory::flare_defaults(),
        );
        let eth = Symbol::new("ETH").unwrap();

        assert!(matches!(
            balances.wallet_balance(WALLET, &eth).await,
            Err(ChainError::TokenUnknown(_))
        ));
    }
}
