//! Assembly of unsigned DEX transactions.
//!
//! The server never signs. Each builder call returns the parameters the
//! connected wallet needs to sign and broadcast the transaction itself.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use flare_core::{Amount, Symbol};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::abi::IFlareDex;
use crate::address::{parse_address, TokenDirectory};
use crate::error::{ChainError, ChainResult};
use crate::fdc::AddressAttestor;
use crate::oneinch::SwapAggregator;
use crate::rpc::ChainReader;
use crate::units::{to_wei, GAS_PRICE_WEI};

pub const GAS_WRAP: u64 = 100_000;
pub const GAS_SWAP: u64 = 200_000;
pub const GAS_ONEINCH_SWAP: u64 = 300_000;
pub const GAS_ADD_LIQUIDITY: u64 = 250_000;
pub const GAS_CROSS_CHAIN: u64 = 400_000;

/// Which contract entry point a prepared transaction calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Wrap,
    Swap,
    OneInchSwap,
    CrossChainSwap,
    AddLiquidity,
}

impl TxKind {
    pub fn gas_limit(&self) -> u64 {
        match self {
            Self::Wrap => GAS_WRAP,
            Self::Swap => GAS_SWAP,
            Self::OneInchSwap => GAS_ONEINCH_SWAP,
            Self::CrossChainSwap => GAS_CROSS_CHAIN,
            Self::AddLiquidity => GAS_ADD_LIQUIDITY,
        }
    }
}

/// Unsigned transaction ready for the wallet.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedTx {
    pub kind: TxKind,
    pub to: String,
    pub from: String,
    /// `0x`-prefixed calldata.
    pub data: String,
    pub gas: u64,
    /// Wei, decimal string.
    #[serde(rename = "gasPrice")]
    pub gas_price: String,
    pub nonce: u64,
    /// Wei, decimal string.
    pub value: String,
    #[serde(rename = "chainId")]
    pub chain_id: u64,
    /// Human-readable summary, e.g. `Internal swap ready: 10 FLR → WFLR`.
    pub summary: String,
}

/// Builds calls against the trading contract.
pub struct DexTxBuilder {
    reader: Arc<dyn ChainReader>,
    tokens: TokenDirectory,
    dex: Option<Address>,
    chain_id: u64,
    attestor: Option<Arc<dyn AddressAttestor>>,
    aggregator: Option<Arc<dyn SwapAggregator>>,
}

impl DexTxBuilder {
    pub fn new(reader: Arc<dyn ChainReader>, tokens: TokenDirectory, chain_id: u64) -> Self {
        Self {
            reader,
            tokens,
            dex: None,
            chain_id,
            attestor: None,
            aggregator: None,
        }
    }

    /// Set the trading contract address. An empty string leaves it unset.
    pub fn with_dex_address(mut self, dex: &str) -> ChainResult<Self> {
        let dex = dex.trim();
        if !dex.is_empty() {
            self.dex = Some(parse_address(dex)?);
        }
        Ok(self)
    }

    pub fn with_attestor(mut self, attestor: Arc<dyn AddressAttestor>) -> Self {
        self.attestor = Some(attestor);
        self
    }

    pub fn with_aggregator(mut self, aggregator: Arc<dyn SwapAggregator>) -> Self {
        self.aggregator = Some(aggregator);
        self
    }

    pub fn tokens(&self) -> &TokenDirectory {
        &self.tokens
    }

    pub fn dex_address(&self) -> Option<Address> {
        self.dex
    }

    fn require_dex(&self) -> ChainResult<Address> {
        self.dex.ok_or(ChainError::DexNotDeployed)
    }

    async fn nonce(&self, wallet: Address) -> ChainResult<u64> {
        self.reader.transaction_count(wallet).await.map_err(|e| match e {
            e @ ChainError::NotConnected(_) => e,
            other => ChainError::NotConnected(other.to_string()),
        })
    }

    fn token(&self, symbol: &Symbol) -> ChainResult<Address> {
        self.tokens
            .get(symbol)
            .ok_or_else(|| ChainError::TokenUnknown(symbol.to_string()))
    }

    fn pair(&self, a: &Symbol, b: &Symbol) -> ChainResult<(Address, Address)> {
        match (self.tokens.get(a), self.tokens.get(b)) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(ChainError::TokenPairUnknown(a.to_string(), b.to_string())),
        }
    }

    async fn finish(
        &self,
        kind: TxKind,
        wallet: Address,
        data: Vec<u8>,
        value: U256,
        summary: String,
    ) -> ChainResult<PreparedTx> {
        let dex = self.require_dex()?;
        let nonce = self.nonce(wallet).await?;
        let gas = kind.gas_limit();
        info!(?kind, %wallet, nonce, gas, "Prepared transaction");
        Ok(PreparedTx {
            kind,
            to: dex.to_string(),
            from: wallet.to_string(),
            data: format!("0x{}", hex::encode(&data)),
            gas,
            gas_price: GAS_PRICE_WEI.to_string(),
            nonce,
            value: value.to_string(),
            chain_id: self.chain_id,
            summary,
        })
    }

    /// Swap through the trading contract.
    ///
    /// FLR to WFLR becomes a wrap; otherwise the internal pool is used unless
    /// `use_oneinch` asks for aggregator routing.
    pub async fn build_swap(
        &self,
        from: &Symbol,
        to: &Symbol,
        amount: Amount,
        wallet: &str,
        use_oneinch: bool,
    ) -> ChainResult<PreparedTx> {
        let dex = self.require_dex()?;
        ensure_positive(amount)?;
        let wallet_addr = parse_address(wallet)?;

        if let Some(attestor) = &self.attestor {
            if !attestor.attest_address(wallet).await? {
                warn!(wallet, "FDC rejected wallet address");
                return Err(ChainError::InvalidAddress(wallet.to_string()));
            }
        }

        let (from_addr, to_addr) = self.pair(from, to)?;
        let amount_wei = to_wei(amount)?;

        if from.as_str() == "FLR" && to.as_str() == "WFLR" {
            let data = IFlareDex::swapFLRtoWFLRCall { amount: amount_wei }.abi_encode();
            let summary = format!("Wrap transaction ready: {amount} FLR → WFLR");
            return self
                .finish(TxKind::Wrap, wallet_addr, data, amount_wei, summary)
                .await;
        }

        if use_oneinch {
            let aggregator = self
                .aggregator
                .as_ref()
                .ok_or_else(|| ChainError::AggregatorUnavailable("not configured".into()))?;
            let routed = aggregator
                .swap_data(from_addr, to_addr, amount_wei, dex)
                .await?;
            let data = IFlareDex::swapWithOneInchCall {
                tokenIn: from_addr,
                tokenOut: to_addr,
                amountIn: amount_wei,
                minReturn: routed.min_return(),
                oneInchData: Bytes::from(routed.calldata),
            }
            .abi_encode();
            let summary = format!("1inch swap ready: {amount} {from} → {to}");
            return self
                .finish(TxKind::OneInchSwap, wallet_addr, data, U256::ZERO, summary)
                .await;
        }

        let data = IFlareDex::swapCall {
            tokenIn: from_addr,
            tokenOut: to_addr,
            amountIn: amount_wei,
        }
        .abi_encode();
        let summary = format!("Internal swap ready: {amount} {from} → {to}");
        self.finish(TxKind::Swap, wallet_addr, data, U256::ZERO, summary)
            .await
    }

    /// Bridge `amount` of `from` to `destination`. Unknown `to` tokens map to the zero address.
    pub async fn build_cross_chain(
        &self,
        from: &Symbol,
        amount: Amount,
        destination: &str,
        to: &Symbol,
        wallet: &str,
        recipient: &str,
    ) -> ChainResult<PreparedTx> {
        self.require_dex()?;
        ensure_positive(amount)?;
        let wallet_addr = parse_address(wallet)?;
        let recipient_addr = parse_address(recipient)?;
        let from_addr = self.token(from)?;
        let to_addr = self.tokens.get(to).unwrap_or(Address::ZERO);

        let data = IFlareDex::crossChainSwapCall {
            tokenIn: from_addr,
            amountIn: to_wei(amount)?,
            destinationChain: destination.to_string(),
            tokenOut: to_addr,
            recipient: recipient_addr,
        }
        .abi_encode();
        let summary = format!("Cross-chain swap ready: {amount} {from} → {destination}");
        self.finish(TxKind::CrossChainSwap, wallet_addr, data, U256::ZERO, summary)
            .await
    }

    pub async fn build_add_liquidity(
        &self,
        token_a: &Symbol,
        token_b: &Symbol,
        amount_a: Amount,
        amount_b: Amount,
        wallet: &str,
    ) -> ChainResult<PreparedTx> {
        self.require_dex()?;
        ensure_positive(amount_a)?;
        ensure_positive(amount_b)?;
        let wallet_addr = parse_address(wallet)?;
        let (a, b) = self.pair(token_a, token_b)?;

        let data = IFlareDex::addLiquidityCall {
            tokenA: a,
            tokenB: b,
            amountA: to_wei(amount_a)?,
            amountB: to_wei(amount_b)?,
        }
        .abi_encode();
        let summary =
            format!("Add liquidity ready: {amount_a} {token_a} + {amount_b} {token_b}");
        self.finish(TxKind::AddLiquidity, wallet_addr, data, U256::ZERO, summary)
            .await
    }
}

fn ensure_positive(amount: Amount) -> ChainResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(ChainError::AmountNotPositive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fdc::MockAddressAttestor;
    use crate::oneinch::{AggregatorSwap, MockSwapAggregator};
    use crate::rpc::MockChainReader;
    use rust_decimal_macros::dec;

    const WALLET: &str = "0x00000000000000000000000000000000000000AA";
    const DEX: &str = "0x00000000000000000000000000000000000000dd";

    fn sym(s: &str) -> Symbol {
        Symbol::new(s).unwrap()
    }

    fn reader_with_nonce(nonce: u64) -> Arc<dyn ChainReader> {
        let mut reader = MockChainReader::new();
        reader
            .expect_transaction_count()
            .returning(move |_| Ok(nonce));
        Arc::new(reader)
    }

    fn builder(nonce: u64) -> DexTxBuilder {
        DexTxBuilder::new(reader_with_nonce(nonce), TokenDirectory::flare_defaults(), 14)
            .with_dex_address(DEX)
            .unwrap()
    }

    #[tokio::test]
    async fn test_wrap_uses_wrap_entry_point() {
        let tx = builder(3)
            .build_swap(&sym("FLR"), &sym("WFLR"), Amount::new(dec!(10)), WALLET, false)
            .await
            .unwrap();

        assert_eq!(tx.kind, TxKind::Wrap);
        assert_eq!(tx.gas, GAS_WRAP);
        assert_eq!(tx.nonce, 3);
        assert_eq!(tx.gas_price, "25000000000");
        assert_eq!(tx.value, "10000000000000000000");
        assert_eq!(tx.summary, "Wrap transaction ready: 10 FLR → WFLR");
        let selector = hex::encode(IFlareDex::swapFLRtoWFLRCall::SELECTOR);
        assert!(tx.data.starts_with(&format!("0x{selector}")));
    }

    #[tokio::test]
    async fn test_internal_swap() {
        let tx = builder(0)
            .build_swap(&sym("WFLR"), &sym("FLR"), Amount::new(dec!(2.5)), WALLET, false)
            .await
            .unwrap();

        assert_eq!(tx.kind, TxKind::Swap);
        assert_eq!(tx.gas, GAS_SWAP);
        assert_eq!(tx.value, "0");
        assert_eq!(tx.summary, "Internal swap ready: 2.5 WFLR → FLR");
        assert_eq!(tx.chain_id, 14);
    }

    #[tokio::test]
    async fn test_swap_requires_dex() {
        let b = DexTxBuilder::new(reader_with_nonce(0), TokenDirectory::flare_defaults(), 14);
        let err = b
            .build_swap(&sym("FLR"), &sym("WFLR"), Amount::new(dec!(1)), WALLET, false)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "DEX contract not deployed");
    }

    #[tokio::test]
    async fn test_swap_rejects_bad_wallet() {
        let err = builder(0)
            .build_swap(&sym("FLR"), &sym("WFLR"), Amount::new(dec!(1)), "0x12", false)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid wallet address: 0x12");
    }

    #[tokio::test]
    async fn test_swap_unknown_tokens() {
        let err = builder(0)
            .build_swap(&sym("ETH"), &sym("WFLR"), Amount::new(dec!(1)), WALLET, false)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Token addresses not found for ETH or WFLR");
    }

    #[tokio::test]
    async fn test_fdc_rejection_blocks_swap() {
        let mut attestor = MockAddressAttestor::new();
        attestor.expect_attest_address().returning(|_| Ok(false));

        let err = builder(0)
            .with_attestor(Arc::new(attestor))
            .build_swap(&sym("FLR"), &sym("WFLR"), Amount::new(dec!(1)), WALLET, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_oneinch_swap_sets_min_return() {
        let mut aggregator = MockSwapAggregator::new();
        aggregator.expect_swap_data().returning(|_, _, _, _| {
            Ok(AggregatorSwap {
                to_amount: U256::from(1_000u64),
                calldata: vec![0xab],
            })
        });

        let tx = builder(1)
            .with_aggregator(Arc::new(aggregator))
            .build_swap(&sym("WFLR"), &sym("FLR"), Amount::new(dec!(1)), WALLET, true)
            .await
            .unwrap();

        assert_eq!(tx.kind, TxKind::OneInchSwap);
        assert_eq!(tx.gas, GAS_ONEINCH_SWAP);
        assert_eq!(tx.summary, "1inch swap ready: 1 WFLR → FLR");

        let raw = hex::decode(tx.data.trim_start_matches("0x")).unwrap();
        let call = IFlareDex::swapWithOneInchCall::abi_decode(&raw, true).unwrap();
        assert_eq!(call.minReturn, U256::from(950u64));
        assert_eq!(call.oneInchData.to_vec(), vec![0xab]);
    }

    #[tokio::test]
    async fn test_cross_chain_unknown_to_token_is_zero_address() {
        let tx = builder(0)
            .build_cross_chain(&sym("WFLR"), Amount::new(dec!(5)), "ethereum", &sym("USDC"), WALLET, WALLET)
            .await
            .unwrap();

        let raw = hex::decode(tx.data.trim_start_matches("0x")).unwrap();
        let call = IFlareDex::crossChainSwapCall::abi_decode(&raw, true).unwrap();
        assert_eq!(call.tokenOut, Address::ZERO);
        assert_eq!(call.destinationChain, "ethereum");
        assert_eq!(tx.gas, GAS_CROSS_CHAIN);
        assert_eq!(tx.summary, "Cross-chain swap ready: 5 WFLR → ethereum");
    }

    #[tokio::test]
    async fn test_cross_chain_unknown_from_token() {
        let err = builder(0)
            .build_cross_chain(&sym("ETH"), Amount::new(dec!(5)), "polygon", &sym("FLR"), WALLET, WALLET)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Token address not found for ETH");
    }

    #[tokio::test]
    async fn test_add_liquidity() {
        let tx = builder(9)
            .build_add_liquidity(&sym("FLR"), &sym("WFLR"), Amount::new(dec!(100)), Amount::new(dec!(100)), WALLET)
            .await
            .unwrap();

        assert_eq!(tx.kind, TxKind::AddLiquidity);
        assert_eq!(tx.gas, GAS_ADD_LIQUIDITY);
        assert_eq!(tx.nonce, 9);
        assert_eq!(tx.summary, "Add liquidity ready: 100 FLR + 100 WFLR");
    }

    #[tokio::test]
    async fn test_non_positive_amounts_are_rejected() {
        let mut reader = MockChainReader::new();
        reader.expect_transaction_count().times(0);
        let b = DexTxBuilder::new(Arc::new(reader), TokenDirectory::flare_defaults(), 14)
            .with_dex_address(DEX)
            .unwrap();

        let swap = b
            .build_swap(&sym("FLR"), &sym("WFLR"), Amount::ZERO, WALLET, false)
            .await
            .unwrap_err();
        assert_eq!(swap.to_string(), "Amount must be greater than 0");

        let bridge = b
            .build_cross_chain(&sym("FLR"), Amount::new(dec!(-1)), "polygon", &sym("USDT"), WALLET, WALLET)
            .await
            .unwrap_err();
        assert!(matches!(bridge, ChainError::AmountNotPositive));

        let liquidity = b
            .build_add_liquidity(&sym("FLR"), &sym("WFLR"), Amount::new(dec!(5)), Amount::ZERO, WALLET)
            .await
            .unwrap_err();
        assert!(matches!(liquidity, ChainError::AmountNotPositive));
    }

    #[tokio::test]
    async fn test_rpc_failure_reports_not_connected() {
        let mut reader = MockChainReader::new();
        reader
            .expect_transaction_count()
            .returning(|_| Err(ChainError::HttpClient("HTTP 502".into())));
        let b = DexTxBuilder::new(Arc::new(reader), TokenDirectory::flare_defaults(), 14)
            .with_dex_address(DEX)
            .unwrap();

        let err = b
            .build_swap(&sym("FLR"), &sym("WFLR"), Amount::new(dec!(1)), WALLET, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::NotConnected(_)));
    }
}
