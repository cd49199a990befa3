//! Flare network access for the trading assistant.
//!
//! - `rpc`: JSON-RPC reads (`eth_call`, nonces, chain id)
//! - `ftso`: FTSOv2 feed reads via the contract registry
//! - `builder`: unsigned DEX transactions for the connected wallet
//! - `bridge`: local cross-chain quotes
//! - `fdc`, `oneinch`, `flare_api`: external HTTP services
//!
//! Nothing here signs or broadcasts; prepared transactions go back to the
//! browser wallet.

pub mod abi;
pub mod address;
pub mod balance;
pub mod bridge;
pub mod builder;
pub mod config;
pub mod error;
pub mod fdc;
pub mod flare_api;
pub mod ftso;
pub mod networks;
pub mod oneinch;
pub mod rpc;
pub mod units;

pub use address::{parse_address, validate_address, TokenDirectory, NATIVE_FLR};
pub use balance::BalanceReader;
pub use bridge::{BridgeQuoter, CrossChainQuote};
pub use builder::{DexTxBuilder, PreparedTx, TxKind};
pub use config::ChainConfig;
pub use error::{ChainError, ChainResult};
pub use fdc::{AddressAttestor, FdcClient};
pub use flare_api::{FlareApiClient, FlareApiEndpoints};
pub use ftso::{FeedValue, FtsoReader, DEFAULT_FEEDS};
pub use networks::{gas_info, supported_chains, ChainInfo, GasInfo};
pub use oneinch::{AggregatorSwap, OneInchClient, SwapAggregator};
pub use rpc::{ChainReader, RpcClient};
