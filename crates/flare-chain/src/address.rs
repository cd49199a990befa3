//! Address validation and the token address directory.

use alloy::primitives::Address;
use flare_core::Symbol;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{ChainError, ChainResult};

/// Sentinel address standing in for the native FLR currency.
pub const NATIVE_FLR: Address = Address::new([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
]);

/// Official wrapped FLR contract on Flare mainnet.
pub const WFLR_ADDRESS: &str = "0x1D80c49BbBCd1C0911346656B529DF9E5c2F783d";

/// Check an account address for format: `0x` prefix, 42 chars, hex body.
///
/// Checksums are not enforced; mixed-case input is accepted as-is.
pub fn validate_address(raw: &str) -> bool {
    raw.len() == 42
        && raw.starts_with("0x")
        && raw[2..].bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse an account address, failing with `InvalidAddress` on bad format.
pub fn parse_address(raw: &str) -> ChainResult<Address> {
    let raw = raw.trim();
    if !validate_address(raw) {
        return Err(ChainError::InvalidAddress(raw.to_string()));
    }
    Address::from_str(raw).map_err(|_| ChainError::InvalidAddress(raw.to_string()))
}

/// Maps token symbols to their contract addresses on Flare.
#[derive(Debug, Clone)]
pub struct TokenDirectory {
    addresses: HashMap<Symbol, Address>,
}

impl TokenDirectory {
    pub fn new() -> Self {
        Self {
            addresses: HashMap::new(),
        }
    }

    /// FLR (native sentinel) and WFLR.
    pub fn flare_defaults() -> Self {
        let mut dir = Self::new();
        if let Ok(symbol) = Symbol::new("FLR") {
            dir.addresses.insert(symbol, NATIVE_FLR);
        }
        if let (Ok(symbol), Ok(addr)) = (Symbol::new("WFLR"), Address::from_str(WFLR_ADDRESS)) {
            dir.addresses.insert(symbol, addr);
        }
        dir
    }

    /// Register or replace a token address.
    pub fn insert(&mut self, symbol: Symbol, address: &str) -> ChainResult<()> {
        let addr = parse_address(address)?;
        self.addresses.insert(symbol, addr);
        Ok(())
    }

    pub fn get(&self, symbol: &Symbol) -> Option<Address> {
        self.addresses.get(symbol).copied()
    }

    pub fn is_native(&self, symbol: &Symbol) -> bool {
        self.get(symbol) == Some(NATIVE_FLR)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

impl Default for TokenDirectory {
    fn default() -> Self {
        Self::flare_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_address() {
        assert!(validate_address("0x1D80c49BbBCd1C0911346656B529DF9E5c2F783d"));
        assert!(!validate_address("1D80c49BbBCd1C0911346656B529DF9E5c2F783d"));
        assert!(!validate_address("0x1234"));
        assert!(!validate_address("0xZZ80c49BbBCd1C0911346656B529DF9E5c2F783d"));
    }

    #[test]
    fn test_parse_address_error_message() {
        let err = parse_address("0xabc").unwrap_err();
        assert_eq!(err.to_string(), "Invalid wallet address: 0xabc");
    }

    #[test]
    fn test_flare_defaults() {
        let dir = TokenDirectory::flare_defaults();
        let flr = Symbol::new("FLR").unwrap();
        let wflr = Symbol::new("WFLR").unwrap();

        assert_eq!(dir.len(), 2);
        assert!(dir.is_native(&flr));
        assert!(!dir.is_native(&wflr));
        assert_eq!(
            dir.get(&wflr).unwrap(),
            Address::from_str(WFLR_ADDRESS).unwrap()
        );
        assert!(dir.get(&Symbol::new("ETH").unwrap()).is_none());
    }

    #[test]
    fn test_insert_rejects_bad_address() {
        let mut dir = TokenDirectory::new();
        let usdt = Symbol::new("USDT").unwrap();

        assert!(dir.insert(usdt.clone(), "not-an-address").is_err());
        assert!(dir
            .insert(usdt.clone(), "0x96B41289D90444B8adD57e6F265DB5aE8651DF29")
            .is_ok());
        assert!(dir.get(&usdt).is_some());
    }
}
