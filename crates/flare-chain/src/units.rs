//! Conversions between decimal token amounts and 18-decimal integer units.

use alloy::primitives::U256;
use flare_core::Amount;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{ChainError, ChainResult};

/// Decimals used by FLR, WFLR and the ERC-20 tokens the assistant handles.
pub const TOKEN_DECIMALS: u32 = 18;

/// 25 gwei, the fixed gas price used for every prepared transaction.
pub const GAS_PRICE_WEI: u64 = 25_000_000_000;

/// Convert a token amount into wei, truncating sub-wei precision.
pub fn to_wei(amount: Amount) -> ChainResult<U256> {
    let scale = Decimal::from(10u64.pow(TOKEN_DECIMALS));
    let scaled = amount
        .inner()
        .checked_mul(scale)
        .ok_or_else(|| ChainError::AmountOutOfRange(amount.to_string()))?
        .trunc();
    let wei = scaled
        .to_u128()
        .ok_or_else(|| ChainError::AmountOutOfRange(amount.to_string()))?;
    Ok(U256::from(wei))
}

/// Convert wei into a decimal token amount.
pub fn from_wei(wei: U256) -> ChainResult<Decimal> {
    scaled_to_decimal(wei, TOKEN_DECIMALS)
}

/// Interpret `value` as a fixed-point integer with `decimals` fractional digits.
pub fn scaled_to_decimal(value: U256, decimals: u32) -> ChainResult<Decimal> {
    let raw = u128::try_from(value)
        .ok()
        .and_then(|v| i128::try_from(v).ok())
        .ok_or_else(|| ChainError::AmountOutOfRange(value.to_string()))?;
    Decimal::try_from_i128_with_scale(raw, decimals)
        .map(|d| d.normalize())
        .map_err(|_| ChainError::AmountOutOfRange(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_wei() {
        let wei = to_wei(Amount::new(dec!(1.5))).unwrap();
        assert_eq!(wei, U256::from(1_500_000_000_000_000_000u128));
    }

    #[test]
    fn test_to_wei_truncates_dust() {
        let wei = to_wei(Amount::new(dec!(0.0000000000000000019))).unwrap();
        assert_eq!(wei, U256::from(1u64));
    }

    #[test]
    fn test_to_wei_rejects_negative() {
        assert!(to_wei(Amount::new(dec!(-1))).is_err());
    }

    #[test]
    fn test_from_wei() {
        let value = from_wei(U256::from(2_250_000_000_000_000_000u128)).unwrap();
        assert_eq!(value, dec!(2.25));
    }

    #[test]
    fn test_scaled_to_decimal() {
        assert_eq!(scaled_to_decimal(U256::from(1_834_512u64), 7).unwrap(), dec!(0.1834512));
        assert!(scaled_to_decimal(U256::MAX, 18).is_err());
    }
}
