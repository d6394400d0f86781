use anchor_lang::prelude::*;
use crate::constants::{BPS_DENOMINATOR, SCALE};
use crate::errors::OptionsError;

/// Multiply a micro-unit price by a micro-unit quantity and rescale.
///
/// Multiplication happens first and is overflow-checked, so the intermediate
/// product is bounded by `u64::MAX`. Division truncates toward zero.
pub fn scaled_mul(price: u64, quantity: u64) -> Result<u64> {
    let value = price
        .checked_mul(quantity)
        .ok_or(OptionsError::MathOverflow)?
        .checked_div(SCALE)
        .ok_or(OptionsError::MathOverflow)?;
    Ok(value)
}

/// `amount * rate_bps / 10000`, truncated
pub fn bps_of(amount: u64, rate_bps: u16) -> Result<u64> {
    let value = amount
        .checked_mul(rate_bps as u64)
        .ok_or(OptionsError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR)
        .ok_or(OptionsError::MathOverflow)?;
    Ok(value)
}

/// A gross amount split between the protocol fee and the counterparty
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub gross: u64,
    pub fee: u64,
    pub net: u64,
}

/// Split `gross` into `fee = gross * rate / 10000` and `net = gross - fee`.
/// `fee + net == gross` always holds.
pub fn split_fee(gross: u64, rate_bps: u16) -> Result<FeeSplit> {
    let fee = bps_of(gross, rate_bps)?;
    let net = gross.checked_sub(fee).ok_or(OptionsError::MathOverflow)?;
    Ok(FeeSplit { gross, fee, net })
}

/// Premium owed for `contracts` at `premium_per_contract`, split by the protocol fee rate
pub fn premium_breakdown(
    premium_per_contract: u64,
    contracts: u64,
    protocol_fee_rate: u16,
) -> Result<FeeSplit> {
    let total_premium = scaled_mul(premium_per_contract, contracts)?;
    split_fee(total_premium, protocol_fee_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_mul_truncates() {
        assert_eq!(scaled_mul(100_000_000, 300_000).unwrap(), 30_000_000);
        assert_eq!(scaled_mul(5_000_000, 1).unwrap(), 5);
        assert_eq!(scaled_mul(999_999, 1).unwrap(), 0);
        assert_eq!(scaled_mul(0, u64::MAX).unwrap(), 0);
    }

    #[test]
    fn test_scaled_mul_overflow() {
        let err = scaled_mul(u64::MAX, 2).unwrap_err();
        assert_eq!(err, OptionsError::MathOverflow.into());
    }

    #[test]
    fn test_bps_of() {
        assert_eq!(bps_of(1_500_000, 50).unwrap(), 7_500);
        assert_eq!(bps_of(199, 50).unwrap(), 0); // 0.995 rounds toward zero
        assert_eq!(bps_of(1_000, 10_000).unwrap(), 1_000);
        assert_eq!(bps_of(1_000, 0).unwrap(), 0);
        assert!(bps_of(u64::MAX, 2).is_err());
    }

    #[test]
    fn test_premium_split_matches_reference_purchase() {
        // 300_000 contracts at 5.0 premium, 0.5% protocol fee
        let split = premium_breakdown(5_000_000, 300_000, 50).unwrap();
        assert_eq!(split.gross, 1_500_000);
        assert_eq!(split.fee, 7_500);
        assert_eq!(split.net, 1_492_500);
    }

    #[test]
    fn test_split_is_exact_for_awkward_amounts() {
        for gross in [1u64, 7, 199, 10_001, 123_456_789, u64::MAX / 10_000] {
            for rate in [0u16, 1, 33, 50, 9_999, 10_000] {
                let split = split_fee(gross, rate).unwrap();
                assert_eq!(split.fee + split.net, gross);
                assert_eq!(split.fee, gross * rate as u64 / 10_000);
            }
        }
    }
}
