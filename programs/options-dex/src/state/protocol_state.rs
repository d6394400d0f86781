use anchor_lang::prelude::*;
use crate::constants::MAX_FEE_RATE_BPS;
use crate::errors::OptionsError;

/// Protocol-level configuration and statistics
/// Single PDA created once by `initialize_protocol`
#[account]
#[derive(Default)]
pub struct ProtocolState {
    /// Protocol admin - owns the fee collection token accounts
    pub authority: Pubkey,

    // ============================================================
    // FEE RATES (basis points, 0-10000)
    // ============================================================

    /// Charged on premium at purchase
    pub protocol_fee_rate: u16,

    /// Charged on strike notional at exercise
    pub settlement_fee_rate: u16,

    /// Charged on collateral returned at expiry claim
    pub liquidation_fee_rate: u16,

    // ============================================================
    // STATISTICS
    // ============================================================

    /// Lifetime premium volume in micro-units
    pub total_volume: u64,

    /// Lifetime fees routed to the protocol in micro-units
    pub total_fees_collected: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl ProtocolState {
    pub const LEN: usize = 8  // discriminator
        + 32  // authority
        + 2   // protocol_fee_rate
        + 2   // settlement_fee_rate
        + 2   // liquidation_fee_rate
        + 8   // total_volume
        + 8   // total_fees_collected
        + 1   // bump
        + 32; // padding

    pub fn validate_fee_rates(protocol: u16, settlement: u16, liquidation: u16) -> Result<()> {
        require!(
            protocol <= MAX_FEE_RATE_BPS
                && settlement <= MAX_FEE_RATE_BPS
                && liquidation <= MAX_FEE_RATE_BPS,
            OptionsError::InvalidFeeRate
        );
        Ok(())
    }

    /// Counters only ever grow
    pub fn record_activity(&mut self, volume: u64, fees: u64) -> Result<()> {
        let total_volume = self.total_volume
            .checked_add(volume)
            .ok_or(OptionsError::MathOverflow)?;
        let total_fees_collected = self.total_fees_collected
            .checked_add(fees)
            .ok_or(OptionsError::MathOverflow)?;
        self.total_volume = total_volume;
        self.total_fees_collected = total_fees_collected;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_rate_validation() {
        assert!(ProtocolState::validate_fee_rates(50, 10, 20).is_ok());
        assert!(ProtocolState::validate_fee_rates(10_000, 10_000, 10_000).is_ok());
        assert_eq!(
            ProtocolState::validate_fee_rates(10_001, 0, 0).unwrap_err(),
            OptionsError::InvalidFeeRate.into()
        );
        assert!(ProtocolState::validate_fee_rates(0, 0, u16::MAX).is_err());
    }

    #[test]
    fn test_record_activity_accumulates() {
        let mut state = ProtocolState::default();
        state.record_activity(1_500_000, 7_500).unwrap();
        state.record_activity(3_500_000, 17_500).unwrap();
        assert_eq!(state.total_volume, 5_000_000);
        assert_eq!(state.total_fees_collected, 25_000);
    }

    #[test]
    fn test_record_activity_overflow_leaves_state() {
        let mut state = ProtocolState {
            total_volume: u64::MAX,
            ..Default::default()
        };
        assert!(state.record_activity(1, 0).is_err());
        assert_eq!(state.total_volume, u64::MAX);
        assert_eq!(state.total_fees_collected, 0);
    }
}
