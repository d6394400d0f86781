use anchor_lang::prelude::*;
use crate::errors::OptionsError;

/// One market per operator-chosen id, pairing an underlying mint with a quote mint
#[account]
#[derive(Default)]
pub struct OptionsMarket {
    pub market_id: u64,

    /// Fixed at creation
    pub underlying_mint: Pubkey,

    /// Fixed at creation
    pub quote_mint: Pubkey,

    /// May toggle `is_active`
    pub authority: Pubkey,

    /// Number of option contracts written against this market
    pub total_options_written: u64,

    /// Lifetime premium volume in micro-units
    pub total_volume: u64,

    pub is_active: bool,

    /// PDA bump seed
    pub bump: u8,
}

impl OptionsMarket {
    pub const LEN: usize = 8  // discriminator
        + 8   // market_id
        + 32  // underlying_mint
        + 32  // quote_mint
        + 32  // authority
        + 8   // total_options_written
        + 8   // total_volume
        + 1   // is_active
        + 1   // bump
        + 32; // padding

    pub fn record_write(&mut self) -> Result<()> {
        self.total_options_written = self.total_options_written
            .checked_add(1)
            .ok_or(OptionsError::MathOverflow)?;
        Ok(())
    }

    pub fn record_volume(&mut self, premium: u64) -> Result<()> {
        self.total_volume = self.total_volume
            .checked_add(premium)
            .ok_or(OptionsError::MathOverflow)?;
        Ok(())
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    /// Paused markets refuse new writes; existing contracts keep trading
    pub fn ensure_accepting_writes(&self) -> Result<()> {
        require!(self.is_active, OptionsError::MarketInactive);
        Ok(())
    }

    pub fn matches_mints(&self, underlying_mint: &Pubkey, quote_mint: &Pubkey) -> bool {
        self.underlying_mint == *underlying_mint && self.quote_mint == *quote_mint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_write_counts_contracts_not_notional() {
        let mut market = OptionsMarket::default();
        market.record_write().unwrap();
        market.record_write().unwrap();
        assert_eq!(market.total_options_written, 2);
        assert_eq!(market.total_volume, 0);
    }

    #[test]
    fn test_paused_market_rejects_writes() {
        let mut market = OptionsMarket {
            is_active: true,
            ..Default::default()
        };
        assert!(market.ensure_accepting_writes().is_ok());

        market.set_active(false);
        assert_eq!(
            market.ensure_accepting_writes().unwrap_err(),
            OptionsError::MarketInactive.into()
        );

        market.set_active(true);
        assert!(market.ensure_accepting_writes().is_ok());
    }

    #[test]
    fn test_matches_mints() {
        let underlying = Pubkey::new_unique();
        let quote = Pubkey::new_unique();
        let market = OptionsMarket {
            underlying_mint: underlying,
            quote_mint: quote,
            ..Default::default()
        };
        assert!(market.matches_mints(&underlying, &quote));
        assert!(!market.matches_mints(&quote, &underlying));
    }
}
