use anchor_lang::prelude::*;
use crate::errors::OptionsError;
use crate::state::OptionContract;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum PositionStatus {
    #[default]
    Open,
    /// Settled once, never reopened
    Exercised,
}

/// A buyer's exposure to one option contract
/// One BuyerPosition per buyer per contract, accumulated across purchases
#[account]
#[derive(Default)]
pub struct BuyerPosition {
    pub buyer: Pubkey,

    pub option_contract: Pubkey,

    /// Sum of all purchases, micro-units of underlying
    pub contracts_owned: u64,

    /// Sum of gross premium paid, micro-units of quote
    pub premium_paid: u64,

    pub status: PositionStatus,

    /// Timestamp of the first purchase
    pub opened_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl BuyerPosition {
    pub const LEN: usize = 8  // discriminator
        + 32  // buyer
        + 32  // option_contract
        + 8   // contracts_owned
        + 8   // premium_paid
        + 1   // status
        + 8   // opened_at
        + 1   // bump
        + 16; // padding

    pub fn is_initialized(&self) -> bool {
        self.buyer != Pubkey::default()
    }

    pub fn is_exercised(&self) -> bool {
        self.status == PositionStatus::Exercised
    }

    /// Bind a freshly allocated position to its buyer and contract.
    /// A no-op for an existing position.
    pub fn open(&mut self, buyer: Pubkey, option_contract: Pubkey, now: i64) -> Result<()> {
        if self.is_initialized() {
            require_keys_eq!(self.buyer, buyer, OptionsError::InvalidOwner);
            return Ok(());
        }
        self.buyer = buyer;
        self.option_contract = option_contract;
        self.status = PositionStatus::Open;
        self.opened_at = now;
        Ok(())
    }

    pub fn accumulate(&mut self, contracts: u64, premium: u64) -> Result<()> {
        require!(!self.is_exercised(), OptionsError::PositionAlreadyExercised);
        let contracts_owned = self.contracts_owned
            .checked_add(contracts)
            .ok_or(OptionsError::MathOverflow)?;
        let premium_paid = self.premium_paid
            .checked_add(premium)
            .ok_or(OptionsError::MathOverflow)?;
        self.contracts_owned = contracts_owned;
        self.premium_paid = premium_paid;
        Ok(())
    }

    /// Contracts to settle on exercise
    pub fn exercisable_contracts(&self) -> Result<u64> {
        require!(!self.is_exercised(), OptionsError::PositionAlreadyExercised);
        require!(self.contracts_owned > 0, OptionsError::NoContractsOwned);
        Ok(self.contracts_owned)
    }

    pub fn mark_exercised(&mut self) {
        self.status = PositionStatus::Exercised;
    }

    /// Exercised positions close any time; open ones only once the exercise
    /// window has passed and their exposure is forfeited.
    pub fn can_close(&self, contract: &OptionContract, now: i64) -> bool {
        self.is_exercised() || !contract.exercise_window_open_at(now) || contract.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> BuyerPosition {
        let mut position = BuyerPosition::default();
        position
            .open(Pubkey::new_unique(), Pubkey::new_unique(), 1_700_000_000)
            .unwrap();
        position
    }

    #[test]
    fn test_open_is_idempotent_for_same_buyer() {
        let mut position = opened();
        let buyer = position.buyer;
        let contract = position.option_contract;
        position.accumulate(10, 50).unwrap();

        position.open(buyer, Pubkey::new_unique(), 1_800_000_000).unwrap();
        assert_eq!(position.option_contract, contract);
        assert_eq!(position.opened_at, 1_700_000_000);
        assert_eq!(position.contracts_owned, 10);
    }

    #[test]
    fn test_open_rejects_foreign_buyer() {
        let mut position = opened();
        assert_eq!(
            position
                .open(Pubkey::new_unique(), Pubkey::new_unique(), 0)
                .unwrap_err(),
            OptionsError::InvalidOwner.into()
        );
    }

    #[test]
    fn test_purchases_accumulate() {
        let mut position = opened();
        position.accumulate(100_000, 500_000).unwrap();
        position.accumulate(50_000, 250_000).unwrap();
        assert_eq!(position.contracts_owned, 150_000);
        assert_eq!(position.premium_paid, 750_000);
        assert_eq!(position.exercisable_contracts().unwrap(), 150_000);
    }

    #[test]
    fn test_exercise_is_one_shot() {
        let mut position = opened();
        assert_eq!(
            position.exercisable_contracts().unwrap_err(),
            OptionsError::NoContractsOwned.into()
        );

        position.accumulate(1, 5).unwrap();
        position.mark_exercised();
        assert!(position.is_exercised());
        assert_eq!(
            position.exercisable_contracts().unwrap_err(),
            OptionsError::PositionAlreadyExercised.into()
        );
        assert_eq!(
            position.accumulate(1, 5).unwrap_err(),
            OptionsError::PositionAlreadyExercised.into()
        );
        assert_eq!(position.contracts_owned, 1);
    }

    #[test]
    fn test_can_close() {
        let contract = OptionContract {
            expiration_timestamp: 1_000,
            ..Default::default()
        };
        let mut position = opened();
        position.accumulate(1, 1).unwrap();
        assert!(!position.can_close(&contract, 999));
        assert!(!position.can_close(&contract, 1_000));
        assert!(position.can_close(&contract, 1_001));

        position.mark_exercised();
        assert!(position.can_close(&contract, 0));
    }
}
