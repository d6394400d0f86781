use anchor_lang::prelude::*;
use crate::errors::OptionsError;
use crate::math::{self, FeeSplit};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum OptionType {
    /// Writer escrows underlying, buyer may buy it at strike
    #[default]
    Call,
    /// Writer escrows quote, buyer may sell underlying at strike
    Put,
}

/// Current state of the option contract lifecycle
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ContractStatus {
    /// Tradable and exercisable until expiration
    #[default]
    Active,
    /// Every contract sold and exercised - collateral fully released
    Exercised,
    /// Writer reclaimed remaining collateral after expiration
    Claimed,
}

/// A written option backed by collateral escrowed in the contract's vaults
#[account]
#[derive(Default)]
pub struct OptionContract {
    // ============================================================
    // IDENTIFICATION
    // ============================================================

    pub writer: Pubkey,

    /// Market the contract was written against
    pub market: Pubkey,

    pub underlying_mint: Pubkey,

    pub quote_mint: Pubkey,

    /// Writer-supplied seed, part of the contract address
    pub seed_timestamp: i64,

    // ============================================================
    // TERMS
    // ============================================================

    pub option_type: OptionType,

    /// Quote per unit of underlying, micro-units
    pub strike_price: u64,

    pub expiration_timestamp: i64,

    /// Total contracts written, micro-units of underlying
    pub amount: u64,

    /// Quote per contract, micro-units
    pub premium_per_contract: u64,

    // ============================================================
    // SETTLEMENT TRACKING
    // ============================================================

    /// 0 <= contracts_sold <= amount, never decreases
    pub contracts_sold: u64,

    /// 0 <= contracts_exercised <= contracts_sold
    pub contracts_exercised: u64,

    /// Escrowed at write: underlying for calls, quote for puts
    pub collateral_locked: u64,

    /// Paid out of the collateral vault so far
    pub collateral_released: u64,

    pub status: ContractStatus,

    pub creation_timestamp: i64,

    // ============================================================
    // BUMPS
    // ============================================================

    pub bump: u8,
    pub underlying_vault_bump: u8,
    pub quote_vault_bump: u8,
}

/// Amounts moved by exercising one position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub contracts: u64,
    /// Strike notional in quote, split by the settlement fee rate
    pub payment: FeeSplit,
    /// Leaves the collateral vault (underlying for calls, quote for puts)
    pub collateral_release: u64,
}

impl OptionContract {
    pub const LEN: usize = 8  // discriminator
        + 32  // writer
        + 32  // market
        + 32  // underlying_mint
        + 32  // quote_mint
        + 8   // seed_timestamp
        + 1   // option_type
        + 8   // strike_price
        + 8   // expiration_timestamp
        + 8   // amount
        + 8   // premium_per_contract
        + 8   // contracts_sold
        + 8   // contracts_exercised
        + 8   // collateral_locked
        + 8   // collateral_released
        + 1   // status
        + 8   // creation_timestamp
        + 1   // bump
        + 1   // underlying_vault_bump
        + 1   // quote_vault_bump
        + 32; // padding

    /// Call: `amount` underlying. Put: `strike_price * amount / SCALE` quote.
    pub fn required_collateral(option_type: OptionType, strike_price: u64, amount: u64) -> Result<u64> {
        match option_type {
            OptionType::Call => Ok(amount),
            OptionType::Put => math::scaled_mul(strike_price, amount),
        }
    }

    /// The vault must hold exactly the collateral the record will lock;
    /// mints that withhold a transfer fee leave it short
    pub fn ensure_escrowed(collateral: u64, vault_balance: u64) -> Result<()> {
        require!(vault_balance == collateral, OptionsError::CollateralNotReceived);
        Ok(())
    }

    /// Mint held by the collateral vault that backs this contract
    pub fn collateral_mint(&self) -> Pubkey {
        match self.option_type {
            OptionType::Call => self.underlying_mint,
            OptionType::Put => self.quote_mint,
        }
    }

    pub fn is_exercised(&self) -> bool {
        self.status == ContractStatus::Exercised
    }

    pub fn is_expired(&self) -> bool {
        self.status == ContractStatus::Claimed
    }

    pub fn is_settled(&self) -> bool {
        self.status != ContractStatus::Active
    }

    /// At `expiration_timestamp` the option is expired for buying and claimable
    pub fn has_expired_at(&self, now: i64) -> bool {
        now >= self.expiration_timestamp
    }

    /// Exercise stays open through the expiration second itself
    pub fn exercise_window_open_at(&self, now: i64) -> bool {
        now <= self.expiration_timestamp
    }

    pub fn available_contracts(&self) -> u64 {
        self.amount.saturating_sub(self.contracts_sold)
    }

    pub fn remaining_collateral(&self) -> Result<u64> {
        let remaining = self.collateral_locked
            .checked_sub(self.collateral_released)
            .ok_or(OptionsError::MathOverflow)?;
        Ok(remaining)
    }

    fn ensure_active(&self) -> Result<()> {
        match self.status {
            ContractStatus::Active => Ok(()),
            ContractStatus::Exercised => err!(OptionsError::OptionAlreadyExercised),
            ContractStatus::Claimed => err!(OptionsError::OptionAlreadyClaimed),
        }
    }

    /// Buying requires an active contract strictly before expiration
    pub fn ensure_live_at(&self, now: i64) -> Result<()> {
        require!(!self.has_expired_at(now), OptionsError::OptionExpired);
        self.ensure_active()
    }

    /// Exercising requires an active contract at or before expiration
    pub fn ensure_exercisable_at(&self, now: i64) -> Result<()> {
        require!(self.exercise_window_open_at(now), OptionsError::OptionExpired);
        self.ensure_active()
    }

    /// Vault balance beyond what the contract still owes, e.g. tokens sent
    /// to the vault directly. Belongs to the writer.
    pub fn surplus_in_vault(&self, vault_balance: u64) -> Result<u64> {
        let owed = match self.status {
            ContractStatus::Active => self.remaining_collateral()?,
            ContractStatus::Exercised | ContractStatus::Claimed => 0,
        };
        Ok(vault_balance.saturating_sub(owed))
    }

    /// Fill `contracts` against the remaining capacity; never partially fills
    pub fn record_sale(&mut self, contracts: u64) -> Result<()> {
        require!(contracts > 0, OptionsError::InvalidAmount);
        require!(
            contracts <= self.available_contracts(),
            OptionsError::InsufficientContracts
        );
        self.contracts_sold = self.contracts_sold
            .checked_add(contracts)
            .ok_or(OptionsError::MathOverflow)?;
        Ok(())
    }

    /// A notional that truncates to zero would release collateral for free
    pub fn settlement_for(&self, contracts: u64, settlement_fee_rate: u16) -> Result<Settlement> {
        let notional = math::scaled_mul(self.strike_price, contracts)?;
        require!(notional > 0, OptionsError::InvalidAmount);
        let payment = math::split_fee(notional, settlement_fee_rate)?;
        let collateral_release = match self.option_type {
            OptionType::Call => contracts,
            OptionType::Put => notional,
        };
        Ok(Settlement {
            contracts,
            payment,
            collateral_release,
        })
    }

    /// Book an exercise. Returns collateral dust owed back to the writer,
    /// non-zero only when this exercise completes the contract.
    pub fn record_exercise(&mut self, settlement: &Settlement) -> Result<u64> {
        let contracts_exercised = self.contracts_exercised
            .checked_add(settlement.contracts)
            .ok_or(OptionsError::MathOverflow)?;
        require!(
            contracts_exercised <= self.contracts_sold,
            OptionsError::InsufficientContracts
        );
        let collateral_released = self.collateral_released
            .checked_add(settlement.collateral_release)
            .ok_or(OptionsError::MathOverflow)?;
        require!(
            collateral_released <= self.collateral_locked,
            OptionsError::InsufficientCollateral
        );

        self.contracts_exercised = contracts_exercised;
        self.collateral_released = collateral_released;

        if self.contracts_exercised == self.amount {
            let dust = self.remaining_collateral()?;
            self.collateral_released = self.collateral_locked;
            self.status = ContractStatus::Exercised;
            return Ok(dust);
        }
        Ok(0)
    }

    /// Writer reclaims whatever collateral was not released through exercises.
    /// Unexercised positions forfeit at expiration.
    pub fn claim(&mut self, now: i64, liquidation_fee_rate: u16) -> Result<FeeSplit> {
        require!(self.has_expired_at(now), OptionsError::OptionNotExpired);
        self.ensure_active()?;

        let split = math::split_fee(self.remaining_collateral()?, liquidation_fee_rate)?;
        self.collateral_released = self.collateral_locked;
        self.status = ContractStatus::Claimed;
        Ok(split)
    }
}
