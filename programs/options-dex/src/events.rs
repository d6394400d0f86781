use anchor_lang::prelude::*;
use crate::state::OptionType;

// ============================================================
// PROTOCOL & MARKET EVENTS
// ============================================================

#[event]
pub struct ProtocolInitialized {
    pub authority: Pubkey,
    pub protocol_fee_rate: u16,
    pub settlement_fee_rate: u16,
    pub liquidation_fee_rate: u16,
}

#[event]
pub struct OptionsMarketCreated {
    pub market_id: u64,
    pub underlying_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub authority: Pubkey,
}

#[event]
pub struct MarketStatusUpdated {
    pub market_id: u64,
    pub is_active: bool,
}

// ============================================================
// OPTION LIFECYCLE EVENTS
// ============================================================

#[event]
pub struct OptionWritten {
    pub option_contract: Pubkey,
    pub market_id: u64,
    pub writer: Pubkey,
    pub option_type: OptionType,
    pub strike_price: u64,
    pub expiration_timestamp: i64,
    pub amount: u64,
    pub premium_per_contract: u64,
    pub collateral_locked: u64,
}

#[event]
pub struct OptionPurchased {
    pub option_contract: Pubkey,
    pub buyer: Pubkey,
    pub contracts: u64,
    pub total_premium: u64,
    pub protocol_fee: u64,
    pub contracts_sold: u64,
    pub contracts_owned: u64,
}

#[event]
pub struct OptionExercised {
    pub option_contract: Pubkey,
    pub buyer: Pubkey,
    pub option_type: OptionType,
    pub contracts: u64,
    pub notional: u64,
    pub settlement_fee: u64,
    pub collateral_released: u64,
    pub fully_exercised: bool,
}

#[event]
pub struct ExpiredOptionClaimed {
    pub option_contract: Pubkey,
    pub writer: Pubkey,
    pub collateral_returned: u64,
    pub liquidation_fee: u64,
    pub contracts_forfeited: u64,
    pub claimed_at: i64,
}

// ============================================================
// CLEANUP EVENTS
// ============================================================

#[event]
pub struct CollateralVaultsClosed {
    pub option_contract: Pubkey,
    pub writer: Pubkey,
    /// Stray balances returned to the writer before closing
    pub underlying_swept: u64,
    pub quote_swept: u64,
}

#[event]
pub struct BuyerPositionClosed {
    pub option_contract: Pubkey,
    pub buyer: Pubkey,
    pub contracts_owned: u64,
    pub exercised: bool,
}
