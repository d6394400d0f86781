use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod pda;
pub mod state;
pub mod utils;

use instructions::*;
use state::OptionType;

declare_id!("GmEmzLuXQPeQJqaSLr3taLbc47QZffuMvLTZSmKKHk3T");

#[program]
pub mod options_dex {
    use super::*;

    // ============ Protocol Initialization ============

    /// Initialize the protocol configuration (one-time setup)
    pub fn initialize_protocol(
        ctx: Context<InitializeProtocol>,
        protocol_fee_rate: u16,
        settlement_fee_rate: u16,
        liquidation_fee_rate: u16,
    ) -> Result<()> {
        instructions::initialize_protocol::handler(
            ctx,
            protocol_fee_rate,
            settlement_fee_rate,
            liquidation_fee_rate,
        )
    }

    // ============ Market Registry ============

    /// Create an options market for an underlying/quote mint pair
    pub fn create_options_market(ctx: Context<CreateOptionsMarket>, market_id: u64) -> Result<()> {
        instructions::create_options_market::handler(ctx, market_id)
    }

    /// Pause or resume writing on a market (market authority)
    pub fn set_market_active(ctx: Context<SetMarketActive>, is_active: bool) -> Result<()> {
        instructions::admin::set_market_active_handler(ctx, is_active)
    }

    // ============ Option Lifecycle ============

    /// Write a new option contract and escrow its collateral
    pub fn write_option(
        ctx: Context<WriteOption>,
        seed_timestamp: i64,
        option_type: OptionType,
        strike_price: u64,
        expiration_timestamp: i64,
        amount: u64,
        premium_per_contract: u64,
    ) -> Result<()> {
        instructions::write_option::handler(
            ctx,
            seed_timestamp,
            option_type,
            strike_price,
            expiration_timestamp,
            amount,
            premium_per_contract,
        )
    }

    /// Buy a slice of an option contract
    pub fn buy_option(ctx: Context<BuyOption>, contracts_to_buy: u64) -> Result<()> {
        instructions::buy_option::handler(ctx, contracts_to_buy)
    }

    /// Exercise every contract held in the caller's position
    pub fn exercise_option(ctx: Context<ExerciseOption>) -> Result<()> {
        instructions::exercise_option::handler(ctx)
    }

    /// Writer reclaims remaining collateral after expiration
    pub fn claim_expired_option(ctx: Context<ClaimExpiredOption>) -> Result<()> {
        instructions::claim_expired_option::handler(ctx)
    }

    // ============ Cleanup ============

    /// Close both empty collateral vaults of a settled contract
    pub fn close_collateral_vaults(ctx: Context<CloseCollateralVaults>) -> Result<()> {
        instructions::close::close_collateral_vaults_handler(ctx)
    }

    /// Close an exercised or expired buyer position
    pub fn close_buyer_position(ctx: Context<CloseBuyerPosition>) -> Result<()> {
        instructions::close::close_buyer_position_handler(ctx)
    }
}
