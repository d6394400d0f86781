use anchor_lang::prelude::*;
use crate::state::*;
use crate::constants::*;
use crate::errors::OptionsError;
use crate::events::MarketStatusUpdated;

/// Pause or resume writing on a market
/// Only callable by the market authority; existing contracts are unaffected
#[derive(Accounts)]
pub struct SetMarketActive<'info> {
    #[account(
        address = options_market.authority @ OptionsError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [MARKET_SEED, &options_market.market_id.to_le_bytes()],
        bump = options_market.bump
    )]
    pub options_market: Account<'info, OptionsMarket>,
}

pub fn set_market_active_handler(ctx: Context<SetMarketActive>, is_active: bool) -> Result<()> {
    let market = &mut ctx.accounts.options_market;
    market.set_active(is_active);

    emit!(MarketStatusUpdated {
        market_id: market.market_id,
        is_active,
    });

    Ok(())
}
