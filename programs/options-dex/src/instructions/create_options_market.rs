use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use crate::state::*;
use crate::constants::*;
use crate::errors::OptionsError;
use crate::events::OptionsMarketCreated;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct CreateOptionsMarket<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Markets can only be opened on an initialized protocol
    #[account(
        seeds = [PROTOCOL_SEED],
        bump = protocol_state.bump
    )]
    pub protocol_state: Account<'info, ProtocolState>,

    /// Duplicate ids collide on the derived address
    #[account(
        init,
        payer = authority,
        space = OptionsMarket::LEN,
        seeds = [MARKET_SEED, &market_id.to_le_bytes()],
        bump
    )]
    pub options_market: Account<'info, OptionsMarket>,

    pub underlying_mint: InterfaceAccount<'info, Mint>,

    #[account(
        constraint = quote_mint.key() != underlying_mint.key() @ OptionsError::InvalidMint
    )]
    pub quote_mint: InterfaceAccount<'info, Mint>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateOptionsMarket>, market_id: u64) -> Result<()> {
    let market = &mut ctx.accounts.options_market;

    market.market_id = market_id;
    market.underlying_mint = ctx.accounts.underlying_mint.key();
    market.quote_mint = ctx.accounts.quote_mint.key();
    market.authority = ctx.accounts.authority.key();
    market.total_options_written = 0;
    market.total_volume = 0;
    market.is_active = true;
    market.bump = ctx.bumps.options_market;

    emit!(OptionsMarketCreated {
        market_id,
        underlying_mint: market.underlying_mint,
        quote_mint: market.quote_mint,
        authority: market.authority,
    });

    Ok(())
}
