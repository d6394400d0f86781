use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::OptionsError;
use crate::events::OptionPurchased;
use crate::math;
use crate::utils::transfer_tokens;

#[derive(Accounts)]
pub struct BuyOption<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        mut,
        seeds = [PROTOCOL_SEED],
        bump = protocol_state.bump
    )]
    pub protocol_state: Box<Account<'info, ProtocolState>>,

    #[account(mut)]
    pub option_contract: Box<Account<'info, OptionContract>>,

    #[account(
        mut,
        address = option_contract.market @ OptionsError::InvalidMarket
    )]
    pub options_market: Box<Account<'info, OptionsMarket>>,

    /// One position per buyer per contract - repeat purchases accumulate
    #[account(
        init_if_needed,
        payer = buyer,
        space = BuyerPosition::LEN,
        seeds = [POSITION_SEED, buyer.key().as_ref(), option_contract.key().as_ref()],
        bump
    )]
    pub buyer_position: Box<Account<'info, BuyerPosition>>,

    #[account(
        address = option_contract.quote_mint @ OptionsError::InvalidMint
    )]
    pub quote_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = buyer_quote_account.owner == buyer.key() @ OptionsError::InvalidOwner,
        constraint = buyer_quote_account.mint == quote_mint.key() @ OptionsError::InvalidMint
    )]
    pub buyer_quote_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = writer_quote_account.owner == option_contract.writer @ OptionsError::InvalidOwner,
        constraint = writer_quote_account.mint == quote_mint.key() @ OptionsError::InvalidMint
    )]
    pub writer_quote_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = protocol_fee_account.owner == protocol_state.authority @ OptionsError::InvalidOwner,
        constraint = protocol_fee_account.mint == quote_mint.key() @ OptionsError::InvalidMint
    )]
    pub protocol_fee_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<BuyOption>, contracts_to_buy: u64) -> Result<()> {
    require!(contracts_to_buy > 0, OptionsError::InvalidAmount);

    let clock = Clock::get()?;
    let contract_key = ctx.accounts.option_contract.key();
    let buyer_key = ctx.accounts.buyer.key();
    let protocol_fee_rate = ctx.accounts.protocol_state.protocol_fee_rate;

    let contract = &mut ctx.accounts.option_contract;
    contract.ensure_live_at(clock.unix_timestamp)?;

    let premium = math::premium_breakdown(
        contract.premium_per_contract,
        contracts_to_buy,
        protocol_fee_rate,
    )?;
    require!(premium.gross > 0, OptionsError::InvalidPremium);

    // Capacity is checked against the stored value at execution time;
    // a buyer racing for the last contracts fails here
    contract.record_sale(contracts_to_buy)?;
    let contracts_sold = contract.contracts_sold;

    let position = &mut ctx.accounts.buyer_position;
    position.open(buyer_key, contract_key, clock.unix_timestamp)?;
    position.accumulate(contracts_to_buy, premium.gross)?;
    position.bump = ctx.bumps.buyer_position;
    let contracts_owned = position.contracts_owned;

    // Premium to writer, net of the protocol fee
    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.quote_mint,
        &ctx.accounts.buyer_quote_account,
        &ctx.accounts.writer_quote_account,
        ctx.accounts.buyer.to_account_info(),
        premium.net,
        &[],
    )?;

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.quote_mint,
        &ctx.accounts.buyer_quote_account,
        &ctx.accounts.protocol_fee_account,
        ctx.accounts.buyer.to_account_info(),
        premium.fee,
        &[],
    )?;

    ctx.accounts.protocol_state.record_activity(premium.gross, premium.fee)?;
    ctx.accounts.options_market.record_volume(premium.gross)?;

    emit!(OptionPurchased {
        option_contract: contract_key,
        buyer: buyer_key,
        contracts: contracts_to_buy,
        total_premium: premium.gross,
        protocol_fee: premium.fee,
        contracts_sold,
        contracts_owned,
    });

    Ok(())
}
