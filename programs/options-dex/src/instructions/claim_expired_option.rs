use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::OptionsError;
use crate::events::ExpiredOptionClaimed;
use crate::utils::transfer_tokens;

/// Writer reclaims unreleased collateral once the option has expired.
/// Positions that were not exercised before expiration forfeit.
#[derive(Accounts)]
pub struct ClaimExpiredOption<'info> {
    pub writer: Signer<'info>,

    #[account(
        mut,
        seeds = [PROTOCOL_SEED],
        bump = protocol_state.bump
    )]
    pub protocol_state: Box<Account<'info, ProtocolState>>,

    #[account(
        mut,
        has_one = writer @ OptionsError::UnauthorizedWriter
    )]
    pub option_contract: Box<Account<'info, OptionContract>>,

    #[account(
        address = option_contract.collateral_mint() @ OptionsError::InvalidMint
    )]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        seeds = [UNDERLYING_VAULT_SEED, option_contract.key().as_ref()],
        bump = option_contract.underlying_vault_bump
    )]
    pub underlying_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [QUOTE_VAULT_SEED, option_contract.key().as_ref()],
        bump = option_contract.quote_vault_bump
    )]
    pub quote_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = writer_collateral_account.owner == writer.key() @ OptionsError::InvalidOwner,
        constraint = writer_collateral_account.mint == collateral_mint.key() @ OptionsError::InvalidMint
    )]
    pub writer_collateral_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Liquidation fee is taken in the collateral mint
    #[account(
        mut,
        constraint = protocol_fee_account.owner == protocol_state.authority @ OptionsError::InvalidOwner,
        constraint = protocol_fee_account.mint == collateral_mint.key() @ OptionsError::InvalidMint
    )]
    pub protocol_fee_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<ClaimExpiredOption>) -> Result<()> {
    let clock = Clock::get()?;
    let contract_key = ctx.accounts.option_contract.key();
    let liquidation_fee_rate = ctx.accounts.protocol_state.liquidation_fee_rate;

    let contract = &mut ctx.accounts.option_contract;
    let split = contract.claim(clock.unix_timestamp, liquidation_fee_rate)?;
    let contracts_forfeited = contract.contracts_sold
        .checked_sub(contract.contracts_exercised)
        .ok_or(OptionsError::MathOverflow)?;

    let (vault, vault_seed, vault_bump) = match contract.option_type {
        OptionType::Call => (
            &ctx.accounts.underlying_vault,
            UNDERLYING_VAULT_SEED,
            contract.underlying_vault_bump,
        ),
        OptionType::Put => (
            &ctx.accounts.quote_vault,
            QUOTE_VAULT_SEED,
            contract.quote_vault_bump,
        ),
    };

    require!(vault.amount >= split.gross, OptionsError::InsufficientCollateral);

    let vault_seeds: &[&[u8]] = &[vault_seed, contract_key.as_ref(), &[vault_bump]];

    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.collateral_mint,
        vault,
        &ctx.accounts.writer_collateral_account,
        vault.to_account_info(),
        split.net,
        &[vault_seeds],
    )?;
    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.collateral_mint,
        vault,
        &ctx.accounts.protocol_fee_account,
        vault.to_account_info(),
        split.fee,
        &[vault_seeds],
    )?;

    ctx.accounts.protocol_state.record_activity(0, split.fee)?;

    emit!(ExpiredOptionClaimed {
        option_contract: contract_key,
        writer: ctx.accounts.writer.key(),
        collateral_returned: split.net,
        liquidation_fee: split.fee,
        contracts_forfeited,
        claimed_at: clock.unix_timestamp,
    });

    Ok(())
}
