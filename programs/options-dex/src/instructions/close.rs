use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::OptionsError;
use crate::events::{CollateralVaultsClosed, BuyerPositionClosed};
use crate::utils::{close_vault, transfer_tokens};

// ============================================================
// CLOSE COLLATERAL VAULTS
// ============================================================

/// Reclaim vault rent once the contract is settled.
/// Anything still sitting in either vault is owed to nobody else and is swept
/// to the writer first. The contract record stays as the archive of the trade.
#[derive(Accounts)]
pub struct CloseCollateralVaults<'info> {
    #[account(mut)]
    pub writer: Signer<'info>,

    #[account(
        has_one = writer @ OptionsError::UnauthorizedWriter,
        constraint = option_contract.is_settled() @ OptionsError::OptionNotSettled
    )]
    pub option_contract: Box<Account<'info, OptionContract>>,

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
        address = option_contract.underlying_mint @ OptionsError::InvalidMint
    )]
    pub underlying_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        address = option_contract.quote_mint @ OptionsError::InvalidMint
    )]
    pub quote_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = writer_underlying_account.owner == writer.key() @ OptionsError::InvalidOwner,
        constraint = writer_underlying_account.mint == underlying_mint.key() @ OptionsError::InvalidMint
    )]
    pub writer_underlying_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = writer_quote_account.owner == writer.key() @ OptionsError::InvalidOwner,
        constraint = writer_quote_account.mint == quote_mint.key() @ OptionsError::InvalidMint
    )]
    pub writer_quote_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn close_collateral_vaults_handler(ctx: Context<CloseCollateralVaults>) -> Result<()> {
    let contract = &ctx.accounts.option_contract;
    let contract_key = contract.key();
    let writer_info = ctx.accounts.writer.to_account_info();

    let underlying_swept = contract.surplus_in_vault(ctx.accounts.underlying_vault.amount)?;
    let quote_swept = contract.surplus_in_vault(ctx.accounts.quote_vault.amount)?;

    let underlying_seeds: &[&[u8]] = &[
        UNDERLYING_VAULT_SEED,
        contract_key.as_ref(),
        &[contract.underlying_vault_bump],
    ];
    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.underlying_mint,
        &ctx.accounts.underlying_vault,
        &ctx.accounts.writer_underlying_account,
        ctx.accounts.underlying_vault.to_account_info(),
        underlying_swept,
        &[underlying_seeds],
    )?;
    close_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.underlying_vault,
        writer_info.clone(),
        &[underlying_seeds],
    )?;

    let quote_seeds: &[&[u8]] = &[
        QUOTE_VAULT_SEED,
        contract_key.as_ref(),
        &[contract.quote_vault_bump],
    ];
    transfer_tokens(
        &ctx.accounts.token_program,
        &ctx.accounts.quote_mint,
        &ctx.accounts.quote_vault,
        &ctx.accounts.writer_quote_account,
        ctx.accounts.quote_vault.to_account_info(),
        quote_swept,
        &[quote_seeds],
    )?;
    close_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.quote_vault,
        writer_info,
        &[quote_seeds],
    )?;

    emit!(CollateralVaultsClosed {
        option_contract: contract_key,
        writer: ctx.accounts.writer.key(),
        underlying_swept,
        quote_swept,
    });

    Ok(())
}

// ============================================================
// CLOSE BUYER POSITION
// ============================================================

#[derive(Accounts)]
pub struct CloseBuyerPosition<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        address = buyer_position.option_contract @ OptionsError::InvalidOwner
    )]
    pub option_contract: Box<Account<'info, OptionContract>>,

    #[account(
        mut,
        close = buyer,
        seeds = [POSITION_SEED, buyer.key().as_ref(), option_contract.key().as_ref()],
        bump = buyer_position.bump,
        constraint = buyer_position.buyer == buyer.key() @ OptionsError::InvalidOwner
    )]
    pub buyer_position: Box<Account<'info, BuyerPosition>>,
}

pub fn close_buyer_position_handler(ctx: Context<CloseBuyerPosition>) -> Result<()> {
    let clock = Clock::get()?;
    let position = &ctx.accounts.buyer_position;

    require!(
        position.can_close(&ctx.accounts.option_contract, clock.unix_timestamp),
        OptionsError::PositionStillOpen
    );

    emit!(BuyerPositionClosed {
        option_contract: position.option_contract,
        buyer: position.buyer,
        contracts_owned: position.contracts_owned,
        exercised: position.is_exercised(),
    });

    // Note: buyer_position is closed via `close = buyer` and rent returned

    Ok(())
}
