use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::OptionsError;
use crate::events::OptionExercised;
use crate::utils::transfer_tokens;

#[derive(Accounts)]
pub struct ExerciseOption<'info> {
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
        seeds = [POSITION_SEED, buyer.key().as_ref(), option_contract.key().as_ref()],
        bump = buyer_position.bump,
        constraint = buyer_position.buyer == buyer.key() @ OptionsError::InvalidOwner
    )]
    pub buyer_position: Box<Account<'info, BuyerPosition>>,

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
        constraint = buyer_underlying_account.owner == buyer.key() @ OptionsError::InvalidOwner,
        constraint = buyer_underlying_account.mint == underlying_mint.key() @ OptionsError::InvalidMint
    )]
    pub buyer_underlying_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = buyer_quote_account.owner == buyer.key() @ OptionsError::InvalidOwner,
        constraint = buyer_quote_account.mint == quote_mint.key() @ OptionsError::InvalidMint
    )]
    pub buyer_quote_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = writer_underlying_account.owner == option_contract.writer @ OptionsError::InvalidOwner,
        constraint = writer_underlying_account.mint == underlying_mint.key() @ OptionsError::InvalidMint
    )]
    pub writer_underlying_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = writer_quote_account.owner == option_contract.writer @ OptionsError::InvalidOwner,
        constraint = writer_quote_account.mint == quote_mint.key() @ OptionsError::InvalidMint
    )]
    pub writer_quote_account: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Settlement fees are always quote-denominated
    #[account(
        mut,
        constraint = protocol_fee_account.owner == protocol_state.authority @ OptionsError::InvalidOwner,
        constraint = protocol_fee_account.mint == quote_mint.key() @ OptionsError::InvalidMint
    )]
    pub protocol_fee_account: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

pub fn handler(ctx: Context<ExerciseOption>) -> Result<()> {
    let clock = Clock::get()?;
    let contract_key = ctx.accounts.option_contract.key();
    let settlement_fee_rate = ctx.accounts.protocol_state.settlement_fee_rate;

    let contracts = ctx.accounts.buyer_position.exercisable_contracts()?;

    let contract = &mut ctx.accounts.option_contract;
    contract.ensure_exercisable_at(clock.unix_timestamp)?;

    let settlement = contract.settlement_for(contracts, settlement_fee_rate)?;
    let dust = contract.record_exercise(&settlement)?;
    let option_type = contract.option_type;
    let fully_exercised = contract.is_exercised();

    let vault_outflow = settlement.collateral_release
        .checked_add(dust)
        .ok_or(OptionsError::MathOverflow)?;

    let buyer_info = ctx.accounts.buyer.to_account_info();

    match option_type {
        OptionType::Call => {
            require!(
                ctx.accounts.underlying_vault.amount >= vault_outflow,
                OptionsError::InsufficientCollateral
            );

            let vault_bump = ctx.accounts.option_contract.underlying_vault_bump;
            let vault_seeds: &[&[u8]] = &[
                UNDERLYING_VAULT_SEED,
                contract_key.as_ref(),
                &[vault_bump],
            ];

            // Underlying out of escrow to the buyer
            transfer_tokens(
                &ctx.accounts.token_program,
                &ctx.accounts.underlying_mint,
                &ctx.accounts.underlying_vault,
                &ctx.accounts.buyer_underlying_account,
                ctx.accounts.underlying_vault.to_account_info(),
                settlement.collateral_release,
                &[vault_seeds],
            )?;

            // Strike payment to the writer, settlement fee to the protocol
            transfer_tokens(
                &ctx.accounts.token_program,
                &ctx.accounts.quote_mint,
                &ctx.accounts.buyer_quote_account,
                &ctx.accounts.writer_quote_account,
                buyer_info.clone(),
                settlement.payment.net,
                &[],
            )?;
            transfer_tokens(
                &ctx.accounts.token_program,
                &ctx.accounts.quote_mint,
                &ctx.accounts.buyer_quote_account,
                &ctx.accounts.protocol_fee_account,
                buyer_info,
                settlement.payment.fee,
                &[],
            )?;

            transfer_tokens(
                &ctx.accounts.token_program,
                &ctx.accounts.underlying_mint,
                &ctx.accounts.underlying_vault,
                &ctx.accounts.writer_underlying_account,
                ctx.accounts.underlying_vault.to_account_info(),
                dust,
                &[vault_seeds],
            )?;
        }
        OptionType::Put => {
            require!(
                ctx.accounts.quote_vault.amount >= vault_outflow,
                OptionsError::InsufficientCollateral
            );

            let vault_bump = ctx.accounts.option_contract.quote_vault_bump;
            let vault_seeds: &[&[u8]] = &[
                QUOTE_VAULT_SEED,
                contract_key.as_ref(),
                &[vault_bump],
            ];

            // Buyer delivers underlying to the writer
            transfer_tokens(
                &ctx.accounts.token_program,
                &ctx.accounts.underlying_mint,
                &ctx.accounts.buyer_underlying_account,
                &ctx.accounts.writer_underlying_account,
                buyer_info,
                settlement.contracts,
                &[],
            )?;

            // Strike notional out of escrow, settlement fee withheld
            transfer_tokens(
                &ctx.accounts.token_program,
                &ctx.accounts.quote_mint,
                &ctx.accounts.quote_vault,
                &ctx.accounts.buyer_quote_account,
                ctx.accounts.quote_vault.to_account_info(),
                settlement.payment.net,
                &[vault_seeds],
            )?;
            transfer_tokens(
                &ctx.accounts.token_program,
                &ctx.accounts.quote_mint,
                &ctx.accounts.quote_vault,
                &ctx.accounts.protocol_fee_account,
                ctx.accounts.quote_vault.to_account_info(),
                settlement.payment.fee,
                &[vault_seeds],
            )?;

            transfer_tokens(
                &ctx.accounts.token_program,
                &ctx.accounts.quote_mint,
                &ctx.accounts.quote_vault,
                &ctx.accounts.writer_quote_account,
                ctx.accounts.quote_vault.to_account_info(),
                dust,
                &[vault_seeds],
            )?;
        }
    }

    if dust > 0 {
        msg!("Final exercise returned {} collateral dust to writer", dust);
    }

    ctx.accounts.buyer_position.mark_exercised();
    ctx.accounts.protocol_state.record_activity(0, settlement.payment.fee)?;

    emit!(OptionExercised {
        option_contract: contract_key,
        buyer: ctx.accounts.buyer.key(),
        option_type,
        contracts,
        notional: settlement.payment.gross,
        settlement_fee: settlement.payment.fee,
        collateral_released: settlement.collateral_release,
        fully_exercised,
    });

    Ok(())
}
