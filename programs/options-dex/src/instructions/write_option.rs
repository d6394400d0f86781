use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use crate::state::*;
use crate::constants::*;
use crate::errors::OptionsError;
use crate::events::OptionWritten;
use crate::utils::transfer_tokens;

#[derive(Accounts)]
#[instruction(seed_timestamp: i64)]
pub struct WriteOption<'info> {
    #[account(mut)]
    pub writer: Signer<'info>,

    #[account(
        mut,
        seeds = [MARKET_SEED, &options_market.market_id.to_le_bytes()],
        bump = options_market.bump,
        constraint = options_market.matches_mints(&underlying_mint.key(), &quote_mint.key()) @ OptionsError::InvalidMint
    )]
    pub options_market: Box<Account<'info, OptionsMarket>>,

    /// Reusing a seed for the same writer and underlying collides here
    #[account(
        init,
        payer = writer,
        space = OptionContract::LEN,
        seeds = [
            CONTRACT_SEED,
            writer.key().as_ref(),
            underlying_mint.key().as_ref(),
            &seed_timestamp.to_le_bytes()
        ],
        bump
    )]
    pub option_contract: Box<Account<'info, OptionContract>>,

    pub underlying_mint: Box<InterfaceAccount<'info, Mint>>,

    pub quote_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Call collateral; self-owned PDA
    #[account(
        init,
        payer = writer,
        token::mint = underlying_mint,
        token::authority = underlying_vault,
        token::token_program = token_program,
        seeds = [UNDERLYING_VAULT_SEED, option_contract.key().as_ref()],
        bump
    )]
    pub underlying_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Put collateral; self-owned PDA
    #[account(
        init,
        payer = writer,
        token::mint = quote_mint,
        token::authority = quote_vault,
        token::token_program = token_program,
        seeds = [QUOTE_VAULT_SEED, option_contract.key().as_ref()],
        bump
    )]
    pub quote_vault: Box<InterfaceAccount<'info, TokenAccount>>,

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
    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<WriteOption>,
    seed_timestamp: i64,
    option_type: OptionType,
    strike_price: u64,
    expiration_timestamp: i64,
    amount: u64,
    premium_per_contract: u64,
) -> Result<()> {
    let clock = Clock::get()?;

    require!(
        expiration_timestamp > clock.unix_timestamp,
        OptionsError::ExpirationInPast
    );
    require!(amount > 0, OptionsError::InvalidAmount);
    require!(premium_per_contract > 0, OptionsError::InvalidPremium);
    require!(strike_price > 0, OptionsError::InvalidStrikePrice);

    let collateral = OptionContract::required_collateral(option_type, strike_price, amount)?;
    require!(collateral > 0, OptionsError::InvalidAmount);
    ctx.accounts.options_market.ensure_accepting_writes()?;

    // Escrow collateral before the record exists; the instruction is all-or-nothing
    let writer_info = ctx.accounts.writer.to_account_info();
    match option_type {
        OptionType::Call => transfer_tokens(
            &ctx.accounts.token_program,
            &ctx.accounts.underlying_mint,
            &ctx.accounts.writer_underlying_account,
            &ctx.accounts.underlying_vault,
            writer_info,
            collateral,
            &[],
        )?,
        OptionType::Put => transfer_tokens(
            &ctx.accounts.token_program,
            &ctx.accounts.quote_mint,
            &ctx.accounts.writer_quote_account,
            &ctx.accounts.quote_vault,
            writer_info,
            collateral,
            &[],
        )?,
    }

    // Mints that withhold a transfer fee would leave the vault short of the record
    let vault = match option_type {
        OptionType::Call => &mut ctx.accounts.underlying_vault,
        OptionType::Put => &mut ctx.accounts.quote_vault,
    };
    vault.reload()?;
    OptionContract::ensure_escrowed(collateral, vault.amount)?;

    let market = &mut ctx.accounts.options_market;
    let contract = &mut ctx.accounts.option_contract;

    contract.writer = ctx.accounts.writer.key();
    contract.market = market.key();
    contract.underlying_mint = ctx.accounts.underlying_mint.key();
    contract.quote_mint = ctx.accounts.quote_mint.key();
    contract.seed_timestamp = seed_timestamp;

    contract.option_type = option_type;
    contract.strike_price = strike_price;
    contract.expiration_timestamp = expiration_timestamp;
    contract.amount = amount;
    contract.premium_per_contract = premium_per_contract;

    contract.contracts_sold = 0;
    contract.contracts_exercised = 0;
    contract.collateral_locked = collateral;
    contract.collateral_released = 0;
    contract.status = ContractStatus::Active;
    contract.creation_timestamp = clock.unix_timestamp;

    contract.bump = ctx.bumps.option_contract;
    contract.underlying_vault_bump = ctx.bumps.underlying_vault;
    contract.quote_vault_bump = ctx.bumps.quote_vault;

    market.record_write()?;

    emit!(OptionWritten {
        option_contract: contract.key(),
        market_id: market.market_id,
        writer: contract.writer,
        option_type,
        strike_price,
        expiration_timestamp,
        amount,
        premium_per_contract,
        collateral_locked: collateral,
    });

    Ok(())
}
