use anchor_lang::prelude::*;
use crate::state::ProtocolState;
use crate::constants::*;
use crate::events::ProtocolInitialized;

#[derive(Accounts)]
pub struct InitializeProtocol<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    /// `init` fails with "already in use" on a second call, leaving the config intact
    #[account(
        init,
        payer = authority,
        space = ProtocolState::LEN,
        seeds = [PROTOCOL_SEED],
        bump
    )]
    pub protocol_state: Account<'info, ProtocolState>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<InitializeProtocol>,
    protocol_fee_rate: u16,
    settlement_fee_rate: u16,
    liquidation_fee_rate: u16,
) -> Result<()> {
    ProtocolState::validate_fee_rates(protocol_fee_rate, settlement_fee_rate, liquidation_fee_rate)?;

    let protocol = &mut ctx.accounts.protocol_state;

    protocol.authority = ctx.accounts.authority.key();
    protocol.protocol_fee_rate = protocol_fee_rate;
    protocol.settlement_fee_rate = settlement_fee_rate;
    protocol.liquidation_fee_rate = liquidation_fee_rate;

    // Initialize statistics
    protocol.total_volume = 0;
    protocol.total_fees_collected = 0;

    protocol.bump = ctx.bumps.protocol_state;

    msg!(
        "Protocol initialized with fee rates (bps): premium {}, settlement {}, liquidation {}",
        protocol_fee_rate,
        settlement_fee_rate,
        liquidation_fee_rate
    );

    emit!(ProtocolInitialized {
        authority: protocol.authority,
        protocol_fee_rate,
        settlement_fee_rate,
        liquidation_fee_rate,
    });

    Ok(())
}
