//! Address derivation for every account the program owns.
//!
//! Each helper mirrors the `seeds = [...]` constraint of the matching
//! instruction context, so clients can locate accounts without an index.

use anchor_lang::prelude::*;
use crate::constants::*;

pub fn protocol_state_address() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[PROTOCOL_SEED], &crate::ID)
}

pub fn options_market_address(market_id: u64) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MARKET_SEED, &market_id.to_le_bytes()], &crate::ID)
}

pub fn option_contract_address(
    writer: &Pubkey,
    underlying_mint: &Pubkey,
    seed_timestamp: i64,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            CONTRACT_SEED,
            writer.as_ref(),
            underlying_mint.as_ref(),
            &seed_timestamp.to_le_bytes(),
        ],
        &crate::ID,
    )
}

pub fn buyer_position_address(buyer: &Pubkey, option_contract: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[POSITION_SEED, buyer.as_ref(), option_contract.as_ref()],
        &crate::ID,
    )
}

pub fn underlying_vault_address(option_contract: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[UNDERLYING_VAULT_SEED, option_contract.as_ref()], &crate::ID)
}

pub fn quote_vault_address(option_contract: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[QUOTE_VAULT_SEED, option_contract.as_ref()], &crate::ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let writer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        assert_eq!(protocol_state_address(), protocol_state_address());
        assert_eq!(options_market_address(7), options_market_address(7));
        assert_eq!(
            option_contract_address(&writer, &mint, 1_700_000_000),
            option_contract_address(&writer, &mint, 1_700_000_000)
        );
    }

    #[test]
    fn test_seed_changes_change_the_address() {
        let writer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let (a, _) = option_contract_address(&writer, &mint, 1);
        let (b, _) = option_contract_address(&writer, &mint, 2);
        let (c, _) = option_contract_address(&Pubkey::new_unique(), &mint, 1);
        let (d, _) = option_contract_address(&writer, &Pubkey::new_unique(), 1);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_ne!(options_market_address(1).0, options_market_address(2).0);
    }

    #[test]
    fn test_kinds_never_alias() {
        let contract = Pubkey::new_unique();
        let buyer = Pubkey::new_unique();
        let addresses = [
            protocol_state_address().0,
            options_market_address(0).0,
            buyer_position_address(&buyer, &contract).0,
            underlying_vault_address(&contract).0,
            quote_vault_address(&contract).0,
        ];
        for (i, a) in addresses.iter().enumerate() {
            for b in addresses.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_positions_are_per_buyer_and_contract() {
        let contract = Pubkey::new_unique();
        let other_contract = Pubkey::new_unique();
        let buyer = Pubkey::new_unique();
        let (p1, _) = buyer_position_address(&buyer, &contract);
        let (p2, _) = buyer_position_address(&Pubkey::new_unique(), &contract);
        let (p3, _) = buyer_position_address(&buyer, &other_contract);
        assert_ne!(p1, p2);
        assert_ne!(p1, p3);
        assert_eq!(p1, buyer_position_address(&buyer, &contract).0);
    }

    #[test]
    fn test_addresses_are_off_curve() {
        let (address, _) = option_contract_address(&Pubkey::new_unique(), &Pubkey::new_unique(), 42);
        assert!(!address.is_on_curve());
    }
}
