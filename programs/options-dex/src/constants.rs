// ============================================================
// FIXED-POINT SCALE
// ============================================================

/// Micro-unit scale shared by every monetary field (1.0 = 1_000_000)
pub const SCALE: u64 = 1_000_000;

// ============================================================
// BASIS POINTS
// ============================================================

/// 100% in basis points (denominator for BPS calculations)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Highest fee rate accepted by `initialize_protocol` (100%)
pub const MAX_FEE_RATE_BPS: u16 = 10_000;

// ============================================================
// PDA SEEDS
// ============================================================

pub const PROTOCOL_SEED: &[u8] = b"protocol";
pub const MARKET_SEED: &[u8] = b"market";
pub const CONTRACT_SEED: &[u8] = b"contract";
pub const POSITION_SEED: &[u8] = b"position";
pub const UNDERLYING_VAULT_SEED: &[u8] = b"vault-underlying";
pub const QUOTE_VAULT_SEED: &[u8] = b"vault-quote";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_bounds() {
        assert_eq!(MAX_FEE_RATE_BPS as u64, BPS_DENOMINATOR);
        assert_eq!(SCALE, 10u64.pow(6));
    }

    #[test]
    fn test_seed_prefixes_are_distinct() {
        let seeds = [
            PROTOCOL_SEED,
            MARKET_SEED,
            CONTRACT_SEED,
            POSITION_SEED,
            UNDERLYING_VAULT_SEED,
            QUOTE_VAULT_SEED,
        ];
        for (i, a) in seeds.iter().enumerate() {
            for b in seeds.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
