use anchor_lang::prelude::*;

#[error_code]
pub enum OptionsError {
    // ============================================================
    // WRITE ERRORS
    // ============================================================

    #[msg("Expiration timestamp is in the past")]
    ExpirationInPast,

    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Invalid premium")]
    InvalidPremium,

    // ============================================================
    // LIFECYCLE ERRORS
    // ============================================================

    #[msg("Option has expired")]
    OptionExpired,

    #[msg("Option already exercised")]
    OptionAlreadyExercised,

    #[msg("Position already exercised")]
    PositionAlreadyExercised,

    #[msg("Insufficient contracts available")]
    InsufficientContracts,

    #[msg("No contracts owned")]
    NoContractsOwned,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Option not expired yet")]
    OptionNotExpired,

    #[msg("Option already claimed")]
    OptionAlreadyClaimed,

    // ============================================================
    // AUTHORIZATION ERRORS
    // ============================================================

    #[msg("Invalid account owner")]
    InvalidOwner,

    #[msg("Unauthorized writer")]
    UnauthorizedWriter,

    #[msg("Signer is not the expected authority")]
    Unauthorized,

    // ============================================================
    // CONFIGURATION ERRORS
    // ============================================================

    #[msg("Fee rate exceeds 10000 basis points")]
    InvalidFeeRate,

    #[msg("Strike price must be greater than zero")]
    InvalidStrikePrice,

    #[msg("Token mint does not match the market or contract")]
    InvalidMint,

    #[msg("Options market is not active")]
    MarketInactive,

    #[msg("Options market does not match the option contract")]
    InvalidMarket,

    // ============================================================
    // SETTLEMENT ERRORS
    // ============================================================

    #[msg("Collateral release exceeds escrowed collateral")]
    InsufficientCollateral,

    #[msg("Vault received less than the computed collateral (transfer fee mint?)")]
    CollateralNotReceived,

    #[msg("Option contract is not settled yet")]
    OptionNotSettled,

    #[msg("Position is still open and the option has not expired")]
    PositionStillOpen,
}
