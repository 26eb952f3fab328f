// programs/rwa_tranche_vaults/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum TrancheError {
    // Vault configuration
    #[msg("Invalid ratios: senior + junior must equal 10000 bps")]
    InvalidRatios,

    #[msg("Senior ratio must be between 5000 and 9000 bps")]
    SeniorRatioOutOfRange,

    #[msg("Invalid oracle: not an active risk oracle account")]
    InvalidOracle,

    #[msg("Invalid asset id: must be 1-32 printable ASCII bytes")]
    InvalidAssetId,

    #[msg("Invalid tranche token name or symbol")]
    InvalidTokenMetadata,

    #[msg("Basis points value exceeds 10000")]
    InvalidBasisPoints,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Vault registry is full")]
    RegistryFull,

    // Lifecycle
    #[msg("Vault already initialized")]
    AlreadyInitialized,

    #[msg("Unauthorized: caller is not the vault owner")]
    Unauthorized,

    #[msg("Invalid state transition")]
    InvalidState,

    #[msg("Vault is not active")]
    NotActive,

    // Claims
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Retire amount exceeds outstanding claims")]
    InsufficientClaims,

    #[msg("Mint does not belong to the selected tranche")]
    InvalidTrancheMint,

    // Quotes
    #[msg("Snapshot asset does not match the vault asset")]
    AssetMismatch,
}
