// programs/rwa_risk_oracle/src/errors.rs

use anchor_lang::prelude::*;

#[error_code]
pub enum OracleError {
    #[msg("Unauthorized: caller is not the oracle authority")]
    Unauthorized,

    #[msg("Oracle is not active")]
    OracleInactive,

    #[msg("Invalid occupancy: must be between 0 and 10000 bps")]
    InvalidInput,

    #[msg("Invalid asset id: must be 1-32 printable ASCII bytes")]
    InvalidAssetId,

    #[msg("No data recorded for this asset")]
    NotFound,

    #[msg("Snapshot belongs to a different oracle or asset")]
    AssetMismatch,
}
