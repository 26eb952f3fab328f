// programs/rwa_risk_oracle/src/events.rs

use anchor_lang::prelude::*;

/// Emitted when an oracle instance is created
#[event]
pub struct OracleInitialized {
    pub oracle: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

/// Emitted on every accepted snapshot write
#[event]
pub struct AssetDataUpdated {
    pub oracle: Pubkey,
    pub asset_id: String,
    pub occupancy_rate_bps: u16,
    pub rental_income: u64,
    /// Score at write time, for indexers; always re-derivable from the snapshot
    pub risk_score: u16,
    pub updater: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the oracle authority changes
#[event]
pub struct OracleAuthorityUpdated {
    pub oracle: Pubkey,
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the oracle is activated or deactivated
#[event]
pub struct OracleStatusChanged {
    pub oracle: Pubkey,
    pub is_active: bool,
    pub changed_by: Pubkey,
    pub timestamp: i64,
}
