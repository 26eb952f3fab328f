// programs/rwa_tranche_vaults/src/events.rs

use crate::state::Tranche;
use anchor_lang::prelude::*;

/// Emitted when a factory is initialized
#[event]
pub struct FactoryInitialized {
    pub factory: Pubkey,
    pub authority: Pubkey,
    pub timestamp: i64,
}

/// Emitted when the factory creates and registers a vault
#[event]
pub struct VaultCreated {
    pub factory: Pubkey,
    pub vault: Pubkey,
    pub index: u64,
    pub asset_id: String,
    pub creator: Pubkey,
    pub oracle: Pubkey,
    pub senior_mint: Pubkey,
    pub junior_mint: Pubkey,
    pub senior_ratio_bps: u16,
    pub junior_ratio_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct VaultPaused {
    pub vault: Pubkey,
    pub paused_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct VaultUnpaused {
    pub vault: Pubkey,
    pub unpaused_by: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct VaultOwnershipTransferred {
    pub vault: Pubkey,
    pub old_owner: Pubkey,
    pub new_owner: Pubkey,
    pub timestamp: i64,
}

/// Emitted when claim units are minted to a holder
#[event]
pub struct ClaimsIssued {
    pub vault: Pubkey,
    pub tranche: Tranche,
    pub holder_account: Pubkey,
    pub amount: u64,
    pub outstanding: u64,
    pub timestamp: i64,
}

/// Emitted when a holder burns claim units
#[event]
pub struct ClaimsRetired {
    pub vault: Pubkey,
    pub tranche: Tranche,
    pub holder: Pubkey,
    pub amount: u64,
    pub outstanding: u64,
    pub timestamp: i64,
}
