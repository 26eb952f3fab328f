// programs/rwa_risk_oracle/src/lib.rs
//
// RWA Risk Oracle Program
// =======================
// Stores per-asset performance snapshots and derives risk scores from them:
// - Occupancy (bps) and monthly rental income per asset id
// - Latest snapshot only; every write overwrites
// - Deterministic risk score (1000-10000, lower is safer) and risk tier
// - Authority-gated writes, read-only views for vaults and indexers

use anchor_lang::prelude::*;

pub mod state;
pub mod errors;
pub mod events;
pub mod instructions;

use instructions::*;
use state::{AssetData, RiskAssessment};

declare_id!("JCAD1MsAnJCWUBVMBJqvz1qe1NSpZqgnjGxCMYzXy4bm");

#[program]
pub mod rwa_risk_oracle {
    use super::*;

    // ==================== INITIALIZATION ====================

    /// Create an oracle owned by the signing operator
    pub fn initialize_oracle(ctx: Context<InitializeOracle>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Transfer oracle authority
    pub fn set_oracle_authority(ctx: Context<SetOracleAuthority>) -> Result<()> {
        instructions::initialize::set_oracle_authority(ctx)
    }

    /// Activate or deactivate the oracle
    pub fn set_oracle_active(ctx: Context<SetOracleActive>, is_active: bool) -> Result<()> {
        instructions::initialize::set_oracle_active(ctx, is_active)
    }

    // ==================== ASSET DATA ====================

    /// Record the latest performance data for an asset
    pub fn update_asset_data(
        ctx: Context<UpdateAssetData>,
        asset_id: String,
        occupancy_rate_bps: u16,
        rental_income: u64,
    ) -> Result<()> {
        instructions::asset_data::update_asset_data(ctx, asset_id, occupancy_rate_bps, rental_income)
    }

    /// Get the current snapshot for an asset
    pub fn get_asset_data(ctx: Context<ReadAssetData>, asset_id: String) -> Result<AssetData> {
        instructions::asset_data::get_asset_data(ctx, asset_id)
    }

    /// Derive the risk score from the current snapshot
    pub fn calculate_risk_score(ctx: Context<ReadAssetData>, asset_id: String) -> Result<u16> {
        instructions::asset_data::calculate_risk_score(ctx, asset_id)
    }

    /// Risk score, tier, and the inputs behind them
    pub fn get_risk_assessment(
        ctx: Context<ReadAssetData>,
        asset_id: String,
    ) -> Result<RiskAssessment> {
        instructions::asset_data::get_risk_assessment(ctx, asset_id)
    }
}

/// Public helpers for CPI and client address derivation
pub mod oracle_helpers {
    use super::*;

    pub fn find_risk_oracle_address(authority: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[state::RiskOracle::SEED_PREFIX, authority.as_ref()],
            &crate::ID,
        )
    }

    pub fn find_asset_snapshot_address(oracle: &Pubkey, asset_id: &str) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                state::AssetSnapshot::SEED_PREFIX,
                oracle.as_ref(),
                &state::AssetSnapshot::asset_seed(asset_id),
            ],
            &crate::ID,
        )
    }

}
