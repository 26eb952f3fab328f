// programs/rwa_risk_oracle/src/instructions/asset_data.rs

use crate::errors::OracleError;
use crate::events::AssetDataUpdated;
use crate::state::{load_snapshot, AssetData, AssetSnapshot, RiskAssessment, RiskOracle};
use anchor_lang::prelude::*;

/// Write (or overwrite) the performance snapshot of one asset
#[derive(Accounts)]
#[instruction(asset_id: String)]
pub struct UpdateAssetData<'info> {
    // Anchor derives the snapshot address before running this check; the seed
    // is a hash of the id so any length derives cleanly and fails here instead
    #[account(
        mut,
        constraint = rwa_core::is_valid_asset_id(&asset_id) @ OracleError::InvalidAssetId
    )]
    pub risk_oracle: Account<'info, RiskOracle>,

    #[account(
        init_if_needed,
        payer = updater,
        space = 8 + AssetSnapshot::INIT_SPACE,
        seeds = [
            AssetSnapshot::SEED_PREFIX,
            risk_oracle.key().as_ref(),
            &AssetSnapshot::asset_seed(&asset_id)
        ],
        bump
    )]
    pub asset_snapshot: Account<'info, AssetSnapshot>,

    #[account(mut)]
    pub updater: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn update_asset_data(
    ctx: Context<UpdateAssetData>,
    asset_id: String,
    occupancy_rate_bps: u16,
    rental_income: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let oracle_key = ctx.accounts.risk_oracle.key();

    ctx.accounts
        .risk_oracle
        .ensure_writable_by(&ctx.accounts.updater.key())?;
    AssetSnapshot::validate_update(&asset_id, occupancy_rate_bps)?;

    let snapshot = &mut ctx.accounts.asset_snapshot;
    let first_write = !snapshot.is_written();
    snapshot.apply_update(
        oracle_key,
        &asset_id,
        occupancy_rate_bps,
        rental_income,
        clock.unix_timestamp,
    )?;
    snapshot.bump = ctx.bumps.asset_snapshot;
    let risk_score = snapshot.risk_score();

    ctx.accounts.risk_oracle.record_update(first_write);

    emit!(AssetDataUpdated {
        oracle: oracle_key,
        asset_id,
        occupancy_rate_bps,
        rental_income,
        risk_score,
        updater: ctx.accounts.updater.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Read-only access to one asset's snapshot
#[derive(Accounts)]
#[instruction(asset_id: String)]
pub struct ReadAssetData<'info> {
    #[account(
        constraint = rwa_core::is_valid_asset_id(&asset_id) @ OracleError::InvalidAssetId
    )]
    pub risk_oracle: Account<'info, RiskOracle>,

    /// CHECK: may be uninitialized; `load_snapshot` maps that to NotFound
    #[account(
        seeds = [
            AssetSnapshot::SEED_PREFIX,
            risk_oracle.key().as_ref(),
            &AssetSnapshot::asset_seed(&asset_id)
        ],
        bump
    )]
    pub asset_snapshot: UncheckedAccount<'info>,
}

pub fn get_asset_data(ctx: Context<ReadAssetData>, _asset_id: String) -> Result<AssetData> {
    let snapshot = load_snapshot(&ctx.accounts.asset_snapshot)?;
    Ok(snapshot.to_asset_data())
}

pub fn calculate_risk_score(ctx: Context<ReadAssetData>, _asset_id: String) -> Result<u16> {
    let snapshot = load_snapshot(&ctx.accounts.asset_snapshot)?;
    Ok(snapshot.risk_score())
}

pub fn get_risk_assessment(
    ctx: Context<ReadAssetData>,
    _asset_id: String,
) -> Result<RiskAssessment> {
    let snapshot = load_snapshot(&ctx.accounts.asset_snapshot)?;
    Ok(snapshot.to_assessment())
}
