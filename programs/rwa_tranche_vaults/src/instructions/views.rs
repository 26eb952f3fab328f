// programs/rwa_tranche_vaults/src/instructions/views.rs

use anchor_lang::prelude::*;
use rwa_risk_oracle::state::load_snapshot;
use crate::state::{AllocationQuote, TrancheMints, TrancheVault, VaultConfig};

/// Read-only access to one vault. Views work in every lifecycle state.
#[derive(Accounts)]
pub struct ReadVault<'info> {
    pub tranche_vault: Box<Account<'info, TrancheVault>>,
}

pub fn get_config(ctx: Context<ReadVault>) -> Result<VaultConfig> {
    Ok(ctx.accounts.tranche_vault.config.clone())
}

pub fn get_tranche_mints(ctx: Context<ReadVault>) -> Result<TrancheMints> {
    Ok(ctx.accounts.tranche_vault.tranche_mints())
}

pub fn is_active(ctx: Context<ReadVault>) -> Result<bool> {
    Ok(ctx.accounts.tranche_vault.is_active())
}

pub fn is_paused(ctx: Context<ReadVault>) -> Result<bool> {
    Ok(ctx.accounts.tranche_vault.is_paused())
}

/// Price a deposit against the vault terms and the oracle's current data
#[derive(Accounts)]
pub struct QuoteAllocation<'info> {
    pub tranche_vault: Box<Account<'info, TrancheVault>>,

    /// CHECK: owner and contents checked by `load_snapshot`; oracle and asset
    /// binding checked against the vault config
    pub asset_snapshot: UncheckedAccount<'info>,
}

pub fn quote_allocation(ctx: Context<QuoteAllocation>, amount: u64) -> Result<AllocationQuote> {
    let snapshot = load_snapshot(&ctx.accounts.asset_snapshot)?;
    ctx.accounts.tranche_vault.quote_allocation(amount, &snapshot)
}
