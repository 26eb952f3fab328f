// programs/rwa_tranche_vaults/src/instructions/lifecycle.rs

use anchor_lang::prelude::*;
use crate::state::TrancheVault;
use crate::events::{VaultOwnershipTransferred, VaultPaused, VaultUnpaused};

/// Re-initialization attempt on an existing vault. Vaults are initialized once
/// inside `create_vault`, so this always fails with AlreadyInitialized.
#[derive(Accounts)]
pub struct InitializeVault<'info> {
    pub tranche_vault: Box<Account<'info, TrancheVault>>,

    pub caller: Signer<'info>,
}

pub fn initialize_vault(ctx: Context<InitializeVault>) -> Result<()> {
    ctx.accounts.tranche_vault.ensure_uninitialized()?;
    Ok(())
}

/// Owner-only vault administration
#[derive(Accounts)]
pub struct VaultAdmin<'info> {
    #[account(
        mut,
        seeds = [
            TrancheVault::SEED_PREFIX,
            tranche_vault.factory.as_ref(),
            &tranche_vault.index.to_le_bytes()
        ],
        bump = tranche_vault.bump
    )]
    pub tranche_vault: Box<Account<'info, TrancheVault>>,

    pub owner: Signer<'info>,
}

pub fn pause_vault(ctx: Context<VaultAdmin>) -> Result<()> {
    let clock = Clock::get()?;
    let caller = ctx.accounts.owner.key();

    ctx.accounts.tranche_vault.pause(&caller, clock.unix_timestamp)?;

    msg!("Vault {} paused", ctx.accounts.tranche_vault.key());

    emit!(VaultPaused {
        vault: ctx.accounts.tranche_vault.key(),
        paused_by: caller,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

pub fn unpause_vault(ctx: Context<VaultAdmin>) -> Result<()> {
    let clock = Clock::get()?;
    let caller = ctx.accounts.owner.key();

    ctx.accounts.tranche_vault.unpause(&caller, clock.unix_timestamp)?;

    msg!("Vault {} unpaused", ctx.accounts.tranche_vault.key());

    emit!(VaultUnpaused {
        vault: ctx.accounts.tranche_vault.key(),
        unpaused_by: caller,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

pub fn transfer_vault_ownership(ctx: Context<VaultAdmin>, new_owner: Pubkey) -> Result<()> {
    let clock = Clock::get()?;

    let old_owner = ctx
        .accounts
        .tranche_vault
        .transfer_ownership(&ctx.accounts.owner.key(), new_owner)?;

    emit!(VaultOwnershipTransferred {
        vault: ctx.accounts.tranche_vault.key(),
        old_owner,
        new_owner,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
