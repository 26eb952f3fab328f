// programs/rwa_tranche_vaults/src/instructions/factory.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token};
use rwa_core::tranche_metadata::CLAIM_DECIMALS;
use crate::state::{CreateVaultParams, NewVault, TrancheVault, VaultFactory, VaultRecord};
use crate::events::{FactoryInitialized, VaultCreated};

#[derive(Accounts)]
pub struct InitializeFactory<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + VaultFactory::INIT_SPACE,
        seeds = [VaultFactory::SEED_PREFIX, authority.key().as_ref()],
        bump
    )]
    pub vault_factory: Box<Account<'info, VaultFactory>>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_factory(ctx: Context<InitializeFactory>) -> Result<()> {
    let clock = Clock::get()?;

    let factory = &mut ctx.accounts.vault_factory;
    factory.authority = ctx.accounts.authority.key();
    factory.vault_count = 0;
    factory.vaults = Vec::new();
    factory.created_at = clock.unix_timestamp;
    factory.bump = ctx.bumps.vault_factory;

    emit!(FactoryInitialized {
        factory: ctx.accounts.vault_factory.key(),
        authority: ctx.accounts.authority.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Create a vault, its two claim mints, and register it.
/// Any creator may call; the creator becomes the vault owner.
#[derive(Accounts)]
pub struct CreateVault<'info> {
    #[account(
        mut,
        seeds = [VaultFactory::SEED_PREFIX, vault_factory.authority.as_ref()],
        bump = vault_factory.bump
    )]
    pub vault_factory: Box<Account<'info, VaultFactory>>,

    #[account(
        init,
        payer = creator,
        space = 8 + TrancheVault::INIT_SPACE,
        seeds = [
            TrancheVault::SEED_PREFIX,
            vault_factory.key().as_ref(),
            &vault_factory.vault_count.to_le_bytes()
        ],
        bump
    )]
    pub tranche_vault: Box<Account<'info, TrancheVault>>,

    /// Senior claim mint, authority is the vault PDA
    #[account(
        init,
        payer = creator,
        mint::decimals = CLAIM_DECIMALS,
        mint::authority = tranche_vault,
        seeds = [TrancheVault::SENIOR_MINT_SEED, tranche_vault.key().as_ref()],
        bump
    )]
    pub senior_mint: Box<Account<'info, Mint>>,

    /// Junior claim mint, authority is the vault PDA
    #[account(
        init,
        payer = creator,
        mint::decimals = CLAIM_DECIMALS,
        mint::authority = tranche_vault,
        seeds = [TrancheVault::JUNIOR_MINT_SEED, tranche_vault.key().as_ref()],
        bump
    )]
    pub junior_mint: Box<Account<'info, Mint>>,

    /// CHECK: validated in handler (owner, discriminator, active flag)
    pub risk_oracle: UncheckedAccount<'info>,

    /// Settlement asset the claims are denominated in
    pub settlement_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn create_vault(ctx: Context<CreateVault>, params: CreateVaultParams) -> Result<Pubkey> {
    let clock = Clock::get()?;

    let factory_key = ctx.accounts.vault_factory.key();
    let vault_key = ctx.accounts.tranche_vault.key();
    let senior_mint = ctx.accounts.senior_mint.key();
    let junior_mint = ctx.accounts.junior_mint.key();
    let oracle_key = ctx.accounts.risk_oracle.key();
    let creator = ctx.accounts.creator.key();

    let oracle_info = ctx.accounts.risk_oracle.to_account_info();
    let oracle_data = oracle_info.try_borrow_data()?;

    let index = ctx.accounts.vault_factory.create_vault(
        &mut ctx.accounts.tranche_vault,
        &params,
        NewVault {
            factory: factory_key,
            vault: vault_key,
            vault_bump: ctx.bumps.tranche_vault,
            creator,
            oracle: oracle_key,
            oracle_owner: oracle_info.owner,
            oracle_data: &oracle_data,
            settlement_asset: ctx.accounts.settlement_mint.key(),
            senior_mint,
            junior_mint,
        },
        clock.unix_timestamp,
    )?;

    msg!(
        "Vault #{} created for {}: {}/{} bps",
        index,
        params.asset_id,
        params.senior_ratio_bps,
        params.junior_ratio_bps
    );

    emit!(VaultCreated {
        factory: factory_key,
        vault: vault_key,
        index,
        asset_id: params.asset_id,
        creator,
        oracle: oracle_key,
        senior_mint,
        junior_mint,
        senior_ratio_bps: params.senior_ratio_bps,
        junior_ratio_bps: params.junior_ratio_bps,
        timestamp: clock.unix_timestamp,
    });

    Ok(vault_key)
}

/// Read-only access to the registry
#[derive(Accounts)]
pub struct ReadRegistry<'info> {
    #[account(
        seeds = [VaultFactory::SEED_PREFIX, vault_factory.authority.as_ref()],
        bump = vault_factory.bump
    )]
    pub vault_factory: Box<Account<'info, VaultFactory>>,
}

pub fn get_vaults(ctx: Context<ReadRegistry>, start: u32, limit: u8) -> Result<Vec<Pubkey>> {
    Ok(ctx
        .accounts
        .vault_factory
        .vaults_page(start as usize, limit as usize))
}

/// Registry records (vault, asset id, creator, timestamp), one page at a time
pub fn get_vault_records(
    ctx: Context<ReadRegistry>,
    start: u32,
    limit: u8,
) -> Result<Vec<VaultRecord>> {
    Ok(ctx
        .accounts
        .vault_factory
        .records_page(start as usize, limit as usize))
}

pub fn get_vaults_for_asset(ctx: Context<ReadRegistry>, asset_id: String) -> Result<Vec<Pubkey>> {
    Ok(ctx.accounts.vault_factory.vaults_for_asset(&asset_id))
}
