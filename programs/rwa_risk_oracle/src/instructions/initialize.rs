// programs/rwa_risk_oracle/src/instructions/initialize.rs

use crate::errors::OracleError;
use crate::events::{OracleAuthorityUpdated, OracleInitialized, OracleStatusChanged};
use crate::state::RiskOracle;
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct InitializeOracle<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + RiskOracle::INIT_SPACE,
        seeds = [RiskOracle::SEED_PREFIX, authority.key().as_ref()],
        bump
    )]
    pub risk_oracle: Account<'info, RiskOracle>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeOracle>) -> Result<()> {
    let clock = Clock::get()?;

    let oracle = &mut ctx.accounts.risk_oracle;
    oracle.authority = ctx.accounts.authority.key();
    oracle.asset_count = 0;
    oracle.total_updates = 0;
    oracle.is_active = true;
    oracle.created_at = clock.unix_timestamp;
    oracle.bump = ctx.bumps.risk_oracle;

    emit!(OracleInitialized {
        oracle: ctx.accounts.risk_oracle.key(),
        authority: ctx.accounts.authority.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Hand the oracle over to a new operator
#[derive(Accounts)]
pub struct SetOracleAuthority<'info> {
    #[account(
        mut,
        constraint = risk_oracle.authority == authority.key() @ OracleError::Unauthorized
    )]
    pub risk_oracle: Account<'info, RiskOracle>,

    pub authority: Signer<'info>,

    /// CHECK: New authority doesn't need to sign
    pub new_authority: UncheckedAccount<'info>,
}

pub fn set_oracle_authority(ctx: Context<SetOracleAuthority>) -> Result<()> {
    let clock = Clock::get()?;
    let oracle = &mut ctx.accounts.risk_oracle;

    let old_authority = oracle.authority;
    oracle.authority = ctx.accounts.new_authority.key();

    emit!(OracleAuthorityUpdated {
        oracle: oracle.key(),
        old_authority,
        new_authority: oracle.authority,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Activate or deactivate the oracle
#[derive(Accounts)]
pub struct SetOracleActive<'info> {
    #[account(
        mut,
        constraint = risk_oracle.authority == authority.key() @ OracleError::Unauthorized
    )]
    pub risk_oracle: Account<'info, RiskOracle>,

    pub authority: Signer<'info>,
}

pub fn set_oracle_active(ctx: Context<SetOracleActive>, is_active: bool) -> Result<()> {
    let clock = Clock::get()?;
    let oracle = &mut ctx.accounts.risk_oracle;

    if oracle.is_active == is_active {
        return Ok(());
    }
    oracle.is_active = is_active;

    msg!(
        "Oracle {} {}",
        oracle.key(),
        if is_active { "activated" } else { "deactivated" }
    );

    emit!(OracleStatusChanged {
        oracle: oracle.key(),
        is_active,
        changed_by: ctx.accounts.authority.key(),
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
