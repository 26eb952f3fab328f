// programs/rwa_tranche_vaults/src/instructions/claims.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount};
use crate::state::{Tranche, TrancheVault};
use crate::errors::TrancheError;
use crate::events::{ClaimsIssued, ClaimsRetired};

/// Mint claim units of one tranche to a holder's token account
#[derive(Accounts)]
#[instruction(tranche: Tranche)]
pub struct IssueClaims<'info> {
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

    #[account(
        mut,
        constraint = claim_mint.key() == tranche_vault.ledger(tranche).mint @ TrancheError::InvalidTrancheMint
    )]
    pub claim_mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = claim_mint
    )]
    pub holder_claims: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn issue_claims(ctx: Context<IssueClaims>, tranche: Tranche, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    ctx.accounts
        .tranche_vault
        .issue_claims(&ctx.accounts.owner.key(), tranche, amount)?;

    let factory = ctx.accounts.tranche_vault.factory;
    let index_bytes = ctx.accounts.tranche_vault.index.to_le_bytes();
    let seeds = &[
        TrancheVault::SEED_PREFIX,
        factory.as_ref(),
        &index_bytes,
        &[ctx.accounts.tranche_vault.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            token::MintTo {
                mint: ctx.accounts.claim_mint.to_account_info(),
                to: ctx.accounts.holder_claims.to_account_info(),
                authority: ctx.accounts.tranche_vault.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(ClaimsIssued {
        vault: ctx.accounts.tranche_vault.key(),
        tranche,
        holder_account: ctx.accounts.holder_claims.key(),
        amount,
        outstanding: ctx.accounts.tranche_vault.ledger(tranche).outstanding,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

/// Burn claim units from the holder's own token account
#[derive(Accounts)]
#[instruction(tranche: Tranche)]
pub struct RetireClaims<'info> {
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

    #[account(
        mut,
        constraint = claim_mint.key() == tranche_vault.ledger(tranche).mint @ TrancheError::InvalidTrancheMint
    )]
    pub claim_mint: Account<'info, Mint>,

    #[account(
        mut,
        token::mint = claim_mint,
        token::authority = holder
    )]
    pub holder_claims: Account<'info, TokenAccount>,

    pub holder: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn retire_claims(ctx: Context<RetireClaims>, tranche: Tranche, amount: u64) -> Result<()> {
    let clock = Clock::get()?;

    ctx.accounts.tranche_vault.retire_claims(tranche, amount)?;

    token::burn(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            token::Burn {
                mint: ctx.accounts.claim_mint.to_account_info(),
                from: ctx.accounts.holder_claims.to_account_info(),
                authority: ctx.accounts.holder.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(ClaimsRetired {
        vault: ctx.accounts.tranche_vault.key(),
        tranche,
        holder: ctx.accounts.holder.key(),
        amount,
        outstanding: ctx.accounts.tranche_vault.ledger(tranche).outstanding,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}
