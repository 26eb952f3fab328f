// programs/rwa_tranche_vaults/src/lib.rs
//
// RWA Tranche Vaults Program
// ==========================
// Tokenizes a real-world asset's capital stack into senior and junior claims:
// - Factory: creates vaults bound to a risk oracle and keeps an append-only registry
// - Vault: fixed tranche terms, Active/Paused lifecycle, owner-gated administration
// - Claim ledgers: one SPL mint per tranche, the vault PDA is mint authority
// - Quotes: splits an amount across buffer/senior/junior using live oracle data

use anchor_lang::prelude::*;

pub mod state;
pub mod errors;
pub mod events;
pub mod instructions;

use instructions::*;
use state::{AllocationQuote, CreateVaultParams, Tranche, TrancheMints, VaultConfig, VaultRecord};

declare_id!("CYQp55792yCkG4gpjPWjiiWyNG7d9ojaZfwi14Hp9eUi");

#[program]
pub mod rwa_tranche_vaults {
    use super::*;

    // ==================== FACTORY ====================

    /// Create a factory owned by the signing operator
    pub fn initialize_factory(ctx: Context<InitializeFactory>) -> Result<()> {
        instructions::factory::initialize_factory(ctx)
    }

    /// Create, initialize, and register a new tranche vault
    pub fn create_vault(ctx: Context<CreateVault>, params: CreateVaultParams) -> Result<Pubkey> {
        instructions::factory::create_vault(ctx, params)
    }

    /// Page through every vault in creation order
    pub fn get_vaults(ctx: Context<ReadRegistry>, start: u32, limit: u8) -> Result<Vec<Pubkey>> {
        instructions::factory::get_vaults(ctx, start, limit)
    }

    /// Page through full registry records (vault, asset id, creator, created_at)
    pub fn get_vault_records(
        ctx: Context<ReadRegistry>,
        start: u32,
        limit: u8,
    ) -> Result<Vec<VaultRecord>> {
        instructions::factory::get_vault_records(ctx, start, limit)
    }

    /// Vaults created for one asset id
    pub fn get_vaults_for_asset(
        ctx: Context<ReadRegistry>,
        asset_id: String,
    ) -> Result<Vec<Pubkey>> {
        instructions::factory::get_vaults_for_asset(ctx, asset_id)
    }

    // ==================== VAULT LIFECYCLE ====================

    /// Rejects re-initialization of an existing vault
    pub fn initialize_vault(ctx: Context<InitializeVault>) -> Result<()> {
        instructions::lifecycle::initialize_vault(ctx)
    }

    /// Pause all state-changing vault operations (owner only)
    pub fn pause_vault(ctx: Context<VaultAdmin>) -> Result<()> {
        instructions::lifecycle::pause_vault(ctx)
    }

    /// Resume a paused vault (owner only)
    pub fn unpause_vault(ctx: Context<VaultAdmin>) -> Result<()> {
        instructions::lifecycle::unpause_vault(ctx)
    }

    /// Hand the vault over to a new owner
    pub fn transfer_vault_ownership(ctx: Context<VaultAdmin>, new_owner: Pubkey) -> Result<()> {
        instructions::lifecycle::transfer_vault_ownership(ctx, new_owner)
    }

    // ==================== CLAIMS ====================

    /// Mint tranche claims to a holder (owner only)
    pub fn issue_claims(ctx: Context<IssueClaims>, tranche: Tranche, amount: u64) -> Result<()> {
        instructions::claims::issue_claims(ctx, tranche, amount)
    }

    /// Burn the caller's own tranche claims
    pub fn retire_claims(ctx: Context<RetireClaims>, tranche: Tranche, amount: u64) -> Result<()> {
        instructions::claims::retire_claims(ctx, tranche, amount)
    }

    // ==================== VIEWS ====================

    pub fn get_config(ctx: Context<ReadVault>) -> Result<VaultConfig> {
        instructions::views::get_config(ctx)
    }

    pub fn get_tranche_mints(ctx: Context<ReadVault>) -> Result<TrancheMints> {
        instructions::views::get_tranche_mints(ctx)
    }

    pub fn is_active(ctx: Context<ReadVault>) -> Result<bool> {
        instructions::views::is_active(ctx)
    }

    pub fn is_paused(ctx: Context<ReadVault>) -> Result<bool> {
        instructions::views::is_paused(ctx)
    }

    /// Split an amount across risk buffer, senior, and junior
    pub fn quote_allocation(ctx: Context<QuoteAllocation>, amount: u64) -> Result<AllocationQuote> {
        instructions::views::quote_allocation(ctx, amount)
    }
}

/// Public helpers for CPI and client address derivation
pub mod vault_helpers {
    use super::*;
    use state::{TrancheVault, VaultFactory};

    pub fn find_factory_address(authority: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[VaultFactory::SEED_PREFIX, authority.as_ref()],
            &crate::ID,
        )
    }

    pub fn find_vault_address(factory: &Pubkey, index: u64) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                TrancheVault::SEED_PREFIX,
                factory.as_ref(),
                &index.to_le_bytes(),
            ],
            &crate::ID,
        )
    }

    /// Claim mint of one tranche of a vault
    pub fn find_tranche_mint_address(vault: &Pubkey, tranche: Tranche) -> (Pubkey, u8) {
        let seed = match tranche {
            Tranche::Senior => TrancheVault::SENIOR_MINT_SEED,
            Tranche::Junior => TrancheVault::JUNIOR_MINT_SEED,
        };
        Pubkey::find_program_address(&[seed, vault.as_ref()], &crate::ID)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_vault_addresses_are_distinct_per_index() {
            let (factory, _) = find_factory_address(&Pubkey::new_unique());
            let (first, _) = find_vault_address(&factory, 0);
            let (second, _) = find_vault_address(&factory, 1);
            assert_ne!(first, second);

            let (senior, _) = find_tranche_mint_address(&first, Tranche::Senior);
            let (junior, _) = find_tranche_mint_address(&first, Tranche::Junior);
            assert_ne!(senior, junior);
        }
    }
}
