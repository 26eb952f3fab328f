// programs/rwa_tranche_vaults/src/state.rs

use crate::errors::TrancheError;
use anchor_lang::prelude::*;
use rwa_core::{bps, is_valid_asset_id, tranche_metadata, BPS_DENOMINATOR_U16};
use rwa_risk_oracle::state::{AssetSnapshot, RiskOracle, RiskTier};

// =============================================================================
// FACTORY / REGISTRY
// =============================================================================

/// Vault factory and the registry of every vault it created
/// PDA seeds: ["vault_factory", authority]
#[account]
#[derive(InitSpace)]
pub struct VaultFactory {
    /// Operator that created the factory
    pub authority: Pubkey,

    /// Number of vaults created; also the index of the next vault
    pub vault_count: u64,

    /// Created vaults in creation order (append-only)
    #[max_len(64)]
    pub vaults: Vec<VaultRecord>,

    /// Creation timestamp
    pub created_at: i64,

    /// Bump seed
    pub bump: u8,
}

impl VaultFactory {
    pub const SEED_PREFIX: &'static [u8] = b"vault_factory";

    /// Registry capacity, bounded by the factory account size
    pub const MAX_VAULTS: usize = 64;

    /// Keys returned per `get_vaults` page (return data is capped at 1024 bytes)
    pub const MAX_VAULTS_PER_PAGE: usize = 30;

    /// Full records returned per `get_vault_records` page
    pub const MAX_RECORDS_PER_PAGE: usize = 9;

    // Capital stack policy: senior must be 50-90%
    pub const MIN_SENIOR_RATIO_BPS: u16 = 5000;
    pub const MAX_SENIOR_RATIO_BPS: u16 = 9000;

    /// Ratios must cover the whole stack and keep senior within policy
    pub fn validate_ratios(senior_ratio_bps: u16, junior_ratio_bps: u16) -> Result<()> {
        let total = senior_ratio_bps as u32 + junior_ratio_bps as u32;
        require!(
            total == BPS_DENOMINATOR_U16 as u32,
            TrancheError::InvalidRatios
        );
        require!(
            (Self::MIN_SENIOR_RATIO_BPS..=Self::MAX_SENIOR_RATIO_BPS).contains(&senior_ratio_bps),
            TrancheError::SeniorRatioOutOfRange
        );
        Ok(())
    }

    /// Validate terms, initialize `vault`, and register it.
    ///
    /// Checks run in a fixed order (ratio sum, senior range, oracle, remaining
    /// terms, capacity) and all precede the first write, so a rejected call
    /// leaves both the factory and the vault untouched. Returns the index.
    pub fn create_vault(
        &mut self,
        vault: &mut TrancheVault,
        params: &CreateVaultParams,
        new_vault: NewVault,
        now: i64,
    ) -> Result<u64> {
        Self::validate_ratios(params.senior_ratio_bps, params.junior_ratio_bps)?;
        parse_oracle_account(new_vault.oracle_owner, new_vault.oracle_data)?;
        params.validate_terms()?;
        self.ensure_capacity()?;
        let config = params.to_config(new_vault.settlement_asset, new_vault.oracle)?;

        vault.initialize(
            VaultInit {
                factory: new_vault.factory,
                index: self.vault_count,
                owner: new_vault.creator,
                config,
                senior: TrancheLedger::new(
                    new_vault.senior_mint,
                    params.senior_name.clone(),
                    params.senior_symbol.clone(),
                ),
                junior: TrancheLedger::new(
                    new_vault.junior_mint,
                    params.junior_name.clone(),
                    params.junior_symbol.clone(),
                ),
                bump: new_vault.vault_bump,
            },
            now,
        )?;

        self.register_vault(VaultRecord {
            vault: new_vault.vault,
            asset_id: params.asset_id.clone(),
            creator: new_vault.creator,
            created_at: now,
        })
    }

    pub fn ensure_capacity(&self) -> Result<()> {
        require!(
            self.vaults.len() < Self::MAX_VAULTS,
            TrancheError::RegistryFull
        );
        Ok(())
    }

    /// Append a vault to the registry and return its index
    pub fn register_vault(&mut self, record: VaultRecord) -> Result<u64> {
        self.ensure_capacity()?;
        let index = self.vault_count;
        self.vault_count = self
            .vault_count
            .checked_add(1)
            .ok_or(TrancheError::MathOverflow)?;
        self.vaults.push(record);
        Ok(index)
    }

    /// Every vault key in creation order
    pub fn vault_keys(&self) -> Vec<Pubkey> {
        self.vaults.iter().map(|r| r.vault).collect()
    }

    /// One page of vault keys in creation order
    pub fn vaults_page(&self, start: usize, limit: usize) -> Vec<Pubkey> {
        self.vaults
            .iter()
            .skip(start)
            .take(limit.min(Self::MAX_VAULTS_PER_PAGE))
            .map(|r| r.vault)
            .collect()
    }

    /// One page of full registry records in creation order
    pub fn records_page(&self, start: usize, limit: usize) -> Vec<VaultRecord> {
        self.vaults
            .iter()
            .skip(start)
            .take(limit.min(Self::MAX_RECORDS_PER_PAGE))
            .cloned()
            .collect()
    }

    /// Vaults created for one asset, in creation order
    pub fn vaults_for_asset(&self, asset_id: &str) -> Vec<Pubkey> {
        self.vaults
            .iter()
            .filter(|r| r.asset_id == asset_id)
            .map(|r| r.vault)
            .take(Self::MAX_VAULTS_PER_PAGE)
            .collect()
    }
}

/// Registry entry for one created vault
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct VaultRecord {
    pub vault: Pubkey,
    #[max_len(32)]
    pub asset_id: String,
    pub creator: Pubkey,
    pub created_at: i64,
}

/// Addresses and the raw oracle account a new vault is built from
pub struct NewVault<'a> {
    pub factory: Pubkey,
    pub vault: Pubkey,
    pub vault_bump: u8,
    pub creator: Pubkey,
    pub oracle: Pubkey,
    pub oracle_owner: &'a Pubkey,
    pub oracle_data: &'a [u8],
    pub settlement_asset: Pubkey,
    pub senior_mint: Pubkey,
    pub junior_mint: Pubkey,
}

/// Check that an account is a live risk oracle.
///
/// The account must be owned by the oracle program, carry the oracle account
/// discriminator, and be active.
pub fn parse_oracle_account(owner: &Pubkey, data: &[u8]) -> Result<RiskOracle> {
    require_keys_eq!(*owner, rwa_risk_oracle::ID, TrancheError::InvalidOracle);
    let oracle = RiskOracle::try_deserialize(&mut &data[..])
        .map_err(|_| error!(TrancheError::InvalidOracle))?;
    require!(oracle.is_active, TrancheError::InvalidOracle);
    Ok(oracle)
}

// =============================================================================
// VAULT CONFIGURATION
// =============================================================================

/// Operator-supplied terms for a new vault
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CreateVaultParams {
    pub asset_id: String,
    pub senior_name: String,
    pub senior_symbol: String,
    pub junior_name: String,
    pub junior_symbol: String,
    pub senior_ratio_bps: u16,
    pub junior_ratio_bps: u16,
    pub senior_yield_target_bps: u32,
    pub risk_buffer_bps: u16,
}

impl CreateVaultParams {
    /// Checks beyond the capital stack ratios
    pub fn validate_terms(&self) -> Result<()> {
        require!(is_valid_asset_id(&self.asset_id), TrancheError::InvalidAssetId);
        require!(
            tranche_metadata::is_valid_name(&self.senior_name)
                && tranche_metadata::is_valid_name(&self.junior_name)
                && tranche_metadata::is_valid_symbol(&self.senior_symbol)
                && tranche_metadata::is_valid_symbol(&self.junior_symbol),
            TrancheError::InvalidTokenMetadata
        );
        require!(
            bps::is_valid_bps(self.risk_buffer_bps),
            TrancheError::InvalidBasisPoints
        );
        Ok(())
    }

    /// Build the immutable vault config. Junior targets double the senior yield.
    pub fn to_config(&self, settlement_asset: Pubkey, oracle: Pubkey) -> Result<VaultConfig> {
        let junior_yield_target_bps = self
            .senior_yield_target_bps
            .checked_mul(2)
            .ok_or(TrancheError::MathOverflow)?;

        Ok(VaultConfig {
            asset_id: self.asset_id.clone(),
            senior_ratio_bps: self.senior_ratio_bps,
            junior_ratio_bps: self.junior_ratio_bps,
            senior_yield_target_bps: self.senior_yield_target_bps,
            junior_yield_target_bps,
            risk_buffer_bps: self.risk_buffer_bps,
            settlement_asset,
            oracle,
        })
    }
}

/// Tranche terms, fixed at creation
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct VaultConfig {
    /// Underlying asset id
    #[max_len(32)]
    pub asset_id: String,

    /// Senior share of the capital stack (7000 = 70%)
    pub senior_ratio_bps: u16,

    /// Junior share of the capital stack
    pub junior_ratio_bps: u16,

    /// Annualized target yield promised to senior claims
    pub senior_yield_target_bps: u32,

    /// Junior target, 2x senior at creation
    pub junior_yield_target_bps: u32,

    /// Capital cushion reserved before junior absorbs losses
    pub risk_buffer_bps: u16,

    /// Settlement mint claims are denominated in
    pub settlement_asset: Pubkey,

    /// Risk oracle the vault reads from
    pub oracle: Pubkey,
}

// =============================================================================
// TRANCHE VAULT
// =============================================================================

/// Which claim class an instruction targets
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tranche {
    Senior,
    Junior,
}

/// Vault lifecycle
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum VaultStatus {
    /// Allocated but not yet initialized; only seen inside `create_vault`
    #[default]
    Uninitialized,
    /// Claims can be issued and retired
    Active,
    /// Read-only until unpaused
    Paused,
}

/// Claim ledger of one tranche. Holder balances live in token accounts of
/// `mint`; `outstanding` mirrors the mint supply.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct TrancheLedger {
    pub mint: Pubkey,
    #[max_len(32)]
    pub name: String,
    #[max_len(10)]
    pub symbol: String,
    pub outstanding: u64,
}

impl TrancheLedger {
    pub fn new(mint: Pubkey, name: String, symbol: String) -> Self {
        Self {
            mint,
            name,
            symbol,
            outstanding: 0,
        }
    }

    pub fn issue(&mut self, amount: u64) -> Result<()> {
        self.outstanding = self
            .outstanding
            .checked_add(amount)
            .ok_or(TrancheError::MathOverflow)?;
        Ok(())
    }

    pub fn retire(&mut self, amount: u64) -> Result<()> {
        self.outstanding = self
            .outstanding
            .checked_sub(amount)
            .ok_or(TrancheError::InsufficientClaims)?;
        Ok(())
    }
}

/// Everything `initialize` needs to bring a vault to life
pub struct VaultInit {
    pub factory: Pubkey,
    pub index: u64,
    pub owner: Pubkey,
    pub config: VaultConfig,
    pub senior: TrancheLedger,
    pub junior: TrancheLedger,
    pub bump: u8,
}

/// One asset's senior/junior split
/// PDA seeds: ["tranche_vault", factory, index (u64 le)]
#[account]
#[derive(InitSpace)]
pub struct TrancheVault {
    /// Factory that created this vault
    pub factory: Pubkey,

    /// Creation ordinal within the factory
    pub index: u64,

    /// Identity allowed to pause, unpause, and issue claims
    pub owner: Pubkey,

    pub config: VaultConfig,

    pub senior: TrancheLedger,

    pub junior: TrancheLedger,

    pub status: VaultStatus,

    pub created_at: i64,

    pub status_changed_at: i64,

    /// Bump seed (the vault PDA is the mint authority of both ledgers)
    pub bump: u8,
}

impl TrancheVault {
    pub const SEED_PREFIX: &'static [u8] = b"tranche_vault";
    pub const SENIOR_MINT_SEED: &'static [u8] = b"senior_mint";
    pub const JUNIOR_MINT_SEED: &'static [u8] = b"junior_mint";

    pub fn ensure_uninitialized(&self) -> Result<()> {
        require!(
            self.status == VaultStatus::Uninitialized,
            TrancheError::AlreadyInitialized
        );
        Ok(())
    }

    /// One-shot initialization; moves the vault straight to Active
    pub fn initialize(&mut self, init: VaultInit, now: i64) -> Result<()> {
        self.ensure_uninitialized()?;

        self.factory = init.factory;
        self.index = init.index;
        self.owner = init.owner;
        self.config = init.config;
        self.senior = init.senior;
        self.junior = init.junior;
        self.status = VaultStatus::Active;
        self.created_at = now;
        self.status_changed_at = now;
        self.bump = init.bump;
        Ok(())
    }

    pub fn ensure_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, TrancheError::Unauthorized);
        Ok(())
    }

    pub fn ensure_active(&self) -> Result<()> {
        require!(self.is_active(), TrancheError::NotActive);
        Ok(())
    }

    pub fn pause(&mut self, caller: &Pubkey, now: i64) -> Result<()> {
        self.ensure_owner(caller)?;
        require!(
            self.status == VaultStatus::Active,
            TrancheError::InvalidState
        );
        self.status = VaultStatus::Paused;
        self.status_changed_at = now;
        Ok(())
    }

    pub fn unpause(&mut self, caller: &Pubkey, now: i64) -> Result<()> {
        self.ensure_owner(caller)?;
        require!(
            self.status == VaultStatus::Paused,
            TrancheError::InvalidState
        );
        self.status = VaultStatus::Active;
        self.status_changed_at = now;
        Ok(())
    }

    /// Administrative; allowed in any state. Returns the previous owner.
    pub fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: Pubkey) -> Result<Pubkey> {
        self.ensure_owner(caller)?;
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }

    /// Record newly issued claim units (owner only, Active only)
    pub fn issue_claims(&mut self, caller: &Pubkey, tranche: Tranche, amount: u64) -> Result<()> {
        self.ensure_owner(caller)?;
        self.ensure_active()?;
        require!(amount > 0, TrancheError::ZeroAmount);
        self.ledger_mut(tranche).issue(amount)
    }

    /// Record claim units burned by their holder (Active only)
    pub fn retire_claims(&mut self, tranche: Tranche, amount: u64) -> Result<()> {
        self.ensure_active()?;
        require!(amount > 0, TrancheError::ZeroAmount);
        self.ledger_mut(tranche).retire(amount)
    }

    pub fn ledger(&self, tranche: Tranche) -> &TrancheLedger {
        match tranche {
            Tranche::Senior => &self.senior,
            Tranche::Junior => &self.junior,
        }
    }

    fn ledger_mut(&mut self, tranche: Tranche) -> &mut TrancheLedger {
        match tranche {
            Tranche::Senior => &mut self.senior,
            Tranche::Junior => &mut self.junior,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == VaultStatus::Active
    }

    pub fn is_paused(&self) -> bool {
        self.status == VaultStatus::Paused
    }

    pub fn asset_id(&self) -> &str {
        &self.config.asset_id
    }

    pub fn oracle(&self) -> Pubkey {
        self.config.oracle
    }

    pub fn tranche_mints(&self) -> TrancheMints {
        TrancheMints {
            senior: self.senior.mint,
            junior: self.junior.mint,
        }
    }

    /// Split `amount` across the capital stack using the vault terms and the
    /// bound oracle's current view of the asset.
    ///
    /// The risk buffer comes off the top; the rest is split by ratio with the
    /// junior tranche taking the rounding remainder.
    pub fn quote_allocation(&self, amount: u64, snapshot: &AssetSnapshot) -> Result<AllocationQuote> {
        require_keys_eq!(snapshot.oracle, self.config.oracle, TrancheError::InvalidOracle);
        require!(
            snapshot.asset_id == self.config.asset_id,
            TrancheError::AssetMismatch
        );

        let (risk_buffer_amount, distributable) =
            bps::split_bps(amount, self.config.risk_buffer_bps).ok_or(TrancheError::MathOverflow)?;
        let (senior_amount, junior_amount) =
            bps::split_bps(distributable, self.config.senior_ratio_bps)
                .ok_or(TrancheError::MathOverflow)?;

        let risk_score = snapshot.risk_score();
        Ok(AllocationQuote {
            amount,
            risk_buffer_amount,
            senior_amount,
            junior_amount,
            senior_yield_target_bps: self.config.senior_yield_target_bps,
            junior_yield_target_bps: self.config.junior_yield_target_bps,
            risk_score,
            risk_tier: RiskTier::from_score(risk_score),
            snapshot_updated_at: snapshot.last_update,
        })
    }
}

/// Mint addresses of both claim ledgers
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrancheMints {
    pub senior: Pubkey,
    pub junior: Pubkey,
}

/// Result of `quote_allocation`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AllocationQuote {
    pub amount: u64,
    pub risk_buffer_amount: u64,
    pub senior_amount: u64,
    pub junior_amount: u64,
    pub senior_yield_target_bps: u32,
    pub junior_yield_target_bps: u32,
    pub risk_score: u16,
    pub risk_tier: RiskTier,
    pub snapshot_updated_at: i64,
}
