// programs/rwa_risk_oracle/src/state.rs

use crate::errors::OracleError;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hash;
use rwa_core::is_valid_asset_id;

/// Risk oracle instance
/// PDA seeds: ["risk_oracle", authority]
#[account]
#[derive(InitSpace)]
pub struct RiskOracle {
    /// Operator allowed to write asset snapshots
    pub authority: Pubkey,

    /// Number of distinct assets ever written
    pub asset_count: u64,

    /// Number of accepted snapshot writes across all assets
    pub total_updates: u64,

    /// Inactive oracles reject writes and cannot back new vaults
    pub is_active: bool,

    /// Creation timestamp
    pub created_at: i64,

    /// Bump seed
    pub bump: u8,
}

impl RiskOracle {
    pub const SEED_PREFIX: &'static [u8] = b"risk_oracle";

    /// Check that `updater` may write snapshots to this oracle
    pub fn ensure_writable_by(&self, updater: &Pubkey) -> Result<()> {
        require_keys_eq!(*updater, self.authority, OracleError::Unauthorized);
        require!(self.is_active, OracleError::OracleInactive);
        Ok(())
    }

    /// Book-keeping after a snapshot write. `first_write` is true when the
    /// snapshot account was created by this update.
    pub fn record_update(&mut self, first_write: bool) {
        if first_write {
            self.asset_count = self.asset_count.saturating_add(1);
        }
        self.total_updates = self.total_updates.saturating_add(1);
    }
}

/// Latest performance snapshot for one asset
/// PDA seeds: ["asset_snapshot", oracle, sha256(asset_id)]
#[account]
#[derive(InitSpace)]
pub struct AssetSnapshot {
    /// Oracle this snapshot belongs to
    pub oracle: Pubkey,

    /// Off-chain asset identifier (e.g. "NYC_APT_001")
    #[max_len(32)]
    pub asset_id: String,

    /// Occupancy in basis points (9000 = 90%)
    pub occupancy_rate_bps: u16,

    /// Monthly rental income, fixed-point with 8 implied decimals
    pub rental_income: u64,

    /// Timestamp of the last accepted write
    pub last_update: i64,

    /// Number of accepted writes; zero means never written
    pub update_count: u64,

    /// Bump seed
    pub bump: u8,
}

impl AssetSnapshot {
    pub const SEED_PREFIX: &'static [u8] = b"asset_snapshot";

    pub const MAX_OCCUPANCY_BPS: u16 = 10_000;

    /// Fixed-size PDA seed for an asset id. Hashing keeps address derivation
    /// total for any input, so oversized ids reach the typed asset id check.
    pub fn asset_seed(asset_id: &str) -> [u8; 32] {
        hash(asset_id.as_bytes()).to_bytes()
    }

    /// Validate a proposed write without touching any state
    pub fn validate_update(asset_id: &str, occupancy_rate_bps: u16) -> Result<()> {
        require!(is_valid_asset_id(asset_id), OracleError::InvalidAssetId);
        require!(
            occupancy_rate_bps <= Self::MAX_OCCUPANCY_BPS,
            OracleError::InvalidInput
        );
        Ok(())
    }

    /// Overwrite the snapshot with new performance data.
    ///
    /// Validation runs first, so a rejected update leaves every field as it was.
    /// `last_update` never moves backwards even if the clock does.
    pub fn apply_update(
        &mut self,
        oracle: Pubkey,
        asset_id: &str,
        occupancy_rate_bps: u16,
        rental_income: u64,
        now: i64,
    ) -> Result<()> {
        Self::validate_update(asset_id, occupancy_rate_bps)?;
        if self.is_written() {
            require_keys_eq!(self.oracle, oracle, OracleError::AssetMismatch);
            require!(self.asset_id == asset_id, OracleError::AssetMismatch);
        }

        self.oracle = oracle;
        self.asset_id = asset_id.to_string();
        self.occupancy_rate_bps = occupancy_rate_bps;
        self.rental_income = rental_income;
        self.last_update = now.max(self.last_update);
        self.update_count = self.update_count.saturating_add(1);
        Ok(())
    }

    pub fn is_written(&self) -> bool {
        self.update_count > 0
    }

    /// Risk score derived from the current snapshot
    pub fn risk_score(&self) -> u16 {
        compute_risk_score(self.occupancy_rate_bps, self.rental_income)
    }

    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_score(self.risk_score())
    }

    pub fn to_asset_data(&self) -> AssetData {
        AssetData {
            asset_id: self.asset_id.clone(),
            occupancy_rate_bps: self.occupancy_rate_bps,
            rental_income: self.rental_income,
            last_update: self.last_update,
        }
    }

    pub fn to_assessment(&self) -> RiskAssessment {
        let risk_score = self.risk_score();
        RiskAssessment {
            asset_id: self.asset_id.clone(),
            risk_score,
            risk_tier: RiskTier::from_score(risk_score),
            occupancy_rate_bps: self.occupancy_rate_bps,
            rental_income: self.rental_income,
            last_update: self.last_update,
        }
    }
}

/// Load a snapshot from a raw account, mapping "never written" to `NotFound`.
///
/// Readers take the snapshot PDA unchecked so an unknown asset surfaces as a
/// typed error instead of an account deserialization failure.
pub fn load_snapshot(info: &AccountInfo) -> Result<AssetSnapshot> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return err!(OracleError::NotFound);
    }
    let data = info.try_borrow_data()?;
    let snapshot = AssetSnapshot::try_deserialize(&mut &data[..])?;
    require!(snapshot.is_written(), OracleError::NotFound);
    Ok(snapshot)
}

// =============================================================================
// RISK SCORE
// =============================================================================

/// Score floor; every valid snapshot scores at least this much
pub const RISK_SCORE_FLOOR: u16 = 1_000;

/// Highest possible score
pub const MAX_RISK_SCORE: u16 = 10_000;

/// Share of vacancy (in bps) that turns into risk points: 60%
pub const VACANCY_WEIGHT_BPS: u64 = 6_000;

/// Risk points contributed by an asset with zero income
pub const MAX_INCOME_RISK: u64 = 3_000;

/// Income (raw feed units) at which the income component is halved
pub const INCOME_REFERENCE: u64 = 1_000_000_000;

/// Derive a risk score in [1000, 10000] from occupancy and rental income.
///
/// score = 1000
///       + vacancy_bps * 6000 / 10000
///       + 3000 * REF / (REF + rental_income)
///
/// Lower is safer. Non-increasing in both occupancy and income.
pub fn compute_risk_score(occupancy_rate_bps: u16, rental_income: u64) -> u16 {
    let vacancy_bps = (AssetSnapshot::MAX_OCCUPANCY_BPS.saturating_sub(occupancy_rate_bps)) as u64;
    let vacancy_risk = vacancy_bps * VACANCY_WEIGHT_BPS / rwa_core::BPS_DENOMINATOR;

    let reference = INCOME_REFERENCE as u128;
    let income_risk = (MAX_INCOME_RISK as u128 * reference / (reference + rental_income as u128)) as u64;

    let score = (RISK_SCORE_FLOOR as u64) + vacancy_risk + income_risk;
    score.min(MAX_RISK_SCORE as u64) as u16
}

/// Coarse classification of a risk score
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum RiskTier {
    /// score < 2500
    Low,
    /// 2500 <= score < 5000
    Moderate,
    /// 5000 <= score < 7500
    Elevated,
    /// score >= 7500
    High,
}

impl RiskTier {
    pub const MODERATE_THRESHOLD: u16 = 2_500;
    pub const ELEVATED_THRESHOLD: u16 = 5_000;
    pub const HIGH_THRESHOLD: u16 = 7_500;

    pub fn from_score(score: u16) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            RiskTier::High
        } else if score >= Self::ELEVATED_THRESHOLD {
            RiskTier::Elevated
        } else if score >= Self::MODERATE_THRESHOLD {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }
}

/// Snapshot view returned by `get_asset_data`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AssetData {
    pub asset_id: String,
    pub occupancy_rate_bps: u16,
    pub rental_income: u64,
    pub last_update: i64,
}

/// Score plus the inputs it was derived from
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RiskAssessment {
    pub asset_id: String,
    pub risk_score: u16,
    pub risk_tier: RiskTier,
    pub occupancy_rate_bps: u16,
    pub rental_income: u64,
    pub last_update: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_err(result: Result<()>, expected: OracleError) {
        let expected: anchor_lang::error::Error = expected.into();
        assert_eq!(result.unwrap_err(), expected);
    }

    fn empty_snapshot() -> AssetSnapshot {
        AssetSnapshot {
            oracle: Pubkey::default(),
            asset_id: String::new(),
            occupancy_rate_bps: 0,
            rental_income: 0,
            last_update: 0,
            update_count: 0,
            bump: 255,
        }
    }

    fn create_test_oracle(authority: Pubkey) -> RiskOracle {
        RiskOracle {
            authority,
            asset_count: 0,
            total_updates: 0,
            is_active: true,
            created_at: 1_700_000_000,
            bump: 255,
        }
    }

    // ==================== SNAPSHOT WRITES ====================

    #[test]
    fn test_update_and_read_back() {
        let oracle = Pubkey::new_unique();
        let mut snapshot = empty_snapshot();

        snapshot
            .apply_update(oracle, "TEST_PROP_002", 9500, 200_000_000, 1_700_000_100)
            .unwrap();

        let data = snapshot.to_asset_data();
        assert_eq!(data.asset_id, "TEST_PROP_002");
        assert_eq!(data.occupancy_rate_bps, 9500);
        assert_eq!(data.rental_income, 200_000_000);
        assert_eq!(data.last_update, 1_700_000_100);
        assert!(snapshot.is_written());
    }

    #[test]
    fn test_rejects_invalid_occupancy() {
        let oracle = Pubkey::new_unique();
        let mut snapshot = empty_snapshot();

        expect_err(
            snapshot.apply_update(oracle, "TEST_PROP_003", 10_001, 100_000_000, 100),
            OracleError::InvalidInput,
        );
        assert!(!snapshot.is_written());

        // Boundaries are accepted
        snapshot.apply_update(oracle, "TEST_PROP_003", 0, 0, 100).unwrap();
        snapshot.apply_update(oracle, "TEST_PROP_003", 10_000, 0, 101).unwrap();
    }

    #[test]
    fn test_rejected_update_leaves_prior_snapshot_unchanged() {
        let oracle = Pubkey::new_unique();
        let mut snapshot = empty_snapshot();
        snapshot
            .apply_update(oracle, "TEST_PROP_001", 9000, 100_000_000, 1_000)
            .unwrap();
        let before = snapshot.to_asset_data();

        for bad in [10_001u16, 15_000, u16::MAX] {
            expect_err(
                snapshot.apply_update(oracle, "TEST_PROP_001", bad, 999, 2_000),
                OracleError::InvalidInput,
            );
        }

        assert_eq!(snapshot.to_asset_data(), before);
        assert_eq!(snapshot.update_count, 1);
    }

    #[test]
    fn test_rejects_invalid_asset_id() {
        let oracle = Pubkey::new_unique();
        let mut snapshot = empty_snapshot();

        expect_err(
            snapshot.apply_update(oracle, "", 9000, 1, 1),
            OracleError::InvalidAssetId,
        );
        expect_err(
            snapshot.apply_update(oracle, &"X".repeat(33), 9000, 1, 1),
            OracleError::InvalidAssetId,
        );
    }

    #[test]
    fn test_last_update_advances() {
        let oracle = Pubkey::new_unique();
        let mut snapshot = empty_snapshot();

        snapshot.apply_update(oracle, "TEST_PROP_004", 8800, 150_000_000, 1_000).unwrap();
        let first = snapshot.last_update;
        assert!(first > 0);

        snapshot.apply_update(oracle, "TEST_PROP_004", 8900, 150_000_000, 1_001).unwrap();
        assert!(snapshot.last_update > first);
        assert_eq!(snapshot.update_count, 2);
    }

    #[test]
    fn test_last_update_never_moves_backwards() {
        let oracle = Pubkey::new_unique();
        let mut snapshot = empty_snapshot();

        snapshot.apply_update(oracle, "TEST_PROP_004", 8800, 1, 5_000).unwrap();
        snapshot.apply_update(oracle, "TEST_PROP_004", 8700, 1, 4_000).unwrap();

        assert_eq!(snapshot.last_update, 5_000);
        assert_eq!(snapshot.occupancy_rate_bps, 8700);
    }

    #[test]
    fn test_overwrite_rejects_foreign_oracle() {
        let oracle = Pubkey::new_unique();
        let mut snapshot = empty_snapshot();
        snapshot.apply_update(oracle, "TEST_PROP_001", 9000, 1, 1).unwrap();

        expect_err(
            snapshot.apply_update(Pubkey::new_unique(), "TEST_PROP_001", 9000, 1, 2),
            OracleError::AssetMismatch,
        );
    }

    // ==================== ORACLE AUTHORIZATION ====================

    #[test]
    fn test_only_authority_can_write() {
        let authority = Pubkey::new_unique();
        let oracle = create_test_oracle(authority);

        assert!(oracle.ensure_writable_by(&authority).is_ok());
        expect_err(
            oracle.ensure_writable_by(&Pubkey::new_unique()),
            OracleError::Unauthorized,
        );
    }

    #[test]
    fn test_inactive_oracle_rejects_writes() {
        let authority = Pubkey::new_unique();
        let mut oracle = create_test_oracle(authority);
        oracle.is_active = false;

        expect_err(
            oracle.ensure_writable_by(&authority),
            OracleError::OracleInactive,
        );
    }

    #[test]
    fn test_record_update_counts_distinct_assets() {
        let mut oracle = create_test_oracle(Pubkey::new_unique());

        oracle.record_update(true);
        oracle.record_update(false);
        oracle.record_update(true);

        assert_eq!(oracle.asset_count, 2);
        assert_eq!(oracle.total_updates, 3);
    }

    // ==================== RISK SCORE ====================

    #[test]
    fn test_risk_score_reference_values() {
        // 90% occupancy, 100_000_000 income:
        // 1000 + 1000 * 6000 / 10000 + 3000 * 1e9 / (1e9 + 1e8)
        // = 1000 + 600 + 2727
        assert_eq!(compute_risk_score(9000, 100_000_000), 4327);

        // Fully occupied, income at the reference point
        assert_eq!(compute_risk_score(10_000, INCOME_REFERENCE), 2500);

        // Worst case: empty building, no income
        assert_eq!(compute_risk_score(0, 0), 10_000);
    }

    #[test]
    fn test_risk_score_is_positive() {
        for occupancy in [0u16, 1, 5000, 9200, 10_000] {
            for income in [0u64, 1, 500_000_000, 1_500_000_000, u64::MAX] {
                assert!(compute_risk_score(occupancy, income) >= RISK_SCORE_FLOOR);
            }
        }
    }

    #[test]
    fn test_risk_score_is_deterministic() {
        let oracle = Pubkey::new_unique();
        let mut snapshot = empty_snapshot();
        snapshot
            .apply_update(oracle, "TEST_PROP_001", 9000, 100_000_000, 1)
            .unwrap();

        let first = snapshot.risk_score();
        let second = snapshot.risk_score();
        assert_eq!(first, second);
        assert!(first > 0);
    }

    #[test]
    fn test_risk_score_monotone_in_occupancy() {
        let income = 500_000_000;
        let mut previous = compute_risk_score(0, income);
        for occupancy in (0..=10_000u16).step_by(250) {
            let score = compute_risk_score(occupancy, income);
            assert!(score <= previous, "occupancy {} scored {} > {}", occupancy, score, previous);
            previous = score;
        }
    }

    #[test]
    fn test_risk_score_monotone_in_income() {
        let incomes = [
            0u64,
            1,
            100_000_000,
            500_000_000,
            1_500_000_000,
            100_000_000_000,
            u64::MAX,
        ];
        for occupancy in [0u16, 8500, 9200] {
            let scores: Vec<u16> = incomes
                .iter()
                .map(|income| compute_risk_score(occupancy, *income))
                .collect();
            assert!(scores.windows(2).all(|w| w[1] <= w[0]));
        }
    }

    #[test]
    fn test_better_asset_scores_no_worse() {
        // Deploy-time demo assets
        let nyc = compute_risk_score(9200, 500_000_000);
        let sf = compute_risk_score(8500, 1_500_000_000);
        let weak = compute_risk_score(8500, 500_000_000);

        assert!(nyc <= weak);
        assert!(sf <= weak);
    }

    #[test]
    fn test_risk_tiers() {
        assert_eq!(RiskTier::from_score(1_000), RiskTier::Low);
        assert_eq!(RiskTier::from_score(2_499), RiskTier::Low);
        assert_eq!(RiskTier::from_score(2_500), RiskTier::Moderate);
        assert_eq!(RiskTier::from_score(4_327), RiskTier::Moderate);
        assert_eq!(RiskTier::from_score(5_000), RiskTier::Elevated);
        assert_eq!(RiskTier::from_score(7_500), RiskTier::High);
        assert_eq!(RiskTier::from_score(10_000), RiskTier::High);
    }

    #[test]
    fn test_assessment_matches_score() {
        let oracle = Pubkey::new_unique();
        let mut snapshot = empty_snapshot();
        snapshot
            .apply_update(oracle, "NYC_APT_001", 9200, 500_000_000, 42)
            .unwrap();

        let assessment = snapshot.to_assessment();
        assert_eq!(assessment.risk_score, snapshot.risk_score());
        assert_eq!(assessment.risk_tier, snapshot.risk_tier());
        assert_eq!(assessment.last_update, 42);
    }

    // ==================== SNAPSHOT LOADING ====================

    fn serialized(snapshot: &AssetSnapshot) -> Vec<u8> {
        let mut data = Vec::new();
        snapshot.try_serialize(&mut data).unwrap();
        data
    }

    fn load_from(owner: &Pubkey, data: &mut [u8]) -> Result<AssetSnapshot> {
        let key = Pubkey::new_unique();
        let mut lamports = 1_000_000u64;
        let info = AccountInfo::new(&key, false, false, &mut lamports, data, owner, false, 0);
        load_snapshot(&info)
    }

    #[test]
    fn test_load_missing_snapshot_is_not_found() {
        // Never created: empty and system-owned
        expect_err(
            load_from(&Pubkey::default(), &mut []).map(|_| ()),
            OracleError::NotFound,
        );
        // Created by this program but no data yet
        expect_err(
            load_from(&crate::ID, &mut []).map(|_| ()),
            OracleError::NotFound,
        );
    }

    #[test]
    fn test_load_foreign_snapshot_is_not_found() {
        let mut snapshot = empty_snapshot();
        snapshot
            .apply_update(Pubkey::new_unique(), "NYC_APT_001", 9200, 500_000_000, 1)
            .unwrap();
        let mut data = serialized(&snapshot);

        expect_err(
            load_from(&Pubkey::new_unique(), &mut data).map(|_| ()),
            OracleError::NotFound,
        );
    }

    #[test]
    fn test_load_unwritten_snapshot_is_not_found() {
        let mut data = serialized(&empty_snapshot());
        expect_err(
            load_from(&crate::ID, &mut data).map(|_| ()),
            OracleError::NotFound,
        );
    }

    #[test]
    fn test_load_written_snapshot() {
        let oracle = Pubkey::new_unique();
        let mut snapshot = empty_snapshot();
        snapshot
            .apply_update(oracle, "SF_OFFICE_002", 8500, 1_500_000_000, 1_700_000_000)
            .unwrap();
        let mut data = serialized(&snapshot);

        let loaded = load_from(&crate::ID, &mut data).unwrap();
        assert_eq!(loaded.oracle, oracle);
        assert_eq!(loaded.to_asset_data(), snapshot.to_asset_data());
        assert_eq!(loaded.update_count, 1);
        assert_eq!(loaded.risk_score(), snapshot.risk_score());
    }
}
