// programs/rwa_core/src/lib.rs
//
// RWA Core - Shared Constants and Basis-Point Utilities
// =====================================================
//
// This module provides:
// - Basis point denominators shared by the oracle and vault programs
// - Asset identifier rules
// - Tranche token metadata limits
// - Checked basis-point arithmetic used for capital stack splits

// =============================================================================
// PROTOCOL CONSTANTS
// =============================================================================

/// 10000 bps = 100%
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Same denominator as a u16 for ratio fields
pub const BPS_DENOMINATOR_U16: u16 = 10_000;

/// Asset ids are stored inline in snapshot and vault accounts
pub const MAX_ASSET_ID_LEN: usize = 32;

/// Rental income is a fixed-point currency amount with 8 implied decimals
pub const RENTAL_INCOME_DECIMALS: u8 = 8;

/// One whole currency unit at rental income precision
pub const RENTAL_INCOME_UNIT: u64 = 100_000_000;

// =============================================================================
// TRANCHE TOKEN METADATA
// =============================================================================

pub mod tranche_metadata {
    /// Decimals of senior/junior claim mints
    pub const CLAIM_DECIMALS: u8 = 6;

    pub const MAX_NAME_LEN: usize = 32;
    pub const MAX_SYMBOL_LEN: usize = 10;

    /// Names and symbols are display strings only, but they are stored in
    /// fixed-size vault accounts.
    pub fn is_valid_name(name: &str) -> bool {
        !name.trim().is_empty() && name.len() <= MAX_NAME_LEN
    }

    pub fn is_valid_symbol(symbol: &str) -> bool {
        !symbol.is_empty()
            && symbol.len() <= MAX_SYMBOL_LEN
            && symbol.chars().all(|c| c.is_ascii_graphic())
    }
}

// =============================================================================
// ASSET IDENTIFIERS
// =============================================================================

/// Validate an off-chain asset identifier such as "NYC_APT_001".
///
/// Must be non-empty, at most 32 bytes, and contain no whitespace or
/// control characters.
pub fn is_valid_asset_id(asset_id: &str) -> bool {
    !asset_id.is_empty()
        && asset_id.len() <= MAX_ASSET_ID_LEN
        && asset_id.chars().all(|c| c.is_ascii_graphic())
}

// =============================================================================
// BASIS POINT MATH
// =============================================================================

pub mod bps {
    use super::BPS_DENOMINATOR;

    /// Check that a value is a valid share (<= 100%)
    pub fn is_valid_bps(value: u16) -> bool {
        u64::from(value) <= BPS_DENOMINATOR
    }

    /// amount * bps / 10000, rounded down.
    /// Uses a u128 intermediate so large amounts cannot overflow.
    pub fn apply_bps(amount: u64, bps: u16) -> Option<u64> {
        let scaled = (amount as u128)
            .checked_mul(bps as u128)?
            .checked_div(BPS_DENOMINATOR as u128)?;
        u64::try_from(scaled).ok()
    }

    /// Split an amount into (share, remainder) where share = amount * bps / 10000.
    /// The remainder absorbs rounding so the two parts always sum to `amount`.
    pub fn split_bps(amount: u64, bps: u16) -> Option<(u64, u64)> {
        if !is_valid_bps(bps) {
            return None;
        }
        let share = apply_bps(amount, bps)?;
        Some((share, amount.checked_sub(share)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_rules() {
        assert!(is_valid_asset_id("NYC_APT_001"));
        assert!(is_valid_asset_id("SF_OFFICE_002"));
        assert!(is_valid_asset_id(&"A".repeat(MAX_ASSET_ID_LEN)));

        assert!(!is_valid_asset_id(""));
        assert!(!is_valid_asset_id(&"A".repeat(MAX_ASSET_ID_LEN + 1)));
        assert!(!is_valid_asset_id("NYC APT"));
        assert!(!is_valid_asset_id("NYC\nAPT"));
    }

    #[test]
    fn test_tranche_metadata_rules() {
        assert!(tranche_metadata::is_valid_name("NYC Senior Tranche"));
        assert!(!tranche_metadata::is_valid_name("   "));
        assert!(!tranche_metadata::is_valid_name(&"x".repeat(33)));

        assert!(tranche_metadata::is_valid_symbol("NYC-SEN"));
        assert!(!tranche_metadata::is_valid_symbol(""));
        assert!(!tranche_metadata::is_valid_symbol("NYC SEN"));
        assert!(!tranche_metadata::is_valid_symbol("TOO-LONG-SYM"));
    }

    #[test]
    fn test_apply_bps() {
        // 70% of 1,000 units
        assert_eq!(bps::apply_bps(1_000 * RENTAL_INCOME_UNIT, 7000), Some(700 * RENTAL_INCOME_UNIT));
        assert_eq!(bps::apply_bps(1, 5000), Some(0));
        assert_eq!(bps::apply_bps(u64::MAX, 10_000), Some(u64::MAX));
        // > 100% of u64::MAX no longer fits
        assert_eq!(bps::apply_bps(u64::MAX, 20_000), None);
    }

    #[test]
    fn test_split_bps_sums_to_amount() {
        let (senior, junior) = bps::split_bps(1_000_001, 7000).unwrap();
        assert_eq!(senior, 700_000);
        assert_eq!(junior, 300_001);
        assert_eq!(senior + junior, 1_000_001);

        assert_eq!(bps::split_bps(100, 10_001), None);
        assert_eq!(bps::split_bps(0, 7000), Some((0, 0)));
    }
}
