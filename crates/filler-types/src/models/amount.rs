//! Decimal normalization between native token precision and the canonical
//! 18-decimal fixed point unit
//!
//! Every chain reports balances in the token's native precision (USDC uses 6
//! decimals on most chains, WETH uses 18). Amounts are only comparable across
//! chains once expressed in one unit, so the engine normalizes everything to
//! 18 decimals at the boundary and never compares raw values. This is the
//! load-bearing invariant of the whole decision core.

use super::u256::U256;
use crate::models::asset::AssetSymbol;
use thiserror::Error;

/// Canonical fixed-point precision for all normalized amounts
pub const NORMALIZED_DECIMALS: u8 = 18;

/// Errors raised when an amount cannot be normalized
#[derive(Debug, Error)]
pub enum NormalizationError {
	#[error("no descriptor for asset {asset} on chain {chain_id}")]
	UnknownAssetOnChain { asset: AssetSymbol, chain_id: u64 },
}

/// Scale a raw amount from `source_decimals` precision to 18 decimals.
///
/// Scaling up (source below 18) is exact. Scaling down (source above 18)
/// truncates the excess digits; the sub-unit remainder is deliberately lost
/// and `denormalize` will not recover it.
pub fn normalize(raw: &U256, source_decimals: u8) -> U256 {
	match source_decimals.cmp(&NORMALIZED_DECIMALS) {
		std::cmp::Ordering::Less => raw.scale_up((NORMALIZED_DECIMALS - source_decimals) as u32),
		std::cmp::Ordering::Greater => {
			raw.scale_down((source_decimals - NORMALIZED_DECIMALS) as u32)
		},
		std::cmp::Ordering::Equal => raw.clone(),
	}
}

/// Inverse of [`normalize`], used only for display and submission in native
/// units. Truncating for assets with fewer than 18 decimals.
pub fn denormalize(normalized: &U256, source_decimals: u8) -> U256 {
	match source_decimals.cmp(&NORMALIZED_DECIMALS) {
		std::cmp::Ordering::Less => {
			normalized.scale_down((NORMALIZED_DECIMALS - source_decimals) as u32)
		},
		std::cmp::Ordering::Greater => {
			normalized.scale_up((source_decimals - NORMALIZED_DECIMALS) as u32)
		},
		std::cmp::Ordering::Equal => normalized.clone(),
	}
}
