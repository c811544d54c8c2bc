//! Fill destination selection
//!
//! Given the deposit table and a required amount, picks the chain a fill
//! should be sourced from. Cheaper chains are preferred: the designated
//! settlement chain is excluded from the primary search and only consulted
//! as a last resort, because moving funds off it is expensive and slow.

use filler_types::{AssetSymbol, DepositTable, U256};
use tracing::debug;

/// Select the chain to source `required` (normalized) of `asset` from.
///
/// Chains other than `settlement_chain_id` are ranked by descending
/// available deposit and the first one covering the requirement wins. Ties
/// between equal deposits resolve by the table's iteration order, an
/// implementation detail rather than a guarantee callers may rely on. When no
/// primary chain qualifies the settlement chain is re-checked as fallback;
/// `None` means nothing qualifies anywhere.
pub fn select_fill_source(
	deposits: &DepositTable,
	asset: &AssetSymbol,
	required: &U256,
	settlement_chain_id: u64,
) -> Option<u64> {
	let chains = deposits.get(asset)?;

	let mut candidates: Vec<(u64, &U256)> = chains
		.iter()
		.filter(|(&chain_id, _)| chain_id != settlement_chain_id)
		.map(|(&chain_id, deposit)| (chain_id, deposit))
		.collect();
	candidates.sort_by(|a, b| b.1.cmp(a.1));

	for (chain_id, deposit) in candidates {
		if deposit >= required {
			debug!(asset = %asset, chain_id, deposit = %deposit, "selected fill source");
			return Some(chain_id);
		}
	}

	// Last resort: the settlement chain, only if it actually covers the
	// requirement
	if let Some(deposit) = chains.get(&settlement_chain_id) {
		if deposit >= required {
			debug!(
				asset = %asset,
				chain_id = settlement_chain_id,
				deposit = %deposit,
				"falling back to settlement chain as fill source"
			);
			return Some(settlement_chain_id);
		}
	}

	None
}
