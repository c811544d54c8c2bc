//! Invoice ordering and asset resolution
//!
//! Invoices are processed oldest first, which approximates FIFO fairness
//! when liquidity is scarce: the longest-waiting settlement gets the first
//! claim on whatever the tables hold.

use filler_types::{AssetConfig, FillerConfig, Invoice};
use tracing::warn;

/// Sort invoices ascending by enqueue timestamp, stably.
///
/// Invoices whose timestamp does not parse as an integer are incomparable;
/// they keep their original position while the parseable ones are ordered
/// around them. A malformed timestamp therefore cannot error out the queue.
pub fn order_invoices(invoices: Vec<Invoice>) -> Vec<Invoice> {
	// Indices of the orderable invoices, sorted by (timestamp, original
	// index), which is a total order.
	let mut orderable: Vec<(u128, usize)> = invoices
		.iter()
		.enumerate()
		.filter_map(|(index, invoice)| invoice.parsed_timestamp().map(|ts| (ts, index)))
		.collect();
	orderable.sort_unstable();

	// Rebuild the sequence: orderable slots receive the sorted invoices,
	// non-numeric ones stay exactly where they were.
	let mut slots: Vec<Option<Invoice>> = invoices.into_iter().map(Some).collect();
	let orderable_slots: Vec<usize> = slots
		.iter()
		.enumerate()
		.filter(|(_, invoice)| {
			invoice
				.as_ref()
				.is_some_and(|i| i.parsed_timestamp().is_some())
		})
		.map(|(index, _)| index)
		.collect();

	let sorted: Vec<Invoice> = orderable
		.iter()
		.filter_map(|&(_, original_index)| slots[original_index].take())
		.collect();

	for (slot, invoice) in orderable_slots.into_iter().zip(sorted) {
		slots[slot] = Some(invoice);
	}

	slots.into_iter().flatten().collect()
}

/// Resolve the invoice's opaque ticker hash against the configured assets.
///
/// `None` is a terminal `SkippedNoAsset` for the caller; the miss is logged
/// here so unknown assets never disappear silently.
pub fn resolve_asset<'a>(config: &'a FillerConfig, invoice: &Invoice) -> Option<&'a AssetConfig> {
	let resolved = config.asset_for_ticker(&invoice.ticker_hash);
	if resolved.is_none() {
		warn!(
			intent_id = %invoice.intent_id,
			ticker_hash = %invoice.ticker_hash,
			"no configured asset for ticker hash"
		);
	}
	resolved
}
