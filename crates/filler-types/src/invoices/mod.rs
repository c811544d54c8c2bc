//! Invoice models and terminal outcomes

use crate::models::U256;
use serde::{Deserialize, Serialize};

/// A pending cross-chain settlement request from the invoice feed
///
/// Wire shape mirrors the hub API. Invoices are immutable inputs for one
/// processing cycle; the engine never mutates them in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Invoice {
	/// Unique intent identifier
	pub intent_id: String,
	/// Chain the invoice originated on
	pub origin: String,
	/// Candidate destination chains, in the creator's preference order
	pub destinations: Vec<String>,
	/// Amount in hub-normalized 18-decimal units
	pub amount: U256,
	/// Opaque asset identifier, resolved against the configured assets
	pub ticker_hash: String,
	/// When the hub enqueued the invoice; unit declared in configuration
	pub hub_invoice_enqueued_timestamp: String,
}

impl Invoice {
	/// Enqueue timestamp parsed as an integer, `None` when non-numeric.
	///
	/// Ordering treats non-numeric timestamps as incomparable (equal to their
	/// neighbors) rather than erroring, so a single malformed invoice cannot
	/// poison the queue.
	pub fn parsed_timestamp(&self) -> Option<u128> {
		self.hub_invoice_enqueued_timestamp.parse().ok()
	}

	/// Origin chain id, `None` when the feed value is not a chain id
	pub fn origin_chain_id(&self) -> Option<u64> {
		self.origin.parse().ok()
	}

	/// Destination chain ids in list order, skipping unparseable entries
	pub fn destination_chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
		self.destinations.iter().filter_map(|d| d.parse().ok())
	}
}

/// Receipt returned by the intent API on a successful fill submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FillReceipt {
	/// Identifier of the created fill intent, when the API returns one
	#[serde(default)]
	pub intent_id: Option<String>,
	/// On-chain transaction hash, when already available
	#[serde(default)]
	pub transaction_hash: Option<String>,
}

/// Terminal state of one invoice for one processing cycle
///
/// Exactly one outcome is produced per invoice per cycle; the engine does not
/// retry across cycles (the next cycle re-fetches and re-evaluates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
	/// Fill submitted from `chain`; `rebalanced_from` records the source
	/// chain when a rebalance preceded the fill
	Filled {
		chain: u64,
		rebalanced_from: Option<u64>,
	},
	/// Ticker hash matched no configured asset
	SkippedNoAsset,
	/// No chain held sufficient deposits to source a rebalance
	SkippedNoDestination,
	/// Balance still insufficient after the single rebalance attempt
	SkippedInsufficient,
	/// A collaborator failed mid-processing; recovered, cycle continued
	Failed { reason: String },
}

impl FillOutcome {
	pub fn is_filled(&self) -> bool {
		matches!(self, FillOutcome::Filled { .. })
	}
}

impl std::fmt::Display for FillOutcome {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			FillOutcome::Filled {
				chain,
				rebalanced_from: Some(source),
			} => write!(f, "filled on chain {} after rebalance from {}", chain, source),
			FillOutcome::Filled { chain, .. } => write!(f, "filled on chain {}", chain),
			FillOutcome::SkippedNoAsset => write!(f, "skipped: unknown asset"),
			FillOutcome::SkippedNoDestination => write!(f, "skipped: no rebalance source"),
			FillOutcome::SkippedInsufficient => {
				write!(f, "skipped: insufficient balance after rebalance")
			},
			FillOutcome::Failed { reason } => write!(f, "failed: {}", reason),
		}
	}
}

/// Summary of one processing cycle: the terminal outcome of every invoice in
/// processing order
#[derive(Debug, Clone)]
pub struct CycleReport {
	/// Correlation id for the cycle's log lines
	pub cycle_id: String,
	/// (intent id, outcome) pairs in the order invoices were processed
	pub outcomes: Vec<(String, FillOutcome)>,
}

impl CycleReport {
	pub fn filled_count(&self) -> usize {
		self.outcomes.iter().filter(|(_, o)| o.is_filled()).count()
	}
}
