//! Collaborator traits for everything the decision core treats as a side
//! effect
//!
//! Production implementations live in `filler-adapters`; tests inject doubles
//! through the same traits. Selection happens by dependency injection at
//! build time, never by branching on the environment.

use super::errors::{FeedError, ReadError, RebalanceError, SubmissionError};
use crate::invoices::{FillReceipt, Invoice};
use crate::models::{AssetSymbol, U256};
use async_trait::async_trait;
use std::fmt::Debug;

/// Reads a raw ERC-20-style balance on one chain
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainBalanceReader: Send + Sync + Debug {
	/// Balance of `owner` for the token at `token_address` on `chain_id`,
	/// in the token's native precision
	async fn read_balance(
		&self,
		chain_id: u64,
		token_address: &str,
		owner: &str,
	) -> Result<U256, ReadError>;
}

/// Retrieves the queue of pending settlement requests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceFeed: Send + Sync + Debug {
	/// Pending invoices older than the configured staleness threshold.
	///
	/// The staleness filter and timestamp-unit conversion belong to this
	/// boundary; callers receive only eligible invoices.
	async fn fetch_pending(&self) -> Result<Vec<Invoice>, FeedError>;
}

/// Moves liquidity between chains to enable a fill
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BridgeExecutor: Send + Sync + Debug {
	/// Bridge `amount` (normalized units) of `asset` from `source_chain` to
	/// `target_chain`. `Ok(false)` means the bridge declined without error.
	async fn rebalance(
		&self,
		asset: &AssetSymbol,
		source_chain: u64,
		target_chain: u64,
		amount: &U256,
	) -> Result<bool, RebalanceError>;
}

/// Submits the settlement transaction that fills an invoice
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntentSubmitter: Send + Sync + Debug {
	/// Submit a fill sourced from `origin_chain` for the given invoice
	/// destinations. `amount` is in hub-normalized units; `asset_address` is
	/// the token contract on the origin chain.
	#[allow(clippy::too_many_arguments)]
	async fn submit_fill(
		&self,
		origin_chain: u64,
		destinations: &[String],
		beneficiary: &str,
		asset_address: &str,
		amount: &U256,
		max_fee: &U256,
	) -> Result<FillReceipt, SubmissionError>;
}
