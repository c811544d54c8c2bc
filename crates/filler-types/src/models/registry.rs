//! Validated, immutable runtime configuration for the filler
//!
//! Built once at startup by the config crate from the deserialized settings
//! and passed by reference into every component. No component mutates it and
//! no ambient global state exists.

use super::amount::NormalizationError;
use super::asset::{AssetConfig, AssetSymbol, ChainAsset};
use super::secret_string::SecretString;
use super::u256::U256;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Unit of the `hub_invoice_enqueued_timestamp` field on the invoice feed.
///
/// The feed has been observed emitting both; the active unit is declared in
/// configuration and converted at the feed boundary instead of guessed
/// per-value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimestampUnit {
	Seconds,
	Milliseconds,
}

impl TimestampUnit {
	/// Convert a raw feed timestamp into milliseconds since the epoch
	pub fn to_millis(&self, value: i64) -> i64 {
		match self {
			TimestampUnit::Seconds => value.saturating_mul(1000),
			TimestampUnit::Milliseconds => value,
		}
	}
}

/// Per-chain endpoints and protocol addresses
#[derive(Debug, Clone)]
pub struct ChainEndpoint {
	/// JSON-RPC endpoint for balance reads
	pub rpc_url: Url,
	/// Protocol-held deposit address on this chain (sources fills)
	pub protocol_address: String,
}

/// Immutable runtime configuration shared across all components
#[derive(Debug, Clone)]
pub struct FillerConfig {
	/// Base URL of the invoice/intent API
	pub api_url: Url,
	/// Wallet address receiving filled intents
	pub beneficiary: String,
	/// Signer key handed to the submission layer, never logged
	pub signer_key: SecretString,
	/// Maximum fee attached to fill submissions (normalized units)
	pub max_fee: U256,
	/// Invoices younger than this are not eligible for filling
	pub staleness: chrono::Duration,
	/// Unit of feed enqueue timestamps
	pub timestamp_unit: TimestampUnit,
	/// Chain excluded from the primary rebalance search (fallback only)
	pub settlement_chain_id: u64,
	/// Seconds between processing cycles
	pub poll_interval_secs: u64,
	/// Configured chains, keyed by chain id
	pub chains: HashMap<u64, ChainEndpoint>,
	/// Configured assets, in declaration order
	pub assets: Vec<AssetConfig>,
}

impl FillerConfig {
	/// Resolve an opaque feed ticker hash to a configured asset.
	///
	/// Case-insensitive exact match; `None` means the invoice references an
	/// asset this filler does not trade.
	pub fn asset_for_ticker(&self, ticker_hash: &str) -> Option<&AssetConfig> {
		self.assets
			.iter()
			.find(|asset| asset.ticker_hash.eq_ignore_ascii_case(ticker_hash))
	}

	/// Look up a configured asset by symbol
	pub fn asset(&self, symbol: &AssetSymbol) -> Option<&AssetConfig> {
		self.assets.iter().find(|asset| &asset.symbol == symbol)
	}

	/// Token descriptor for (asset, chain), failing when the pair is not
	/// configured. Callers that already resolved the asset hitting this error
	/// indicates a configuration defect, not a runtime condition.
	pub fn chain_asset(
		&self,
		symbol: &AssetSymbol,
		chain_id: u64,
	) -> Result<&ChainAsset, NormalizationError> {
		self.asset(symbol)
			.and_then(|asset| asset.chain_asset(chain_id))
			.ok_or_else(|| NormalizationError::UnknownAssetOnChain {
				asset: symbol.clone(),
				chain_id,
			})
	}

	/// Endpoint configuration for a chain
	pub fn chain(&self, chain_id: u64) -> Option<&ChainEndpoint> {
		self.chains.get(&chain_id)
	}

	/// All configured chain ids
	pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
		self.chains.keys().copied()
	}
}
