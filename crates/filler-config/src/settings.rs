//! Configuration settings structures

use filler_types::{
	AssetConfig, AssetSymbol, ChainAsset, ChainEndpoint, FillerConfig, SecretString, TimestampUnit,
	U256,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use url::Url;

/// Main application settings, deserialized from the config file plus
/// environment overrides
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	pub api: ApiSettings,
	pub wallet: WalletSettings,
	pub bot: BotSettings,
	pub chains: HashMap<String, ChainSettings>,
	pub assets: HashMap<String, AssetSettings>,
}

/// Invoice/intent API configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiSettings {
	pub url: String,
	#[serde(default = "default_max_fee")]
	pub max_fee: String,
	/// Invoices younger than this many hours are left for the hub to settle
	#[serde(default = "default_staleness_hours")]
	pub staleness_hours: i64,
	/// Unit of the feed's enqueue timestamps; declared here instead of
	/// guessed per-value
	#[serde(default = "default_timestamp_unit")]
	pub timestamp_unit: TimestampUnit,
}

/// Wallet configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WalletSettings {
	/// Address receiving filled intents
	pub beneficiary: String,
	/// Signer key; redacted in logs and zeroized on drop
	pub signer_key: SecretString,
}

/// Processing loop configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BotSettings {
	#[serde(default = "default_poll_interval_secs")]
	pub poll_interval_secs: u64,
	/// Chain excluded from the primary rebalance search (typically the base
	/// settlement chain, where sourcing fills is expensive)
	pub settlement_chain_id: u64,
}

/// Per-chain endpoints
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChainSettings {
	pub rpc_url: String,
	pub protocol_address: String,
}

/// Per-asset configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssetSettings {
	pub ticker_hash: String,
	pub chains: HashMap<String, ChainAssetSettings>,
}

/// Token deployment of an asset on one chain
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChainAssetSettings {
	pub address: String,
	pub decimals: u8,
}

fn default_max_fee() -> String {
	"0".to_string()
}

fn default_staleness_hours() -> i64 {
	6
}

fn default_timestamp_unit() -> TimestampUnit {
	TimestampUnit::Milliseconds
}

fn default_poll_interval_secs() -> u64 {
	300
}

/// Fatal configuration defects detected at startup
#[derive(Debug, Error)]
pub enum ConfigValidationError {
	#[error("no chains configured")]
	NoChains,

	#[error("no assets configured")]
	NoAssets,

	#[error("invalid chain id '{value}' in section {section}")]
	InvalidChainId { value: String, section: String },

	#[error("invalid API url '{url}': {reason}")]
	InvalidApiUrl { url: String, reason: String },

	#[error("invalid RPC url '{url}' for chain {chain_id}: {reason}")]
	InvalidRpcUrl {
		chain_id: u64,
		url: String,
		reason: String,
	},

	#[error("ticker hash '{ticker_hash}' is shared by assets {first} and {second}")]
	DuplicateTickerHash {
		ticker_hash: String,
		first: String,
		second: String,
	},

	#[error("missing protocol address for chain {chain_id}")]
	MissingProtocolAddress { chain_id: u64 },

	#[error("invalid max fee '{value}': {reason}")]
	InvalidMaxFee { value: String, reason: String },

	#[error("invalid staleness threshold: {hours}h")]
	InvalidStaleness { hours: i64 },
}

impl Settings {
	/// Validate and convert into the immutable runtime configuration.
	///
	/// Enforces the startup invariants: at least one chain and asset, chain
	/// id keys parse, URLs parse, protocol addresses present, and the
	/// symbol ↔ ticker hash mapping is a bijection.
	pub fn try_into_config(self) -> Result<FillerConfig, ConfigValidationError> {
		if self.chains.is_empty() {
			return Err(ConfigValidationError::NoChains);
		}
		if self.assets.is_empty() {
			return Err(ConfigValidationError::NoAssets);
		}
		if self.api.staleness_hours < 0 {
			return Err(ConfigValidationError::InvalidStaleness {
				hours: self.api.staleness_hours,
			});
		}

		let api_url =
			Url::parse(&self.api.url).map_err(|e| ConfigValidationError::InvalidApiUrl {
				url: self.api.url.clone(),
				reason: e.to_string(),
			})?;

		let max_fee = U256::from(self.api.max_fee.as_str());
		max_fee
			.validate()
			.map_err(|reason| ConfigValidationError::InvalidMaxFee {
				value: self.api.max_fee.clone(),
				reason,
			})?;

		let mut chains = HashMap::new();
		for (key, chain) in &self.chains {
			let chain_id = parse_chain_id(key, "chains")?;
			if chain.protocol_address.trim().is_empty() {
				return Err(ConfigValidationError::MissingProtocolAddress { chain_id });
			}
			let rpc_url =
				Url::parse(&chain.rpc_url).map_err(|e| ConfigValidationError::InvalidRpcUrl {
					chain_id,
					url: chain.rpc_url.clone(),
					reason: e.to_string(),
				})?;
			chains.insert(
				chain_id,
				ChainEndpoint {
					rpc_url,
					protocol_address: chain.protocol_address.clone(),
				},
			);
		}

		// Deterministic asset order regardless of map iteration order
		let mut symbols: Vec<&String> = self.assets.keys().collect();
		symbols.sort();

		let mut seen_tickers: HashMap<String, String> = HashMap::new();
		let mut assets = Vec::with_capacity(symbols.len());
		for symbol in symbols {
			let settings = &self.assets[symbol];
			let ticker_lower = settings.ticker_hash.to_ascii_lowercase();
			if let Some(first) = seen_tickers.insert(ticker_lower, symbol.clone()) {
				return Err(ConfigValidationError::DuplicateTickerHash {
					ticker_hash: settings.ticker_hash.clone(),
					first,
					second: symbol.clone(),
				});
			}

			let mut asset = AssetConfig::new(AssetSymbol::new(symbol.clone()), &settings.ticker_hash);
			for (key, chain_asset) in &settings.chains {
				let chain_id = parse_chain_id(key, &format!("assets.{}", symbol))?;
				asset = asset.with_chain(
					chain_id,
					ChainAsset::new(&chain_asset.address, chain_asset.decimals),
				);
			}
			assets.push(asset);
		}

		Ok(FillerConfig {
			api_url,
			beneficiary: self.wallet.beneficiary,
			signer_key: self.wallet.signer_key,
			max_fee,
			staleness: chrono::Duration::hours(self.api.staleness_hours),
			timestamp_unit: self.api.timestamp_unit,
			settlement_chain_id: self.bot.settlement_chain_id,
			poll_interval_secs: self.bot.poll_interval_secs,
			chains,
			assets,
		})
	}
}

fn parse_chain_id(value: &str, section: &str) -> Result<u64, ConfigValidationError> {
	value
		.parse()
		.map_err(|_| ConfigValidationError::InvalidChainId {
			value: value.to_string(),
			section: section.to_string(),
		})
}
