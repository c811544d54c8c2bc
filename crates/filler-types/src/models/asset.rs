//! Asset and per-chain token descriptor models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ticker symbol identifying an asset across chains (e.g. "USDC", "WETH")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct AssetSymbol(pub String);

impl AssetSymbol {
	pub fn new(symbol: impl Into<String>) -> Self {
		Self(symbol.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for AssetSymbol {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<&str> for AssetSymbol {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

/// Token deployment of an asset on one chain
///
/// Loaded once from static configuration at startup; immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainAsset {
	/// Contract address of the token on this chain
	pub address: String,
	/// Native decimal precision (typically 6 or 18)
	pub decimals: u8,
}

impl ChainAsset {
	pub fn new(address: impl Into<String>, decimals: u8) -> Self {
		Self {
			address: address.into(),
			decimals,
		}
	}
}

/// Full configuration of one asset: its canonical ticker hash (the identifier
/// the invoice feed uses) and its deployments per chain
///
/// Invariant: within the active configuration the symbol ↔ ticker hash
/// mapping is a bijection, enforced at config validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetConfig {
	pub symbol: AssetSymbol,
	pub ticker_hash: String,
	pub chains: HashMap<u64, ChainAsset>,
}

impl AssetConfig {
	pub fn new(symbol: AssetSymbol, ticker_hash: impl Into<String>) -> Self {
		Self {
			symbol,
			ticker_hash: ticker_hash.into(),
			chains: HashMap::new(),
		}
	}

	pub fn with_chain(mut self, chain_id: u64, chain_asset: ChainAsset) -> Self {
		self.chains.insert(chain_id, chain_asset);
		self
	}

	/// Deployment of this asset on the given chain, if configured
	pub fn chain_asset(&self, chain_id: u64) -> Option<&ChainAsset> {
		self.chains.get(&chain_id)
	}
}
