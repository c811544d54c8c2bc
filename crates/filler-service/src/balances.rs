//! Balance and deposit aggregation
//!
//! Builds the per-asset, per-chain tables the fulfillment engine decides on.
//! Every stored value is normalized to 18 decimals first; raw values never
//! enter a table. Reads fan out concurrently per (asset, chain) pair and a
//! failed read only costs that one entry: partial tables are valid and
//! expected, and one flaky RPC must never abort the asset or the cycle.

use filler_types::{
	normalize, AssetSymbol, BalanceTable, ChainBalanceReader, DepositTable, FillerConfig, U256,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// One pending read: which table slot it fills and how to perform it
struct ReadJob {
	symbol: AssetSymbol,
	chain_id: u64,
	token_address: String,
	decimals: u8,
	owner: String,
}

/// Aggregates normalized balance and deposit tables for one processing cycle
#[derive(Clone)]
pub struct BalanceService {
	reader: Arc<dyn ChainBalanceReader>,
	config: Arc<FillerConfig>,
}

impl BalanceService {
	pub fn new(reader: Arc<dyn ChainBalanceReader>, config: Arc<FillerConfig>) -> Self {
		Self { reader, config }
	}

	/// Wallet holdings of the configured beneficiary, normalized
	pub async fn aggregate_wallet_balances(&self) -> BalanceTable {
		let jobs = self.collect_jobs(|_| Some(self.config.beneficiary.clone()));
		self.run_jobs(jobs).await
	}

	/// Protocol-held liquidity available to source fills, normalized.
	///
	/// Mirrors the wallet aggregation but reads each chain's protocol
	/// deposit address instead of the beneficiary.
	pub async fn aggregate_deposits(&self) -> DepositTable {
		let jobs = self.collect_jobs(|chain_id| {
			self.config
				.chain(chain_id)
				.map(|c| c.protocol_address.clone())
		});
		self.run_jobs(jobs).await
	}

	/// Re-read one wallet entry from source and replace it in the table.
	///
	/// Used after a successful rebalance so the retry-fill check sees the
	/// post-rebalance balance instead of the stale snapshot. When the
	/// re-read fails the entry is removed: a stale value must not pass the
	/// sufficiency check.
	pub async fn refresh_wallet_entry(
		&self,
		table: &mut BalanceTable,
		symbol: &AssetSymbol,
		chain_id: u64,
	) {
		let Ok(chain_asset) = self.config.chain_asset(symbol, chain_id) else {
			warn!(asset = %symbol, chain_id, "no descriptor for refresh, dropping entry");
			if let Some(chains) = table.get_mut(symbol) {
				chains.remove(&chain_id);
			}
			return;
		};

		match self
			.reader
			.read_balance(chain_id, &chain_asset.address, &self.config.beneficiary)
			.await
		{
			Ok(raw) => {
				let normalized = normalize(&raw, chain_asset.decimals);
				debug!(asset = %symbol, chain_id, balance = %normalized, "refreshed balance entry");
				table
					.entry(symbol.clone())
					.or_default()
					.insert(chain_id, normalized);
			},
			Err(e) => {
				warn!(asset = %symbol, chain_id, error = %e, "balance refresh failed, dropping entry");
				if let Some(chains) = table.get_mut(symbol) {
					chains.remove(&chain_id);
				}
			},
		}
	}

	/// Expand the configured (asset, chain) pairs into read jobs.
	///
	/// Pairs without a configured chain endpoint or owner address are
	/// skipped up front; their entries simply stay absent.
	fn collect_jobs(&self, owner_for_chain: impl Fn(u64) -> Option<String>) -> Vec<ReadJob> {
		let mut jobs = Vec::new();
		for asset in &self.config.assets {
			for (&chain_id, chain_asset) in &asset.chains {
				if self.config.chain(chain_id).is_none() {
					debug!(asset = %asset.symbol, chain_id, "chain not configured, skipping read");
					continue;
				}
				let Some(owner) = owner_for_chain(chain_id) else {
					continue;
				};
				jobs.push(ReadJob {
					symbol: asset.symbol.clone(),
					chain_id,
					token_address: chain_asset.address.clone(),
					decimals: chain_asset.decimals,
					owner,
				});
			}
		}
		jobs
	}

	/// Fan the reads out concurrently and assemble the table from the
	/// successes
	async fn run_jobs(&self, jobs: Vec<ReadJob>) -> BalanceTable {
		let tasks = jobs.into_iter().map(|job| {
			let reader = Arc::clone(&self.reader);
			tokio::spawn(async move {
				let result = reader
					.read_balance(job.chain_id, &job.token_address, &job.owner)
					.await;
				(job, result)
			})
		});

		let mut table = BalanceTable::new();
		for joined in join_all(tasks).await {
			let Ok((job, result)) = joined else {
				warn!("balance read task panicked, omitting entry");
				continue;
			};
			match result {
				Ok(raw) => {
					let normalized = normalize(&raw, job.decimals);
					debug!(
						asset = %job.symbol,
						chain_id = job.chain_id,
						balance = %normalized,
						"balance read"
					);
					table
						.entry(job.symbol)
						.or_default()
						.insert(job.chain_id, normalized);
				},
				Err(e) => {
					warn!(
						asset = %job.symbol,
						chain_id = job.chain_id,
						error = %e,
						"balance read failed, omitting entry"
					);
				},
			}
		}
		table
	}
}

/// Whether the table holds at least `required` for (asset, chain).
///
/// Both sides are normalized; an absent entry is insufficient by definition
/// (absence is distinct from zero, but neither can cover a fill).
pub fn has_enough_balance(
	table: &BalanceTable,
	asset: &AssetSymbol,
	chain_id: u64,
	required: &U256,
) -> bool {
	table
		.get(asset)
		.and_then(|chains| chains.get(&chain_id))
		.map(|balance| balance >= required)
		.unwrap_or(false)
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use filler_types::{
		AssetConfig, ChainAsset, ChainEndpoint, ReadError, SecretString, TimestampUnit,
	};
	use std::collections::{HashMap, HashSet};
	use url::Url;

	#[derive(Debug)]
	struct StaticReader {
		/// (chain_id, owner) -> raw balance
		balances: HashMap<(u64, String), U256>,
		failing_chains: HashSet<u64>,
	}

	#[async_trait]
	impl ChainBalanceReader for StaticReader {
		async fn read_balance(
			&self,
			chain_id: u64,
			_token_address: &str,
			owner: &str,
		) -> Result<U256, ReadError> {
			if self.failing_chains.contains(&chain_id) {
				return Err(ReadError::RpcResponse {
					chain_id,
					message: "connection refused".to_string(),
				});
			}
			Ok(self
				.balances
				.get(&(chain_id, owner.to_string()))
				.cloned()
				.unwrap_or_else(U256::zero))
		}
	}

	fn test_config(chain_ids: &[u64]) -> Arc<FillerConfig> {
		let mut chains = HashMap::new();
		for &chain_id in chain_ids {
			chains.insert(
				chain_id,
				ChainEndpoint {
					rpc_url: Url::parse("https://rpc.example.com").unwrap(),
					protocol_address: format!("0xprotocol{}", chain_id),
				},
			);
		}

		let mut usdc = AssetConfig::new(AssetSymbol::from("USDC"), "0xusdc");
		for &chain_id in chain_ids {
			usdc = usdc.with_chain(chain_id, ChainAsset::new("0xtoken", 6));
		}

		Arc::new(FillerConfig {
			api_url: Url::parse("https://api.example.com").unwrap(),
			beneficiary: "0xwallet".to_string(),
			signer_key: SecretString::from("0xkey"),
			max_fee: U256::zero(),
			staleness: filler_types::chrono::Duration::hours(6),
			timestamp_unit: TimestampUnit::Milliseconds,
			settlement_chain_id: 1,
			poll_interval_secs: 300,
			chains,
			assets: vec![usdc],
		})
	}

	#[tokio::test]
	async fn failed_chain_is_omitted_not_fatal() {
		let mut balances = HashMap::new();
		balances.insert((10, "0xwallet".to_string()), U256::from("5000000"));
		balances.insert((137, "0xwallet".to_string()), U256::from("7000000"));
		balances.insert((42161, "0xwallet".to_string()), U256::from("9000000"));

		let reader = Arc::new(StaticReader {
			balances,
			failing_chains: HashSet::from([137]),
		});
		let service = BalanceService::new(reader, test_config(&[10, 137, 42161]));

		let table = service.aggregate_wallet_balances().await;
		let usdc = table.get(&AssetSymbol::from("USDC")).unwrap();

		assert_eq!(usdc.len(), 2);
		assert_eq!(usdc.get(&10).unwrap().as_str(), "5000000000000000000");
		assert_eq!(usdc.get(&42161).unwrap().as_str(), "9000000000000000000");
		assert!(!usdc.contains_key(&137));
	}

	#[tokio::test]
	async fn deposits_read_protocol_addresses() {
		let mut balances = HashMap::new();
		balances.insert((10, "0xprotocol10".to_string()), U256::from("1000000"));
		// Wallet balance on the same chain must not leak into deposits
		balances.insert((10, "0xwallet".to_string()), U256::from("9999999"));

		let reader = Arc::new(StaticReader {
			balances,
			failing_chains: HashSet::new(),
		});
		let service = BalanceService::new(reader, test_config(&[10]));

		let deposits = service.aggregate_deposits().await;
		let usdc = deposits.get(&AssetSymbol::from("USDC")).unwrap();
		assert_eq!(usdc.get(&10).unwrap().as_str(), "1000000000000000000");
	}

	#[tokio::test]
	async fn refresh_drops_entry_when_read_fails() {
		let reader = Arc::new(StaticReader {
			balances: HashMap::new(),
			failing_chains: HashSet::from([10]),
		});
		let service = BalanceService::new(reader, test_config(&[10]));

		let symbol = AssetSymbol::from("USDC");
		let mut table = BalanceTable::new();
		table
			.entry(symbol.clone())
			.or_default()
			.insert(10, U256::from("123"));

		service.refresh_wallet_entry(&mut table, &symbol, 10).await;
		assert!(!table.get(&symbol).unwrap().contains_key(&10));
	}

	#[test]
	fn absent_entry_is_insufficient() {
		let table = BalanceTable::new();
		assert!(!has_enough_balance(
			&table,
			&AssetSymbol::from("USDC"),
			10,
			&U256::from("1")
		));
	}

	#[test]
	fn sufficiency_compares_normalized_magnitudes() {
		let symbol = AssetSymbol::from("USDC");
		let mut table = BalanceTable::new();
		table
			.entry(symbol.clone())
			.or_default()
			.insert(10, U256::from("100000000000000000000"));

		assert!(has_enough_balance(
			&table,
			&symbol,
			10,
			&U256::from("100000000000000000000")
		));
		assert!(!has_enough_balance(
			&table,
			&symbol,
			10,
			&U256::from("100000000000000000001")
		));
	}
}
