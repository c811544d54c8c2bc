//! Mock collaborators for integration tests
//!
//! The chain state is shared between the reader and the bridge so a
//! successful mock rebalance is observable through the reader, the same way
//! a real bridge transfer would be.

#![allow(dead_code)]

use async_trait::async_trait;
use invoice_filler::{
	AssetSymbol, FeedError, Invoice, ReadError, RebalanceError, SubmissionError, U256,
};
use filler_types::{
	BridgeExecutor, ChainBalanceReader, FillReceipt, IntentSubmitter, InvoiceFeed,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Raw (native-precision) balances keyed by (chain id, owner address)
pub type ChainState = Arc<Mutex<HashMap<(u64, String), U256>>>;

/// Balance reader backed by an in-memory map, with per-chain failure
/// injection and a read counter
#[derive(Debug, Clone)]
pub struct MockChainReader {
	state: ChainState,
	failing_chains: Arc<Mutex<HashSet<u64>>>,
	pub reads: Arc<AtomicUsize>,
}

impl MockChainReader {
	pub fn new() -> Self {
		Self {
			state: Arc::new(Mutex::new(HashMap::new())),
			failing_chains: Arc::new(Mutex::new(HashSet::new())),
			reads: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// Shared handle to the underlying balances, for bridges and assertions
	pub fn state(&self) -> ChainState {
		Arc::clone(&self.state)
	}

	/// Set the raw balance of `owner` on `chain_id`
	pub fn set_balance(&self, chain_id: u64, owner: &str, raw: &str) {
		self.state
			.lock()
			.unwrap()
			.insert((chain_id, owner.to_string()), U256::from(raw));
	}

	/// Make every read against `chain_id` fail
	pub fn fail_chain(&self, chain_id: u64) {
		self.failing_chains.lock().unwrap().insert(chain_id);
	}
}

#[async_trait]
impl ChainBalanceReader for MockChainReader {
	async fn read_balance(
		&self,
		chain_id: u64,
		_token_address: &str,
		owner: &str,
	) -> Result<U256, ReadError> {
		self.reads.fetch_add(1, Ordering::SeqCst);
		if self.failing_chains.lock().unwrap().contains(&chain_id) {
			return Err(ReadError::RpcResponse {
				chain_id,
				message: "injected failure".to_string(),
			});
		}
		Ok(self
			.state
			.lock()
			.unwrap()
			.get(&(chain_id, owner.to_string()))
			.cloned()
			.unwrap_or_else(U256::zero))
	}
}

/// How the mock bridge responds to a rebalance request
#[derive(Debug, Clone)]
pub enum BridgeBehavior {
	/// Succeed and credit the wallet on the target chain with the given raw
	/// balance, visible through the shared chain state
	SucceedAndCredit { wallet: String, raw: String },
	/// Succeed without any observable balance change
	SucceedSilently,
	/// Decline without error
	Decline,
	/// Fail with a transport error
	Fail,
}

/// Bridge executor with a call counter and configurable behavior
#[derive(Debug, Clone)]
pub struct MockBridge {
	state: ChainState,
	behavior: BridgeBehavior,
	pub calls: Arc<AtomicUsize>,
}

impl MockBridge {
	pub fn new(state: ChainState, behavior: BridgeBehavior) -> Self {
		Self {
			state,
			behavior,
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}
}

#[async_trait]
impl BridgeExecutor for MockBridge {
	async fn rebalance(
		&self,
		_asset: &AssetSymbol,
		source_chain: u64,
		target_chain: u64,
		_amount: &U256,
	) -> Result<bool, RebalanceError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		match &self.behavior {
			BridgeBehavior::SucceedAndCredit { wallet, raw } => {
				self.state
					.lock()
					.unwrap()
					.insert((target_chain, wallet.clone()), U256::from(raw.as_str()));
				Ok(true)
			},
			BridgeBehavior::SucceedSilently => Ok(true),
			BridgeBehavior::Decline => Ok(false),
			BridgeBehavior::Fail => Err(RebalanceError::Rejected {
				source_chain,
				target: target_chain,
				reason: "injected bridge failure".to_string(),
			}),
		}
	}
}

/// Invoice feed returning a fixed queue, or failing on demand
#[derive(Debug, Clone)]
pub struct MockFeed {
	invoices: Vec<Invoice>,
	fail: bool,
}

impl MockFeed {
	pub fn new(invoices: Vec<Invoice>) -> Self {
		Self {
			invoices,
			fail: false,
		}
	}

	pub fn failing() -> Self {
		Self {
			invoices: Vec::new(),
			fail: true,
		}
	}
}

#[async_trait]
impl InvoiceFeed for MockFeed {
	async fn fetch_pending(&self) -> Result<Vec<Invoice>, FeedError> {
		if self.fail {
			return Err(FeedError::InvalidPayload {
				reason: "injected feed failure".to_string(),
			});
		}
		Ok(self.invoices.clone())
	}
}

/// Intent submitter recording every fill it receives
#[derive(Debug, Clone)]
pub struct MockSubmitter {
	pub fills: Arc<Mutex<Vec<(u64, U256)>>>,
	fail: bool,
}

impl MockSubmitter {
	pub fn new() -> Self {
		Self {
			fills: Arc::new(Mutex::new(Vec::new())),
			fail: false,
		}
	}

	pub fn failing() -> Self {
		Self {
			fills: Arc::new(Mutex::new(Vec::new())),
			fail: true,
		}
	}

	pub fn fill_count(&self) -> usize {
		self.fills.lock().unwrap().len()
	}
}

#[async_trait]
impl IntentSubmitter for MockSubmitter {
	async fn submit_fill(
		&self,
		origin_chain: u64,
		_destinations: &[String],
		_beneficiary: &str,
		_asset_address: &str,
		amount: &U256,
		_max_fee: &U256,
	) -> Result<FillReceipt, SubmissionError> {
		if self.fail {
			return Err(SubmissionError::Api {
				status: 500,
				reason: "injected submission failure".to_string(),
			});
		}
		self.fills
			.lock()
			.unwrap()
			.push((origin_chain, amount.clone()));
		Ok(FillReceipt {
			intent_id: Some(format!("fill-{}", origin_chain)),
			transaction_hash: Some("0xmocktx".to_string()),
		})
	}
}
