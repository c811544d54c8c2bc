//! Error types for the external collaborator boundary

use thiserror::Error;

/// Per-chain balance lookup failure
///
/// Always transient from the engine's point of view: the aggregator recovers
/// by omitting the chain's entry for the current cycle.
#[derive(Debug, Error)]
pub enum ReadError {
	#[error("RPC request failed: {0}")]
	Rpc(#[from] reqwest::Error),

	#[error("RPC error from chain {chain_id}: {message}")]
	RpcResponse { chain_id: u64, message: String },

	#[error("invalid balance response from chain {chain_id}: {reason}")]
	InvalidResponse { chain_id: u64, reason: String },

	#[error("no RPC endpoint configured for chain {chain_id}")]
	MissingEndpoint { chain_id: u64 },
}

/// Invoice retrieval failure
///
/// Propagated to the caller of the cycle; the cycle aborts before any
/// invoice processing.
#[derive(Debug, Error)]
pub enum FeedError {
	#[error("invoice feed request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("invoice feed returned malformed payload: {reason}")]
	InvalidPayload { reason: String },
}

/// Bridge/rebalance execution failure, recovered as a `Failed` outcome for
/// the invoice being processed
#[derive(Debug, Error)]
pub enum RebalanceError {
	#[error("bridge request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("bridge rejected rebalance from chain {source_chain} to {target}: {reason}")]
	Rejected {
		source_chain: u64,
		target: u64,
		reason: String,
	},
}

/// Fill submission failure, recovered as a `Failed` outcome for the invoice
/// being processed
#[derive(Debug, Error)]
pub enum SubmissionError {
	#[error("intent submission request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("intent API returned {status}: {reason}")]
	Api { status: u16, reason: String },

	#[error("intent API returned malformed receipt: {reason}")]
	InvalidReceipt { reason: String },
}
