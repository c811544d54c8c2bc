//! Filler Types
//!
//! Shared models and traits for the invoice filler. This crate contains all
//! domain models plus the collaborator traits the decision core depends on.

pub mod collaborators;
pub mod invoices;
pub mod models;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use models::{
	denormalize, normalize, AssetConfig, AssetSymbol, BalanceTable, ChainAsset, ChainBalances,
	ChainEndpoint, DepositTable, FillerConfig, NormalizationError, SecretString, TimestampUnit,
	U256, NORMALIZED_DECIMALS,
};

pub use invoices::{CycleReport, FillOutcome, FillReceipt, Invoice};

pub use collaborators::{
	BridgeExecutor, ChainBalanceReader, FeedError, IntentSubmitter, InvoiceFeed, ReadError,
	RebalanceError, SubmissionError,
};
