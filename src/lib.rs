//! Invoice Filler Library
//!
//! A cross-chain invoice fulfillment bot: it watches a queue of settlement
//! requests, checks whether sufficient liquidity exists to fill each one
//! immediately, and rebalances funds between chains when it does not.

use std::sync::Arc;
use std::time::Duration;

use filler_adapters::{
	BridgeAggregatorClient, HttpIntentSubmitter, HttpInvoiceFeed, JsonRpcBalanceReader,
};
use filler_config::{load_config, log_startup_complete, ConfigValidationError, Settings};
use filler_service::{BalanceService, FulfillmentService};
use filler_types::{BridgeExecutor, ChainBalanceReader, IntentSubmitter, InvoiceFeed};
use thiserror::Error;

pub mod bot;

pub use bot::Bot;

// Core domain types - the most commonly used types
pub use filler_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	AssetConfig,
	AssetSymbol,
	BalanceTable,
	// Collaborator traits
	BridgeExecutor as BridgeExecutorTrait,
	ChainAsset,
	CycleReport,
	DepositTable,
	// Error types
	FeedError,
	FillOutcome,
	FillerConfig,
	Invoice,
	ReadError,
	RebalanceError,
	SubmissionError,
	U256,
};

// Service layer
pub use filler_service::{
	has_enough_balance, order_invoices, resolve_asset, select_fill_source, BalanceService as Balances,
	FulfillmentService as Fulfillment,
};

// Config
pub use filler_config::{log_service_info, log_service_shutdown};

/// Request timeout applied to every outbound HTTP call
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Errors raised while assembling the bot
#[derive(Debug, Error)]
pub enum BuilderError {
	#[error("configuration load failed: {0}")]
	Load(String),

	#[error("configuration invalid: {0}")]
	Validation(#[from] ConfigValidationError),

	#[error("http client construction failed: {0}")]
	Http(#[from] reqwest::Error),
}

/// Assembles a [`Bot`] from settings and collaborators.
///
/// Production collaborators are constructed from the validated configuration
/// by default; tests (or embedders) inject doubles through the `with_*`
/// methods. The choice is made here, by dependency injection, never by
/// branching on the environment inside the engine.
#[derive(Default)]
pub struct FillerBuilder {
	settings: Option<Settings>,
	reader: Option<Arc<dyn ChainBalanceReader>>,
	feed: Option<Arc<dyn InvoiceFeed>>,
	bridge: Option<Arc<dyn BridgeExecutor>>,
	submitter: Option<Arc<dyn IntentSubmitter>>,
}

impl FillerBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Use pre-built settings instead of loading from file/environment
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	pub fn with_balance_reader(mut self, reader: Arc<dyn ChainBalanceReader>) -> Self {
		self.reader = Some(reader);
		self
	}

	pub fn with_invoice_feed(mut self, feed: Arc<dyn InvoiceFeed>) -> Self {
		self.feed = Some(feed);
		self
	}

	pub fn with_bridge_executor(mut self, bridge: Arc<dyn BridgeExecutor>) -> Self {
		self.bridge = Some(bridge);
		self
	}

	pub fn with_intent_submitter(mut self, submitter: Arc<dyn IntentSubmitter>) -> Self {
		self.submitter = Some(submitter);
		self
	}

	/// Validate configuration, wire collaborators, and return the runnable
	/// bot
	pub fn build(self) -> Result<Bot, BuilderError> {
		let settings = match self.settings {
			Some(settings) => settings,
			None => load_config().map_err(|e| BuilderError::Load(e.to_string()))?,
		};
		let config = Arc::new(settings.try_into_config()?);
		log_startup_complete(&config);

		let client = reqwest::Client::builder()
			.timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
			.build()?;

		let reader = match self.reader {
			Some(reader) => reader,
			None => Arc::new(JsonRpcBalanceReader::new(client.clone(), &config)),
		};
		let feed = match self.feed {
			Some(feed) => feed,
			None => Arc::new(HttpInvoiceFeed::new(client.clone(), &config)),
		};
		let bridge = match self.bridge {
			Some(bridge) => bridge,
			None => Arc::new(BridgeAggregatorClient::new(client.clone(), &config)),
		};
		let submitter = match self.submitter {
			Some(submitter) => submitter,
			None => Arc::new(HttpIntentSubmitter::new(client, &config)),
		};

		let balances = BalanceService::new(reader, Arc::clone(&config));
		let service = FulfillmentService::new(Arc::clone(&config), balances, feed, bridge, submitter);

		Ok(Bot::new(service, config.poll_interval_secs))
	}

	/// Build and run the processing loop until the process is stopped
	pub async fn start(self) -> Result<(), BuilderError> {
		self.build()?.run().await;
		Ok(())
	}
}
