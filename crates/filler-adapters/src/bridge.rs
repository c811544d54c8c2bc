//! Bridge aggregator client
//!
//! Executes rebalances through an external bridge aggregator service. The
//! bridge protocol itself (route choice, approvals, settlement) is the
//! aggregator's concern; from here a rebalance is one POST that either
//! succeeds, is declined, or errors.

use async_trait::async_trait;
use filler_types::{AssetSymbol, BridgeExecutor, FillerConfig, RebalanceError, U256};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

#[derive(Debug, Serialize)]
struct RebalanceRequest<'a> {
	asset: &'a str,
	source_chain: u64,
	target_chain: u64,
	/// Normalized 18-decimal amount
	amount: &'a U256,
}

#[derive(Debug, Deserialize)]
struct RebalanceResponse {
	success: bool,
	#[serde(default)]
	reason: Option<String>,
}

/// Production [`BridgeExecutor`] delegating to a bridge aggregator API
#[derive(Debug, Clone)]
pub struct BridgeAggregatorClient {
	client: Client,
	api_url: Url,
}

impl BridgeAggregatorClient {
	pub fn new(client: Client, config: &FillerConfig) -> Self {
		Self {
			client,
			api_url: config.api_url.clone(),
		}
	}

	fn rebalance_endpoint(&self) -> String {
		format!("{}/rebalance", self.api_url.as_str().trim_end_matches('/'))
	}
}

#[async_trait]
impl BridgeExecutor for BridgeAggregatorClient {
	async fn rebalance(
		&self,
		asset: &AssetSymbol,
		source_chain: u64,
		target_chain: u64,
		amount: &U256,
	) -> Result<bool, RebalanceError> {
		info!(
			%asset,
			source_chain,
			target_chain,
			%amount,
			"requesting rebalance via bridge aggregator"
		);

		let request = RebalanceRequest {
			asset: asset.as_str(),
			source_chain,
			target_chain,
			amount,
		};

		let response: RebalanceResponse = self
			.client
			.post(self.rebalance_endpoint())
			.json(&request)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		if !response.success {
			info!(
				%asset,
				source_chain,
				target_chain,
				reason = response.reason.as_deref().unwrap_or("unspecified"),
				"bridge aggregator declined rebalance"
			);
		}
		Ok(response.success)
	}
}
