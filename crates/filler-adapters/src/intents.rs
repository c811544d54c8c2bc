//! Intent submission client
//!
//! Posts new fill intents to the hub API. Transaction signing and gas are
//! handled server-side by the intent API; the submitter only describes the
//! fill.

use async_trait::async_trait;
use filler_types::{FillReceipt, FillerConfig, IntentSubmitter, SubmissionError, U256};
use reqwest::Client;
use serde::Serialize;
use tracing::info;
use url::Url;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewIntentRequest<'a> {
	origin: u64,
	destinations: &'a [String],
	to: &'a str,
	input_asset: &'a str,
	amount: &'a U256,
	call_data: &'a str,
	max_fee: &'a U256,
}

/// Production [`IntentSubmitter`] backed by the hub's HTTP API
#[derive(Debug, Clone)]
pub struct HttpIntentSubmitter {
	client: Client,
	api_url: Url,
}

impl HttpIntentSubmitter {
	pub fn new(client: Client, config: &FillerConfig) -> Self {
		Self {
			client,
			api_url: config.api_url.clone(),
		}
	}

	fn intents_endpoint(&self) -> String {
		format!("{}/intents", self.api_url.as_str().trim_end_matches('/'))
	}
}

#[async_trait]
impl IntentSubmitter for HttpIntentSubmitter {
	async fn submit_fill(
		&self,
		origin_chain: u64,
		destinations: &[String],
		beneficiary: &str,
		asset_address: &str,
		amount: &U256,
		max_fee: &U256,
	) -> Result<FillReceipt, SubmissionError> {
		let request = NewIntentRequest {
			origin: origin_chain,
			destinations,
			to: beneficiary,
			input_asset: asset_address,
			amount,
			call_data: "0x",
			max_fee,
		};

		let response = self
			.client
			.post(self.intents_endpoint())
			.json(&request)
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			let reason = response.text().await.unwrap_or_default();
			return Err(SubmissionError::Api {
				status: status.as_u16(),
				reason,
			});
		}

		let receipt: FillReceipt =
			response
				.json()
				.await
				.map_err(|e| SubmissionError::InvalidReceipt {
					reason: e.to_string(),
				})?;

		info!(
			origin_chain,
			intent_id = receipt.intent_id.as_deref().unwrap_or("unknown"),
			"fill intent submitted"
		);
		Ok(receipt)
	}
}
