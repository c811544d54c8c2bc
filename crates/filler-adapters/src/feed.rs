//! HTTP invoice feed
//!
//! Fetches the pending invoice queue from the hub API and applies the
//! staleness filter at this boundary: invoices younger than the configured
//! threshold are still the hub's problem, not ours. Timestamp-unit conversion
//! also happens here, per the unit declared in configuration.

use async_trait::async_trait;
use chrono::Utc;
use filler_types::{FeedError, FillerConfig, Invoice, InvoiceFeed, TimestampUnit};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct InvoicesResponse {
	invoices: Vec<Invoice>,
}

/// Production [`InvoiceFeed`] backed by the hub's HTTP API
#[derive(Debug, Clone)]
pub struct HttpInvoiceFeed {
	client: Client,
	api_url: Url,
	staleness: chrono::Duration,
	timestamp_unit: TimestampUnit,
}

impl HttpInvoiceFeed {
	pub fn new(client: Client, config: &FillerConfig) -> Self {
		Self {
			client,
			api_url: config.api_url.clone(),
			staleness: config.staleness,
			timestamp_unit: config.timestamp_unit,
		}
	}

	fn invoices_endpoint(&self) -> String {
		format!("{}/invoices", self.api_url.as_str().trim_end_matches('/'))
	}

	/// Whether the invoice has waited longer than the staleness threshold.
	///
	/// Invoices with unparseable timestamps are not eligible: their age is
	/// unknown, so they stay with the hub until the feed repairs them.
	fn is_stale(&self, invoice: &Invoice) -> bool {
		let Some(raw) = invoice.parsed_timestamp() else {
			warn!(
				intent_id = %invoice.intent_id,
				timestamp = %invoice.hub_invoice_enqueued_timestamp,
				"invoice has non-numeric enqueue timestamp, skipping"
			);
			return false;
		};
		let Ok(raw) = i64::try_from(raw) else {
			return false;
		};
		let enqueued_ms = self.timestamp_unit.to_millis(raw);
		Utc::now().timestamp_millis() - enqueued_ms > self.staleness.num_milliseconds()
	}
}

#[async_trait]
impl InvoiceFeed for HttpInvoiceFeed {
	async fn fetch_pending(&self) -> Result<Vec<Invoice>, FeedError> {
		let response: InvoicesResponse = self
			.client
			.get(self.invoices_endpoint())
			.send()
			.await?
			.error_for_status()?
			.json()
			.await
			.map_err(|e| FeedError::InvalidPayload {
				reason: e.to_string(),
			})?;

		let total = response.invoices.len();
		let eligible: Vec<Invoice> = response
			.invoices
			.into_iter()
			.filter(|invoice| self.is_stale(invoice))
			.collect();

		debug!(
			total,
			eligible = eligible.len(),
			"fetched pending invoices"
		);
		Ok(eligible)
	}
}
