//! Processing loop
//!
//! Runs fulfillment cycles on a fixed interval. Cycles share no state: each
//! one re-fetches the queue and the balance tables, so an aborted cycle
//! costs nothing but time and the next tick starts clean.

use filler_service::FulfillmentService;
use filler_types::CycleReport;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

/// The running bot: a fulfillment service plus its schedule
pub struct Bot {
	service: FulfillmentService,
	poll_interval_secs: u64,
}

impl Bot {
	pub fn new(service: FulfillmentService, poll_interval_secs: u64) -> Self {
		Self {
			service,
			poll_interval_secs,
		}
	}

	/// Execute a single cycle, logging the report. Feed failures abort the
	/// cycle only; the caller decides whether to retry.
	pub async fn run_once(&self) -> Option<CycleReport> {
		match self.service.run_cycle().await {
			Ok(report) => {
				info!(
					cycle_id = %report.cycle_id,
					invoices = report.outcomes.len(),
					filled = report.filled_count(),
					"cycle complete"
				);
				Some(report)
			},
			Err(e) => {
				error!(error = %e, "cycle aborted: invoice feed unavailable");
				None
			},
		}
	}

	/// Run cycles forever on the configured interval
	pub async fn run(self) {
		info!(
			poll_interval_secs = self.poll_interval_secs,
			"starting processing loop"
		);
		let mut ticker = interval(Duration::from_secs(self.poll_interval_secs.max(1)));
		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
		loop {
			ticker.tick().await;
			self.run_once().await;
		}
	}
}
