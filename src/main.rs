//! Invoice Filler
//!
//! Main entry point for the fulfillment bot

use invoice_filler::{log_service_info, FillerBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
		.init();

	log_service_info();
	FillerBuilder::new().start().await?;
	Ok(())
}
