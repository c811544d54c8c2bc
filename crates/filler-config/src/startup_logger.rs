//! Service startup logging for the invoice filler

use filler_types::FillerConfig;
use std::env;
use tracing::info;

/// Logs service information at startup
pub fn log_service_info() {
	let service_name = "invoice-filler";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Invoice Filler Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {}", env::consts::OS);

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs the loaded configuration summary once validation succeeded
pub fn log_startup_complete(config: &FillerConfig) {
	info!("✅ Configuration loaded");
	info!("📡 API: {}", config.api_url);
	let mut chain_ids: Vec<u64> = config.chain_ids().collect();
	chain_ids.sort_unstable();
	info!("⛓️ Chains: {:?}", chain_ids);
	info!(
		"💰 Assets: {:?}",
		config
			.assets
			.iter()
			.map(|a| a.symbol.as_str())
			.collect::<Vec<_>>()
	);
	info!(
		"🧭 Settlement chain {} excluded from primary rebalance search",
		config.settlement_chain_id
	);
	info!(
		"⏱️ Poll interval {}s, staleness threshold {}h, timestamps in {:?}",
		config.poll_interval_secs,
		config.staleness.num_hours(),
		config.timestamp_unit
	);
}

/// Logs service shutdown information
pub fn log_service_shutdown() {
	info!("🛑 Invoice Filler Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}
