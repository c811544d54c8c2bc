//! Test configuration and invoice fixtures

#![allow(dead_code)]

use filler_config::{
	ApiSettings, AssetSettings, BotSettings, ChainAssetSettings, ChainSettings, Settings,
	WalletSettings,
};
use invoice_filler::{Invoice, U256};
use filler_types::{SecretString, TimestampUnit};
use std::collections::HashMap;

pub const TEST_WALLET: &str = "0xwallet";
pub const USDC_TICKER_HASH: &str = "0xticker-usdc";

/// Protocol deposit address used on every test chain for `chain_id`
pub fn protocol_address(chain_id: u64) -> String {
	format!("0xprotocol{}", chain_id)
}

/// Settings with chains 1 (settlement), 10, 137 and 8453, and USDC at 6
/// decimals everywhere
pub fn test_settings() -> Settings {
	let mut chains = HashMap::new();
	let mut usdc_chains = HashMap::new();
	for chain_id in [1u64, 10, 137, 8453] {
		chains.insert(
			chain_id.to_string(),
			ChainSettings {
				rpc_url: "https://rpc.example.com".to_string(),
				protocol_address: protocol_address(chain_id),
			},
		);
		usdc_chains.insert(
			chain_id.to_string(),
			ChainAssetSettings {
				address: "0xusdc".to_string(),
				decimals: 6,
			},
		);
	}

	let mut assets = HashMap::new();
	assets.insert(
		"USDC".to_string(),
		AssetSettings {
			ticker_hash: USDC_TICKER_HASH.to_string(),
			chains: usdc_chains,
		},
	);

	Settings {
		api: ApiSettings {
			url: "https://api.example.com".to_string(),
			max_fee: "0".to_string(),
			staleness_hours: 6,
			timestamp_unit: TimestampUnit::Milliseconds,
		},
		wallet: WalletSettings {
			beneficiary: TEST_WALLET.to_string(),
			signer_key: SecretString::from("0xtestkey"),
		},
		bot: BotSettings {
			poll_interval_secs: 300,
			settlement_chain_id: 1,
		},
		chains,
		assets,
	}
}

/// USDC invoice with `amount` in hub-normalized 18-decimal units
pub fn usdc_invoice(id: &str, origin: u64, destinations: &[u64], amount: &str) -> Invoice {
	usdc_invoice_at(id, origin, destinations, amount, "1000")
}

/// Same, with an explicit enqueue timestamp for ordering scenarios
pub fn usdc_invoice_at(
	id: &str,
	origin: u64,
	destinations: &[u64],
	amount: &str,
	timestamp: &str,
) -> Invoice {
	Invoice {
		intent_id: id.to_string(),
		origin: origin.to_string(),
		destinations: destinations.iter().map(|d| d.to_string()).collect(),
		amount: U256::from(amount),
		ticker_hash: USDC_TICKER_HASH.to_string(),
		hub_invoice_enqueued_timestamp: timestamp.to_string(),
	}
}
