//! Centralized mocks and fixtures for testing
//!
//! Reusable mock collaborators and configuration builders shared across the
//! integration test files.

pub mod collaborators;
pub mod configs;

#[allow(unused_imports)]
pub use collaborators::{
	BridgeBehavior, ChainState, MockBridge, MockChainReader, MockFeed, MockSubmitter,
};
#[allow(unused_imports)]
pub use configs::{
	protocol_address, test_settings, usdc_invoice, usdc_invoice_at, TEST_WALLET, USDC_TICKER_HASH,
};
