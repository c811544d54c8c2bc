//! Filler Configuration
//!
//! Configuration management and startup utilities for the invoice filler.

pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use loader::load_config;
pub use settings::{
	ApiSettings, AssetSettings, BotSettings, ChainAssetSettings, ChainSettings,
	ConfigValidationError, Settings, WalletSettings,
};
pub use startup_logger::{log_service_info, log_service_shutdown, log_startup_complete};
