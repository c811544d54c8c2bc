//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};

/// Load configuration from the config file plus `FILLER_`-prefixed
/// environment overrides (e.g. `FILLER_API__URL`)
pub fn load_config() -> Result<Settings, ConfigError> {
	let s = Config::builder()
		.add_source(File::with_name("config/config").required(false))
		.add_source(Environment::with_prefix("FILLER").separator("__"))
		.build()?;

	s.try_deserialize()
}
