//! Domain models shared across the filler crates

pub mod amount;
pub mod asset;
pub mod registry;
pub mod secret_string;
pub mod u256;

pub use amount::{denormalize, normalize, NormalizationError, NORMALIZED_DECIMALS};
pub use asset::{AssetConfig, AssetSymbol, ChainAsset};
pub use registry::{ChainEndpoint, FillerConfig, TimestampUnit};
pub use secret_string::SecretString;
pub use u256::U256;

use std::collections::HashMap;

/// Normalized amount per chain id for a single asset
pub type ChainBalances = HashMap<u64, U256>;

/// Per-asset, per-chain table of normalized wallet balances.
///
/// An absent entry means the chain has no descriptor for the asset or the
/// read failed; absence is distinct from a zero balance and is never filled
/// with a placeholder.
pub type BalanceTable = HashMap<AssetSymbol, ChainBalances>;

/// Same shape as [`BalanceTable`] but holding protocol-side liquidity
/// available to source fills.
pub type DepositTable = BalanceTable;
