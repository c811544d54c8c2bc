//! Filler Adapters
//!
//! Production implementations of the collaborator traits: JSON-RPC balance
//! reads, the HTTP invoice feed, bridge aggregator rebalancing, and intent
//! submission. Each adapter is constructed from the immutable runtime
//! configuration and a shared `reqwest::Client`.

pub mod bridge;
pub mod feed;
pub mod intents;
pub mod rpc_reader;

pub use bridge::BridgeAggregatorClient;
pub use feed::HttpInvoiceFeed;
pub use intents::HttpIntentSubmitter;
pub use rpc_reader::JsonRpcBalanceReader;
