//! External collaborator boundary: traits and their error taxonomy

pub mod errors;
pub mod traits;

pub use errors::{FeedError, ReadError, RebalanceError, SubmissionError};
pub use traits::{BridgeExecutor, ChainBalanceReader, IntentSubmitter, InvoiceFeed};
