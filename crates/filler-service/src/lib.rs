//! Filler Service
//!
//! The decision core of the invoice filler: balance/deposit aggregation,
//! invoice ordering and asset resolution, fill source selection, and the
//! fulfillment orchestrator that ties them together. Everything with a side
//! effect is reached through the collaborator traits in `filler-types`.

pub mod balances;
pub mod invoices;
pub mod orchestrator;
pub mod selector;

pub use balances::{has_enough_balance, BalanceService};
pub use invoices::{order_invoices, resolve_asset};
pub use orchestrator::FulfillmentService;
pub use selector::select_fill_source;
