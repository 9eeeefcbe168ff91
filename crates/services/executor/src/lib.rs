//! The crate `token-ledger-executor` implements the ledger operations: the
//! four state transitions over `(asset, owner)` balance records and the
//! string-argument request boundary of the dispatch layer. Each mutating
//! operation stages its writes into a storage transaction and returns them
//! as an uncommitted write-set; the platform commits the set atomically or
//! discards it.

#![deny(clippy::arithmetic_side_effects)]
#![deny(clippy::cast_possible_truncation)]
#![deny(unused_crate_dependencies)]
#![deny(warnings)]

pub mod executor;
pub mod ports;
pub mod request;

pub use executor::LedgerExecutor;
pub use request::{
    Operation,
    Request,
};
