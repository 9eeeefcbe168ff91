//! The entities persisted by the token ledger.

pub mod balance;
