//! The crate `token-ledger-types` contains the domain types shared by the
//! token ledger crates: asset and owner identifiers, validated amounts, the
//! account balance entity, and the service-level result and error types.
//! The crate doesn't contain any logic that touches the world state; it only
//! defines the vocabulary the storage and executor crates speak.

#![deny(clippy::arithmetic_side_effects)]
#![deny(clippy::cast_possible_truncation)]
#![deny(unused_crate_dependencies)]
#![deny(missing_docs)]
#![deny(warnings)]

pub mod amount;
pub mod entities;
pub mod identifier;
pub mod services;
