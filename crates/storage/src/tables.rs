//! The module contains definition of the tables used by the token ledger.

use crate::Mappable;
use token_ledger_types::entities::balance::{
    AccountBalance,
    AccountKey,
};

/// The table of balance records, one per `(asset, owner)` account.
///
/// A stored record always carries a strictly positive amount: a debit that
/// reaches zero removes the record instead of keeping it.
pub struct Balances;

impl Mappable for Balances {
    type Key = Self::OwnedKey;
    type OwnedKey = AccountKey;
    type Value = Self::OwnedValue;
    type OwnedValue = AccountBalance;
}
