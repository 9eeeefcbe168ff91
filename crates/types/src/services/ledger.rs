//! Result, event, and error types of the ledger operations.

use crate::{
    amount::Amount,
    entities::balance::AccountBalance,
    identifier::{
        AssetId,
        Owner,
    },
    services::Uncommitted,
};
use serde::{
    Deserialize,
    Serialize,
};

/// The alias for ledger operation results.
pub type Result<T> = core::result::Result<T, Error>;

/// The uncommitted result of one applied operation: the outcome together
/// with the staged write-set.
pub type UncommittedResult<Changes> = Uncommitted<ExecutionResult, Changes>;

/// The outcome of a successfully applied mutating operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// The state transition events produced by the operation, in application
    /// order.
    pub events: Vec<Event>,
}

/// The state transitions applied by the ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// New supply was credited to an account.
    Minted {
        /// The minted asset.
        asset_id: AssetId,
        /// The account credited with the new supply.
        owner: Owner,
        /// The amount of new supply.
        amount: Amount,
    },
    /// Balance moved between two accounts of the same asset; the total
    /// supply is unchanged.
    Transferred {
        /// The transferred asset.
        asset_id: AssetId,
        /// The debited account.
        from: Owner,
        /// The credited account.
        to: Owner,
        /// The transferred amount.
        amount: Amount,
    },
    /// Supply was debited from an account and destroyed.
    Burned {
        /// The burned asset.
        asset_id: AssetId,
        /// The debited account.
        owner: Owner,
        /// The destroyed amount.
        amount: Amount,
    },
}

/// The reply of one invocation, serializable for the dispatch boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// The balance record returned by a query.
    Balance(AccountBalance),
    /// The state transition events applied by a mutation.
    Events(Vec<Event>),
}

/// Errors raised by the ledger operations.
///
/// Every operation returns the first error it encounters and stages no
/// writes, so a failed invocation leaves the world state exactly as it was.
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The amount argument is not a well-formed non-negative integer.
    #[error("amount `{0}` is not a valid non-negative integer")]
    InvalidAmount(String),
    /// The request is structurally invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// No balance record exists for the requested account.
    #[error("no balance of asset `{asset_id}` exists for owner `{owner}`")]
    AssetNotFound { asset_id: AssetId, owner: Owner },
    /// The requested debit exceeds the current balance.
    #[error(
        "balance {balance} of asset `{asset_id}` held by `{owner}` \
         is less than the requested {requested}"
    )]
    InsufficientBalance {
        asset_id: AssetId,
        owner: Owner,
        balance: Amount,
        requested: Amount,
    },
    /// A credit would push the balance above the representable maximum.
    #[error(
        "crediting {amount} to owner `{owner}` would overflow \
         the balance of asset `{asset_id}`"
    )]
    BalanceOverflow {
        asset_id: AssetId,
        owner: Owner,
        amount: Amount,
    },
    /// The state store could not satisfy a read or write. Transient from the
    /// core's point of view; the invocation may be retried by the caller.
    #[error("the state store could not satisfy the request: {0}")]
    StoreUnavailable(String),
}
