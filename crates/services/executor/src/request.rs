//! The contract-dispatch boundary: operation names with raw string
//! arguments, resolved against the caller identity the platform
//! authenticated.
//!
//! The boundary validates everything before the executor touches the
//! snapshot: amounts are parsed into validated [`Amount`]s, identifiers are
//! checked for emptiness, and the owner arguments the wire format leaves
//! implicit are substituted with the explicit caller.

use crate::{
    executor::LedgerExecutor,
    ports::LedgerDatabase,
};
use token_ledger_storage::transactional::{
    Changes,
    Modifiable,
};
use token_ledger_types::{
    amount::Amount,
    identifier::{
        AssetId,
        Owner,
    },
    services::{
        ledger::{
            Error,
            Response,
            Result as LedgerResult,
        },
        Uncommitted,
    },
};

/// A raw invocation as received from the platform's request routing.
#[derive(Debug, Clone)]
pub struct Request {
    /// The authenticated identity the platform resolved for the invocation.
    pub caller: Owner,
    /// The operation name.
    pub method: String,
    /// The raw string arguments of the operation.
    pub args: Vec<String>,
}

impl Request {
    /// Creates the request from the operation name and its raw arguments.
    pub fn new(
        caller: Owner,
        method: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            caller,
            method: method.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// A fully parsed and validated ledger operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create new supply for the owner.
    Mint {
        /// The minted asset.
        asset_id: AssetId,
        /// The credited account.
        owner: Owner,
        /// The amount of new supply.
        amount: Amount,
    },
    /// Move balance between two owners of the same asset.
    Transfer {
        /// The transferred asset.
        asset_id: AssetId,
        /// The debited account.
        from: Owner,
        /// The credited account.
        to: Owner,
        /// The transferred amount.
        amount: Amount,
    },
    /// Destroy supply held by the owner.
    Burn {
        /// The burned asset.
        asset_id: AssetId,
        /// The debited account.
        owner: Owner,
        /// The destroyed amount.
        amount: Amount,
    },
    /// Look up one balance record.
    Query {
        /// The queried asset.
        asset_id: AssetId,
        /// The queried account.
        owner: Owner,
    },
}

impl Operation {
    /// Parses a raw request into a typed operation.
    pub fn parse(request: &Request) -> LedgerResult<Self> {
        match (request.method.as_str(), request.args.as_slice()) {
            ("mint", [asset_id, amount, owner]) => Ok(Operation::Mint {
                asset_id: AssetId::new(asset_id.as_str())?,
                owner: Owner::new(owner.as_str())?,
                amount: Amount::parse(amount)?,
            }),
            ("transfer", [asset_id, amount, new_owner]) => Ok(Operation::Transfer {
                asset_id: AssetId::new(asset_id.as_str())?,
                from: request.caller.clone(),
                to: Owner::new(new_owner.as_str())?,
                amount: Amount::parse(amount)?,
            }),
            ("burn", [asset_id, amount]) => Ok(Operation::Burn {
                asset_id: AssetId::new(asset_id.as_str())?,
                owner: request.caller.clone(),
                amount: Amount::parse(amount)?,
            }),
            ("query", [asset_id]) => Ok(Operation::Query {
                asset_id: AssetId::new(asset_id.as_str())?,
                owner: request.caller.clone(),
            }),
            ("mint" | "transfer" | "burn" | "query", args) => {
                Err(Error::InvalidArgument(format!(
                    "wrong number of arguments for `{}`: {}",
                    request.method,
                    args.len()
                )))
            }
            (method, _) => {
                Err(Error::InvalidArgument(format!("unknown operation `{method}`")))
            }
        }
    }
}

impl<D> LedgerExecutor<D>
where
    D: LedgerDatabase,
{
    /// Executes a raw request against the snapshot and returns the response
    /// together with the staged write-set. Nothing is committed.
    #[tracing::instrument(
        skip_all,
        fields(method = %request.method, caller = %request.caller)
    )]
    pub fn execute_without_commit(
        &self,
        request: &Request,
    ) -> LedgerResult<Uncommitted<Response, Changes>> {
        let operation = Operation::parse(request)?;
        self.execute_operation(operation)
    }

    /// Executes a parsed operation against the snapshot and returns the
    /// response together with the staged write-set. Nothing is committed.
    pub fn execute_operation(
        &self,
        operation: Operation,
    ) -> LedgerResult<Uncommitted<Response, Changes>> {
        match operation {
            Operation::Mint {
                asset_id,
                owner,
                amount,
            } => {
                let (result, changes) = self.mint(&asset_id, &owner, amount)?.into();
                Ok(Uncommitted::new(Response::Events(result.events), changes))
            }
            Operation::Transfer {
                asset_id,
                from,
                to,
                amount,
            } => {
                let (result, changes) =
                    self.transfer(&asset_id, &from, &to, amount)?.into();
                Ok(Uncommitted::new(Response::Events(result.events), changes))
            }
            Operation::Burn {
                asset_id,
                owner,
                amount,
            } => {
                let (result, changes) = self.burn(&asset_id, &owner, amount)?.into();
                Ok(Uncommitted::new(Response::Events(result.events), changes))
            }
            Operation::Query { asset_id, owner } => {
                let record = self.query(&asset_id, &owner)?;
                Ok(Uncommitted::new(Response::Balance(record), Changes::default()))
            }
        }
    }
}

impl<D> LedgerExecutor<D>
where
    D: LedgerDatabase + Modifiable,
{
    /// Executes a raw request and commits the staged write-set as one atomic
    /// group. A failed request commits nothing.
    pub fn execute_and_commit(&mut self, request: &Request) -> LedgerResult<Response> {
        let (response, changes) = self.execute_without_commit(request)?.into();
        self.commit_changes(changes)?;
        Ok(response)
    }
}
