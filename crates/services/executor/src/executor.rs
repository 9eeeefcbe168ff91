//! The ledger executor: the four state transitions of the token account
//! state machine.
//!
//! Every mutating operation is a pure function from the current snapshot and
//! the validated arguments to an error or an [`UncommittedResult`] carrying
//! the exact write-set to commit. Validation precedes staging, so the first
//! error aborts the operation with no effective writes, and the snapshot is
//! never touched directly.

use crate::ports::LedgerDatabase;
use token_ledger_storage::{
    structured_storage::StructuredStorage,
    tables::Balances,
    transactional::{
        Changes,
        Modifiable,
        ReadTransaction,
        StorageTransaction,
    },
    StorageAsMut,
    StorageAsRef,
};
use token_ledger_types::{
    amount::Amount,
    entities::balance::{
        AccountBalance,
        AccountKey,
    },
    identifier::{
        AssetId,
        Owner,
    },
    services::{
        ledger::{
            Error,
            Event,
            ExecutionResult,
            Result as LedgerResult,
            UncommittedResult,
        },
        Uncommitted,
    },
};
use tracing::debug;

/// The executor applies ledger operations to a snapshot of the world state.
///
/// The executor never mutates the snapshot: each operation stages its writes
/// into a [`StorageTransaction`] and returns them as an uncommitted group.
/// Durability and cross-invocation conflict validation belong to the
/// platform that owns the snapshot.
#[derive(Clone, Debug)]
pub struct LedgerExecutor<D> {
    database: D,
}

impl<D> LedgerExecutor<D> {
    /// Creates the executor on top of the given state snapshot.
    pub fn new(database: D) -> Self {
        Self { database }
    }

    /// The underlying snapshot handle.
    pub fn database(&self) -> &D {
        &self.database
    }

    /// Returns the underlying snapshot handle.
    pub fn into_database(self) -> D {
        self.database
    }
}

impl<D> LedgerExecutor<D>
where
    D: LedgerDatabase,
{
    /// Credits `amount` of `asset_id` to `owner`, creating the balance
    /// record on the first mint and accumulating into it afterwards.
    #[tracing::instrument(skip_all)]
    pub fn mint(
        &self,
        asset_id: &AssetId,
        owner: &Owner,
        amount: Amount,
    ) -> LedgerResult<UncommittedResult<Changes>> {
        let mut tx = self.database.read_transaction();

        let new_balance = credit(&mut tx, asset_id, owner, amount)?;
        debug!(
            asset_id = %asset_id,
            owner = %owner,
            amount = %amount,
            new_balance = %new_balance,
            "minted new supply"
        );

        let result = ExecutionResult {
            events: vec![Event::Minted {
                asset_id: asset_id.clone(),
                owner: owner.clone(),
                amount,
            }],
        };
        Ok(Uncommitted::new(result, tx.into_changes()))
    }

    /// Moves `amount` of `asset_id` from `from` to `to`. The debit and the
    /// credit are part of the same write-set, so the total supply of the
    /// asset is unchanged.
    #[tracing::instrument(skip_all)]
    pub fn transfer(
        &self,
        asset_id: &AssetId,
        from: &Owner,
        to: &Owner,
        amount: Amount,
    ) -> LedgerResult<UncommittedResult<Changes>> {
        if from == to {
            return Err(Error::InvalidArgument(
                "cannot transfer tokens to the sending owner".to_string(),
            ));
        }

        let mut tx = self.database.read_transaction();

        let remaining = debit(&mut tx, asset_id, from, amount)?;
        let new_balance = credit(&mut tx, asset_id, to, amount)?;
        debug!(
            asset_id = %asset_id,
            from = %from,
            to = %to,
            amount = %amount,
            sender_balance = %remaining,
            recipient_balance = %new_balance,
            "transferred tokens"
        );

        let result = ExecutionResult {
            events: vec![Event::Transferred {
                asset_id: asset_id.clone(),
                from: from.clone(),
                to: to.clone(),
                amount,
            }],
        };
        Ok(Uncommitted::new(result, tx.into_changes()))
    }

    /// Debits `amount` of `asset_id` from `owner` and destroys it, removing
    /// the record when the balance reaches zero. The total supply of the
    /// asset decreases by `amount`.
    #[tracing::instrument(skip_all)]
    pub fn burn(
        &self,
        asset_id: &AssetId,
        owner: &Owner,
        amount: Amount,
    ) -> LedgerResult<UncommittedResult<Changes>> {
        let mut tx = self.database.read_transaction();

        let remaining = debit(&mut tx, asset_id, owner, amount)?;
        debug!(
            asset_id = %asset_id,
            owner = %owner,
            amount = %amount,
            remaining = %remaining,
            "burned supply"
        );

        let result = ExecutionResult {
            events: vec![Event::Burned {
                asset_id: asset_id.clone(),
                owner: owner.clone(),
                amount,
            }],
        };
        Ok(Uncommitted::new(result, tx.into_changes()))
    }

    /// Returns the balance record of the account. Read-only; stages no
    /// writes.
    pub fn query(
        &self,
        asset_id: &AssetId,
        owner: &Owner,
    ) -> LedgerResult<AccountBalance> {
        let view = StructuredStorage::new(&self.database);
        let key = AccountKey::new(asset_id.clone(), owner.clone());

        view.storage::<Balances>()
            .get(&key)?
            .ok_or_else(|| Error::AssetNotFound {
                asset_id: asset_id.clone(),
                owner: owner.clone(),
            })
    }
}

impl<D> LedgerExecutor<D>
where
    D: Modifiable,
{
    /// Commits a previously staged write-set into the underlying storage as
    /// one atomic group.
    pub fn commit_changes(&mut self, changes: Changes) -> LedgerResult<()> {
        self.database.commit_changes(changes).map_err(Into::into)
    }
}

/// Credits the account, accumulating into the existing record. A credit that
/// would overflow the representable balance voids the whole operation.
fn credit<D>(
    tx: &mut StorageTransaction<&D>,
    asset_id: &AssetId,
    owner: &Owner,
    amount: Amount,
) -> LedgerResult<Amount>
where
    D: LedgerDatabase,
{
    let key = AccountKey::new(asset_id.clone(), owner.clone());
    let current = tx
        .storage::<Balances>()
        .get(&key)?
        .map(|record| record.amount)
        .unwrap_or_default();

    let new_balance =
        current
            .checked_add(amount)
            .ok_or_else(|| Error::BalanceOverflow {
                asset_id: asset_id.clone(),
                owner: owner.clone(),
                amount,
            })?;

    // A present record always holds a positive amount, so a zero credit to
    // an absent account stages nothing.
    if new_balance.is_zero() {
        return Ok(new_balance);
    }

    tx.storage_as_mut::<Balances>().insert(
        &key,
        &AccountBalance::new(asset_id.clone(), owner.clone(), new_balance),
    )?;
    Ok(new_balance)
}

/// Debits the account. The record must exist and cover the requested amount;
/// a drained record is removed instead of being kept at zero.
fn debit<D>(
    tx: &mut StorageTransaction<&D>,
    asset_id: &AssetId,
    owner: &Owner,
    amount: Amount,
) -> LedgerResult<Amount>
where
    D: LedgerDatabase,
{
    let key = AccountKey::new(asset_id.clone(), owner.clone());
    let record =
        tx.storage::<Balances>()
            .get(&key)?
            .ok_or_else(|| Error::AssetNotFound {
                asset_id: asset_id.clone(),
                owner: owner.clone(),
            })?;

    let remaining =
        record
            .amount
            .checked_sub(amount)
            .ok_or_else(|| Error::InsufficientBalance {
                asset_id: asset_id.clone(),
                owner: owner.clone(),
                balance: record.amount,
                requested: amount,
            })?;

    if remaining.is_zero() {
        tx.storage_as_mut::<Balances>().remove(&key)?;
    } else {
        tx.storage_as_mut::<Balances>().insert(
            &key,
            &AccountBalance::new(asset_id.clone(), owner.clone(), remaining),
        )?;
    }
    Ok(remaining)
}
