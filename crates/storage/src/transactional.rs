//! The primitives to work with storage in transactional mode.
//!
//! A [`StorageTransaction`] is an in-memory overlay on top of a snapshot of
//! the world state: reads fall through to the snapshot, writes accumulate in
//! the transaction-local [`Changes`]. The changes become visible only when
//! the caller commits them into a [`Modifiable`] storage, as one atomic
//! group; dropping the transaction leaves the storage untouched.

use crate::{
    blueprint::{
        BlueprintInspect,
        BlueprintMutate,
    },
    column::Column,
    kv_store::{
        Key,
        KeyValueInspect,
        KeyValueMutate,
        StorageColumn,
        Value,
        WriteOperation,
    },
    structured_storage::TableWithBlueprint,
    Error as StorageError,
    Result as StorageResult,
    StorageInspect,
    StorageMutate,
};
use std::collections::{
    btree_map,
    BTreeMap,
};

/// The set of changes accumulated by a storage transaction: per-column
/// ordered maps from key bytes to the staged write. Ordered maps keep the
/// application of the changes deterministic across re-executions.
pub type Changes = BTreeMap<u32, BTreeMap<Key, WriteOperation>>;

/// The policy to resolve conflicts during committing of the changes of a
/// nested transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// The commit fails if the changes touch a key that already has a staged
    /// write.
    Fail,
    /// The commit overwrites the conflicting staged writes.
    Overwrite,
}

/// The type is transactional and holds uncommitted state.
#[impl_tools::autoimpl(for<T: trait> &mut T, Box<T>)]
pub trait Modifiable {
    /// Commits the changes into the storage as one atomic group.
    fn commit_changes(&mut self, changes: Changes) -> StorageResult<()>;
}

/// The storage transaction with not yet committed state.
#[derive(Debug, Clone)]
pub struct StorageTransaction<S> {
    changes: Changes,
    policy: ConflictPolicy,
    storage: S,
}

impl<S> StorageTransaction<S> {
    /// Creates a transaction with empty changes and the
    /// [`ConflictPolicy::Overwrite`] policy.
    pub fn transaction(storage: S) -> Self {
        Self {
            changes: Changes::default(),
            policy: ConflictPolicy::Overwrite,
            storage,
        }
    }

    /// Replaces the conflict policy of the transaction.
    pub fn with_policy(mut self, policy: ConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns a reference to the accumulated changes.
    pub fn changes(&self) -> &Changes {
        &self.changes
    }

    /// Extracts the accumulated write-set, discarding the snapshot handle.
    pub fn into_changes(self) -> Changes {
        self.changes
    }

    /// Returns the storage and the accumulated changes to it.
    pub fn into_inner(self) -> (S, Changes) {
        (self.storage, self.changes)
    }
}

impl<S> StorageTransaction<S>
where
    S: Modifiable,
{
    /// Commits the accumulated changes into the underlying storage and
    /// returns the storage.
    pub fn commit(mut self) -> StorageResult<S> {
        let changes = core::mem::take(&mut self.changes);
        self.storage.commit_changes(changes)?;
        Ok(self.storage)
    }
}

/// Provides a transaction on top of the borrowed storage. The transaction
/// can accumulate changes but has no ability to commit them into `Self`.
pub trait ReadTransaction {
    /// Returns the read transaction without ability to commit the changes.
    fn read_transaction(&self) -> StorageTransaction<&Self>;
}

impl<S> ReadTransaction for S
where
    S: KeyValueInspect,
{
    fn read_transaction(&self) -> StorageTransaction<&S> {
        StorageTransaction::transaction(self)
    }
}

/// Provides a transaction that can commit the changes into `Self`.
pub trait WriteTransaction {
    /// Returns the write transaction that can commit the changes.
    fn write_transaction(&mut self) -> StorageTransaction<&mut Self>;
}

impl<S> WriteTransaction for S
where
    S: KeyValueInspect + Modifiable,
{
    fn write_transaction(&mut self) -> StorageTransaction<&mut S> {
        StorageTransaction::transaction(self)
    }
}

/// Converts the storage into a transaction on top of it.
pub trait IntoTransaction: Sized {
    /// Converts `Self` into the transaction.
    fn into_transaction(self) -> StorageTransaction<Self>;
}

impl<S> IntoTransaction for S
where
    S: KeyValueInspect,
{
    fn into_transaction(self) -> StorageTransaction<S> {
        StorageTransaction::transaction(self)
    }
}

impl<S> Modifiable for StorageTransaction<S> {
    fn commit_changes(&mut self, changes: Changes) -> StorageResult<()> {
        for (column, tree) in changes {
            let btree = self.changes.entry(column).or_default();
            for (key, operation) in tree {
                match &self.policy {
                    ConflictPolicy::Fail => {
                        let entry = btree.entry(key);

                        match entry {
                            btree_map::Entry::Occupied(occupied) => {
                                return Err(anyhow::anyhow!(
                                    "Conflicting operation {operation:?} \
                                     for the key {:?}",
                                    occupied.key()
                                )
                                .into());
                            }
                            btree_map::Entry::Vacant(vacant) => {
                                vacant.insert(operation);
                            }
                        }
                    }
                    ConflictPolicy::Overwrite => {
                        btree.insert(key, operation);
                    }
                }
            }
        }
        Ok(())
    }
}

impl<C, S> KeyValueInspect for StorageTransaction<S>
where
    C: StorageColumn,
    S: KeyValueInspect<Column = C>,
{
    type Column = C;

    fn exists(&self, key: &[u8], column: Self::Column) -> StorageResult<bool> {
        let staged = self
            .changes
            .get(&column.id())
            .and_then(|tree| tree.get(key));

        if let Some(operation) = staged {
            match operation {
                WriteOperation::Insert(_) => Ok(true),
                WriteOperation::Remove => Ok(false),
            }
        } else {
            self.storage.exists(key, column)
        }
    }

    fn get(&self, key: &[u8], column: Self::Column) -> StorageResult<Option<Value>> {
        let staged = self
            .changes
            .get(&column.id())
            .and_then(|tree| tree.get(key));

        if let Some(operation) = staged {
            match operation {
                WriteOperation::Insert(value) => Ok(Some(value.clone())),
                WriteOperation::Remove => Ok(None),
            }
        } else {
            self.storage.get(key, column)
        }
    }
}

impl<C, S> KeyValueMutate for StorageTransaction<S>
where
    C: StorageColumn,
    S: KeyValueInspect<Column = C>,
{
    fn put(
        &mut self,
        key: &[u8],
        column: Self::Column,
        value: Value,
    ) -> StorageResult<()> {
        self.changes
            .entry(column.id())
            .or_default()
            .insert(key.to_vec(), WriteOperation::Insert(value));
        Ok(())
    }

    fn replace(
        &mut self,
        key: &[u8],
        column: Self::Column,
        value: Value,
    ) -> StorageResult<Option<Value>> {
        let previous = self
            .changes
            .entry(column.id())
            .or_default()
            .insert(key.to_vec(), WriteOperation::Insert(value));

        match previous {
            Some(WriteOperation::Insert(value)) => Ok(Some(value)),
            Some(WriteOperation::Remove) => Ok(None),
            None => self.storage.get(key, column),
        }
    }

    fn take(&mut self, key: &[u8], column: Self::Column) -> StorageResult<Option<Value>> {
        let previous = self
            .changes
            .entry(column.id())
            .or_default()
            .insert(key.to_vec(), WriteOperation::Remove);

        match previous {
            Some(WriteOperation::Insert(value)) => Ok(Some(value)),
            Some(WriteOperation::Remove) => Ok(None),
            None => self.storage.get(key, column),
        }
    }

    fn delete(&mut self, key: &[u8], column: Self::Column) -> StorageResult<()> {
        self.changes
            .entry(column.id())
            .or_default()
            .insert(key.to_vec(), WriteOperation::Remove);
        Ok(())
    }
}

impl<M, S> StorageInspect<M> for StorageTransaction<S>
where
    M: TableWithBlueprint,
    M::Blueprint: BlueprintInspect<M, Self>,
    S: KeyValueInspect<Column = Column>,
{
    type Error = StorageError;

    fn get(&self, key: &M::Key) -> StorageResult<Option<M::OwnedValue>> {
        <M as TableWithBlueprint>::Blueprint::get(self, key, M::column())
    }

    fn contains_key(&self, key: &M::Key) -> StorageResult<bool> {
        <M as TableWithBlueprint>::Blueprint::exists(self, key, M::column())
    }
}

impl<M, S> StorageMutate<M> for StorageTransaction<S>
where
    M: TableWithBlueprint,
    M::Blueprint: BlueprintMutate<M, Self>,
    S: KeyValueInspect<Column = Column>,
{
    fn replace(
        &mut self,
        key: &M::Key,
        value: &M::Value,
    ) -> StorageResult<Option<M::OwnedValue>> {
        <M as TableWithBlueprint>::Blueprint::replace(self, key, M::column(), value)
    }

    fn take(&mut self, key: &M::Key) -> StorageResult<Option<M::OwnedValue>> {
        <M as TableWithBlueprint>::Blueprint::take(self, key, M::column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        structured_storage::memory::InMemoryStorage,
        tables::Balances,
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
    };

    fn key(asset_id: &str, owner: &str) -> AccountKey {
        AccountKey::new(
            AssetId::new(asset_id).unwrap(),
            Owner::new(owner).unwrap(),
        )
    }

    fn record(asset_id: &str, owner: &str, amount: u64) -> AccountBalance {
        AccountBalance::new(
            AssetId::new(asset_id).unwrap(),
            Owner::new(owner).unwrap(),
            Amount::from(amount),
        )
    }

    #[test]
    fn uncommitted_changes_are_not_visible_in_the_storage() {
        let storage = InMemoryStorage::default();
        let mut transaction = storage.read_transaction();

        transaction
            .storage_as_mut::<Balances>()
            .insert(&key("gold", "alice"), &record("gold", "alice", 100))
            .unwrap();

        assert_eq!(storage, InMemoryStorage::default());
    }

    #[test]
    fn dropping_the_transaction_discards_the_changes() {
        let mut storage = InMemoryStorage::default();
        let mut transaction = storage.write_transaction();
        transaction
            .storage_as_mut::<Balances>()
            .insert(&key("gold", "alice"), &record("gold", "alice", 100))
            .unwrap();
        drop(transaction);

        assert_eq!(storage, InMemoryStorage::default());
    }

    #[test]
    fn committed_changes_are_visible_in_the_storage() {
        let mut storage = InMemoryStorage::default();
        let mut transaction = storage.write_transaction();

        transaction
            .storage_as_mut::<Balances>()
            .insert(&key("gold", "alice"), &record("gold", "alice", 100))
            .unwrap();
        transaction.commit().expect("Should commit the changes");

        let view = storage.read_transaction();
        assert_eq!(
            view.storage::<Balances>()
                .get(&key("gold", "alice"))
                .unwrap(),
            Some(record("gold", "alice", 100))
        );
    }

    #[test]
    fn reads_fall_through_to_the_snapshot_under_staged_writes() {
        let mut storage = InMemoryStorage::default();
        let mut setup = storage.write_transaction();
        setup
            .storage_as_mut::<Balances>()
            .insert(&key("gold", "alice"), &record("gold", "alice", 100))
            .unwrap();
        setup.commit().unwrap();

        let mut transaction = storage.read_transaction();
        assert_eq!(
            transaction
                .storage::<Balances>()
                .get(&key("gold", "alice"))
                .unwrap(),
            Some(record("gold", "alice", 100))
        );

        transaction
            .storage_as_mut::<Balances>()
            .remove(&key("gold", "alice"))
            .unwrap();
        assert_eq!(
            transaction
                .storage::<Balances>()
                .get(&key("gold", "alice"))
                .unwrap(),
            None
        );
    }

    #[test]
    fn nested_transaction_commits_into_the_parent() {
        let mut parent = InMemoryStorage::default().into_transaction();

        let mut nested = parent.read_transaction();
        nested
            .storage_as_mut::<Balances>()
            .insert(&key("gold", "alice"), &record("gold", "alice", 100))
            .unwrap();
        let changes = nested.into_changes();
        parent
            .commit_changes(changes)
            .expect("Should merge the nested changes");

        assert_eq!(
            parent
                .storage::<Balances>()
                .get(&key("gold", "alice"))
                .unwrap(),
            Some(record("gold", "alice", 100))
        );
    }

    #[test]
    fn conflict_policy_fail_rejects_overlapping_writes() {
        let storage = InMemoryStorage::default();
        let mut parent = storage
            .read_transaction()
            .with_policy(ConflictPolicy::Fail);

        let mut first = parent.read_transaction();
        first
            .storage_as_mut::<Balances>()
            .insert(&key("gold", "alice"), &record("gold", "alice", 100))
            .unwrap();
        parent.commit_changes(first.into_changes()).unwrap();

        let mut second = parent.read_transaction();
        second
            .storage_as_mut::<Balances>()
            .insert(&key("gold", "alice"), &record("gold", "alice", 50))
            .unwrap();
        let result = parent.commit_changes(second.into_changes());

        assert!(result.is_err());
    }
}
