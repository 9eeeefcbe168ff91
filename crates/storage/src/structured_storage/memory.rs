//! The in-memory implementation of the key-value store. It plays the role of
//! the platform state store in tests and standalone deployments.

use crate::{
    column::Column,
    kv_store::{
        KeyValueInspect,
        KeyValueMutate,
        StorageColumn,
        Value,
        WriteOperation,
    },
    transactional::{
        Changes,
        Modifiable,
    },
    Result as StorageResult,
};
use std::collections::BTreeMap;

/// The in-memory storage: one ordered map per column.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct InMemoryStorage {
    inner: [BTreeMap<Vec<u8>, Value>; Column::COUNT],
}

impl InMemoryStorage {
    /// The number of entries stored in the column.
    pub fn entries(&self, column: Column) -> usize {
        self.inner[column.as_usize()].len()
    }

    /// Iterates over the raw entries of the column in the key order.
    pub fn iter(
        &self,
        column: Column,
    ) -> impl Iterator<Item = (&Vec<u8>, &Value)> + '_ {
        self.inner[column.as_usize()].iter()
    }
}

impl KeyValueInspect for InMemoryStorage {
    type Column = Column;

    fn get(&self, key: &[u8], column: Self::Column) -> StorageResult<Option<Value>> {
        Ok(self.inner[column.as_usize()].get(key).cloned())
    }
}

impl KeyValueMutate for InMemoryStorage {
    fn put(
        &mut self,
        key: &[u8],
        column: Self::Column,
        value: Value,
    ) -> StorageResult<()> {
        self.inner[column.as_usize()].insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8], column: Self::Column) -> StorageResult<()> {
        self.inner[column.as_usize()].remove(key);
        Ok(())
    }
}

impl Modifiable for InMemoryStorage {
    fn commit_changes(&mut self, changes: Changes) -> StorageResult<()> {
        for (column, tree) in changes {
            let column = self
                .inner
                .get_mut(usize::try_from(column).map_err(anyhow::Error::from)?)
                .ok_or_else(|| anyhow::anyhow!("unknown column id `{column}`"))?;

            for (key, operation) in tree {
                match operation {
                    WriteOperation::Insert(value) => {
                        column.insert(key, value);
                    }
                    WriteOperation::Remove => {
                        column.remove(&key);
                    }
                }
            }
        }
        Ok(())
    }
}
