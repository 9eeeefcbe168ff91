//! The module contains the [`StructuredStorage`] wrapper around the
//! key-value storage that implements the storage traits for the tables with
//! blueprint.

use crate::{
    blueprint::{
        BlueprintInspect,
        BlueprintMutate,
    },
    column::Column,
    kv_store::{
        KeyValueInspect,
        KeyValueMutate,
    },
    Error as StorageError,
    Mappable,
    Result as StorageResult,
    StorageInspect,
    StorageMutate,
};

pub mod balances;
pub mod memory;

/// The table can implement this trait to indicate that it has a blueprint.
/// It inherits the default implementation of the storage traits through the
/// [`StructuredStorage`] for the table.
pub trait TableWithBlueprint: Mappable + Sized {
    /// The type of the blueprint used by the table.
    type Blueprint;

    /// The column occupied by the table.
    fn column() -> Column;
}

/// The wrapper around the key-value storage that implements the storage
/// traits for the tables with blueprint.
#[derive(Clone, Debug)]
pub struct StructuredStorage<S> {
    storage: S,
}

impl<S> StructuredStorage<S> {
    /// Creates a new instance of the structured storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the underlying storage.
    pub fn into_inner(self) -> S {
        self.storage
    }
}

impl<S> AsRef<S> for StructuredStorage<S> {
    fn as_ref(&self) -> &S {
        &self.storage
    }
}

impl<S> AsMut<S> for StructuredStorage<S> {
    fn as_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

impl<S, M> StorageInspect<M> for StructuredStorage<S>
where
    S: KeyValueInspect<Column = Column>,
    M: TableWithBlueprint,
    M::Blueprint: BlueprintInspect<M, S>,
{
    type Error = StorageError;

    fn get(&self, key: &M::Key) -> StorageResult<Option<M::OwnedValue>> {
        <M as TableWithBlueprint>::Blueprint::get(&self.storage, key, M::column())
    }

    fn contains_key(&self, key: &M::Key) -> StorageResult<bool> {
        <M as TableWithBlueprint>::Blueprint::exists(&self.storage, key, M::column())
    }
}

impl<S, M> StorageMutate<M> for StructuredStorage<S>
where
    S: KeyValueMutate<Column = Column>,
    M: TableWithBlueprint,
    M::Blueprint: BlueprintMutate<M, S>,
{
    fn replace(
        &mut self,
        key: &M::Key,
        value: &M::Value,
    ) -> StorageResult<Option<M::OwnedValue>> {
        <M as TableWithBlueprint>::Blueprint::replace(
            &mut self.storage,
            key,
            M::column(),
            value,
        )
    }

    fn take(&mut self, key: &M::Key) -> StorageResult<Option<M::OwnedValue>> {
        <M as TableWithBlueprint>::Blueprint::take(&mut self.storage, key, M::column())
    }
}
