//! The crate `token-ledger-storage` contains the storage types and primitives
//! used by the token ledger: [`Mappable`] tables over a columnar key-value
//! store, codecs for keys and records, and transactional staging of changes
//! that commit into the underlying store as an atomic group.
//! The crate doesn't contain a durable storage implementation. It works
//! around the platform state store and provides an in-memory reference
//! implementation for tests and standalone deployments.

#![deny(clippy::arithmetic_side_effects)]
#![deny(clippy::cast_possible_truncation)]
#![deny(unused_crate_dependencies)]
#![deny(missing_docs)]
#![deny(warnings)]

pub mod blueprint;
pub mod codec;
pub mod column;
pub mod kv_store;
pub mod structured_storage;
pub mod tables;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;
pub mod transactional;

#[doc(hidden)]
pub use paste;

// The self dev-dependency enables the `test-helpers` feature during `cargo
// test` so the `basic_storage_tests!` macro is in scope; `test_case` is pulled
// in as a workspace dev-dependency. Neither is referenced by path, so silence
// the `unused_crate_dependencies` lint.
#[cfg(test)]
extern crate test_case as _;
#[cfg(test)]
use token_ledger_storage as _;

use token_ledger_types::services::ledger::Error as LedgerError;

/// The storage result alias.
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, derive_more::Display, derive_more::From)]
#[non_exhaustive]
/// Error occurring during interaction with storage
pub enum Error {
    /// Error occurred during serialization or deserialization of the entity.
    #[display(fmt = "error performing serialization or deserialization `{_0}`")]
    Codec(anyhow::Error),
    /// Error occurred during interaction with the underlying store.
    #[display(fmt = "error occurred in the underlying datastore `{_0:?}`")]
    DatabaseError(Box<dyn core::fmt::Debug + Send + Sync>),
    /// Unknown or not expected(by architecture) error.
    #[from]
    Other(anyhow::Error),
}

impl From<Error> for anyhow::Error {
    fn from(error: Error) -> Self {
        anyhow::Error::msg(error)
    }
}

impl From<Error> for LedgerError {
    fn from(e: Error) -> Self {
        LedgerError::StoreUnavailable(e.to_string())
    }
}

/// The definition of the table in the storage: the types of its key and the
/// stored value.
pub trait Mappable {
    /// The key used to address a value in the table.
    type Key: ?Sized;
    /// The owned variant of the key, produced by decoding.
    type OwnedKey: Clone;
    /// The value stored in the table.
    type Value: ?Sized;
    /// The owned variant of the value, produced by decoding.
    type OwnedValue: Clone;
}

/// Base storage trait for reading a [`Mappable`] table.
pub trait StorageInspect<Type: Mappable> {
    /// The error type returned by the storage.
    type Error;

    /// Retrieves the value associated with the key, if any.
    fn get(
        &self,
        key: &Type::Key,
    ) -> core::result::Result<Option<Type::OwnedValue>, Self::Error>;

    /// Returns `true` if a value is associated with the key.
    fn contains_key(
        &self,
        key: &Type::Key,
    ) -> core::result::Result<bool, Self::Error>;
}

/// Base storage trait for mutating a [`Mappable`] table.
pub trait StorageMutate<Type: Mappable>: StorageInspect<Type> {
    /// Inserts the key-value pair into the storage.
    fn insert(
        &mut self,
        key: &Type::Key,
        value: &Type::Value,
    ) -> core::result::Result<(), Self::Error> {
        self.replace(key, value).map(|_| ())
    }

    /// Inserts the key-value pair into the storage and returns the replaced
    /// value, if any.
    fn replace(
        &mut self,
        key: &Type::Key,
        value: &Type::Value,
    ) -> core::result::Result<Option<Type::OwnedValue>, Self::Error>;

    /// Removes the value associated with the key.
    fn remove(&mut self, key: &Type::Key) -> core::result::Result<(), Self::Error> {
        self.take(key).map(|_| ())
    }

    /// Removes the value associated with the key and returns it, if it
    /// existed.
    fn take(
        &mut self,
        key: &Type::Key,
    ) -> core::result::Result<Option<Type::OwnedValue>, Self::Error>;
}

/// The wrapper around the storage that provides the read-only view of a
/// single [`Mappable`] table.
pub struct StorageRef<'a, T: 'a + ?Sized, Type: Mappable>(
    &'a T,
    core::marker::PhantomData<Type>,
);

/// Helper trait for accessing a read-only typed view of the storage.
pub trait StorageAsRef {
    /// Returns the read-only view of the `Type` table.
    #[inline(always)]
    fn storage<Type>(&self) -> StorageRef<'_, Self, Type>
    where
        Type: Mappable,
    {
        self.storage_as_ref()
    }

    /// Returns the read-only view of the `Type` table.
    #[inline(always)]
    fn storage_as_ref<Type>(&self) -> StorageRef<'_, Self, Type>
    where
        Type: Mappable,
    {
        StorageRef(self, Default::default())
    }
}

impl<T> StorageAsRef for T {}

impl<'a, T, Type> StorageRef<'a, T, Type>
where
    T: StorageInspect<Type> + ?Sized,
    Type: Mappable,
{
    /// Retrieves the value associated with the key, if any.
    pub fn get(
        &self,
        key: &Type::Key,
    ) -> core::result::Result<Option<Type::OwnedValue>, T::Error> {
        self.0.get(key)
    }

    /// Returns `true` if a value is associated with the key.
    pub fn contains_key(
        &self,
        key: &Type::Key,
    ) -> core::result::Result<bool, T::Error> {
        self.0.contains_key(key)
    }
}

/// The wrapper around the storage that provides the mutable view of a single
/// [`Mappable`] table.
pub struct StorageMut<'a, T: 'a + ?Sized, Type: Mappable>(
    &'a mut T,
    core::marker::PhantomData<Type>,
);

/// Helper trait for accessing a mutable typed view of the storage.
pub trait StorageAsMut {
    /// Returns the mutable view of the `Type` table.
    #[inline(always)]
    fn storage<Type>(&mut self) -> StorageMut<'_, Self, Type>
    where
        Type: Mappable,
    {
        self.storage_as_mut()
    }

    /// Returns the mutable view of the `Type` table.
    #[inline(always)]
    fn storage_as_mut<Type>(&mut self) -> StorageMut<'_, Self, Type>
    where
        Type: Mappable,
    {
        StorageMut(self, Default::default())
    }
}

impl<T> StorageAsMut for T {}

impl<'a, T, Type> StorageMut<'a, T, Type>
where
    T: StorageInspect<Type> + ?Sized,
    Type: Mappable,
{
    /// Retrieves the value associated with the key, if any.
    pub fn get(
        &self,
        key: &Type::Key,
    ) -> core::result::Result<Option<Type::OwnedValue>, T::Error> {
        self.0.get(key)
    }

    /// Returns `true` if a value is associated with the key.
    pub fn contains_key(
        &self,
        key: &Type::Key,
    ) -> core::result::Result<bool, T::Error> {
        self.0.contains_key(key)
    }
}

impl<'a, T, Type> StorageMut<'a, T, Type>
where
    T: StorageMutate<Type> + ?Sized,
    Type: Mappable,
{
    /// Inserts the key-value pair into the storage.
    pub fn insert(
        &mut self,
        key: &Type::Key,
        value: &Type::Value,
    ) -> core::result::Result<(), T::Error> {
        self.0.insert(key, value)
    }

    /// Inserts the key-value pair into the storage and returns the replaced
    /// value, if any.
    pub fn replace(
        &mut self,
        key: &Type::Key,
        value: &Type::Value,
    ) -> core::result::Result<Option<Type::OwnedValue>, T::Error> {
        self.0.replace(key, value)
    }

    /// Removes the value associated with the key.
    pub fn remove(&mut self, key: &Type::Key) -> core::result::Result<(), T::Error> {
        self.0.remove(key)
    }

    /// Removes the value associated with the key and returns it, if it
    /// existed.
    pub fn take(
        &mut self,
        key: &Type::Key,
    ) -> core::result::Result<Option<Type::OwnedValue>, T::Error> {
        self.0.take(key)
    }
}
