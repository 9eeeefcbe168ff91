//! The module to help with tests.
#![allow(missing_docs)]

use crate::{
    column::Column,
    kv_store::{
        KeyValueInspect,
        Value,
    },
    Result as StorageResult,
};

mockall::mock! {
    /// The mocked key-value storage. Useful to simulate an unavailable state
    /// store.
    pub Storage {}

    impl KeyValueInspect for Storage {
        type Column = Column;

        fn exists(&self, key: &[u8], column: Column) -> StorageResult<bool>;

        fn get(&self, key: &[u8], column: Column) -> StorageResult<Option<Value>>;
    }
}
