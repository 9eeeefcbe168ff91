//! The ports the ledger executor requires from the platform.

use token_ledger_storage::{
    column::Column,
    kv_store::KeyValueInspect,
};

/// The storage requirements of the ledger executor: columnar read access to
/// the snapshot of the world state the invocation executes against. Writes
/// never reach the snapshot directly; they are staged by the executor and
/// committed by the platform.
pub trait LedgerDatabase: KeyValueInspect<Column = Column> {}

impl<T> LedgerDatabase for T where T: KeyValueInspect<Column = Column> {}
