//! Types for the ledger service boundary.

pub mod ledger;

/// The uncommitted `Result` of some action together with the staged state
/// changes. The caller commits the changes by itself, or drops them to leave
/// the world state untouched.
#[derive(Debug)]
pub struct Uncommitted<Result, Changes> {
    /// The result of the action.
    result: Result,
    /// The not yet committed state changes.
    changes: Changes,
}

impl<Result, Changes> Uncommitted<Result, Changes> {
    /// Create a new instance of `Uncommitted`.
    pub fn new(result: Result, changes: Changes) -> Self {
        Self { result, changes }
    }

    /// Returns a reference to the `Result`.
    pub fn result(&self) -> &Result {
        &self.result
    }

    /// Return the result and the staged changes.
    pub fn into(self) -> (Result, Changes) {
        (self.result, self.changes)
    }

    /// Discards the staged changes and returns only the result of the action.
    pub fn into_result(self) -> Result {
        self.result
    }

    /// Discards the result and returns the staged changes.
    pub fn into_changes(self) -> Changes {
        self.changes
    }
}
