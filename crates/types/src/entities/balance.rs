//! The account balance entity.

use crate::{
    amount::Amount,
    identifier::{
        AssetId,
        Owner,
    },
};
use serde::{
    Deserialize,
    Serialize,
};

/// The persisted balance record of one `(asset, owner)` account.
///
/// A stored record always carries `amount > 0`: a debit that reaches zero
/// removes the record instead of keeping it, so an absent record and a zero
/// balance are indistinguishable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The asset class the balance belongs to.
    #[serde(rename = "assetID")]
    pub asset_id: AssetId,
    /// The account holding the balance.
    pub owner: Owner,
    /// The number of tokens held by the account.
    pub amount: Amount,
}

impl AccountBalance {
    /// Creates the balance record of the given account.
    pub fn new(asset_id: AssetId, owner: Owner, amount: Amount) -> Self {
        Self {
            asset_id,
            owner,
            amount,
        }
    }

    /// The storage identity of the record.
    pub fn key(&self) -> AccountKey {
        AccountKey::new(self.asset_id.clone(), self.owner.clone())
    }
}

/// The unique identity of an [`AccountBalance`]: the `(asset, owner)` pair.
///
/// The storage layer owns the conversion of the key into bytes; no other
/// component constructs storage keys.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
pub struct AccountKey {
    asset_id: AssetId,
    owner: Owner,
}

impl AccountKey {
    /// Creates the key of the given account.
    pub fn new(asset_id: AssetId, owner: Owner) -> Self {
        Self { asset_id, owner }
    }

    /// The asset component of the key.
    pub fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    /// The owner component of the key.
    pub fn owner(&self) -> &Owner {
        &self.owner
    }
}
