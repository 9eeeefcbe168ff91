//! The module contains implementations and tests for the `Balances` table.

use crate::{
    blueprint::plain::Plain,
    codec::{
        json::Json,
        postcard::Postcard,
    },
    column::Column,
    structured_storage::TableWithBlueprint,
    tables::Balances,
};

impl TableWithBlueprint for Balances {
    type Blueprint = Plain<Postcard, Json>;

    fn column() -> Column {
        Column::Balances
    }
}

#[cfg(test)]
mod test {
    use super::*;
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

    crate::basic_storage_tests!(
        Balances,
        AccountKey::new(
            AssetId::new("gold").unwrap(),
            Owner::new("alice").unwrap()
        ),
        AccountBalance::new(
            AssetId::new("gold").unwrap(),
            Owner::new("alice").unwrap(),
            Amount::from(100)
        )
    );
}
