//! Property tests of the ledger invariants: conservation of supply,
//! non-negativity of balances, determinism of the write-sets, and atomicity
//! of failed operations.

use proptest::prelude::*;
use token_ledger_executor::LedgerExecutor;
use token_ledger_storage::{
    column::Column,
    structured_storage::memory::InMemoryStorage,
};
use token_ledger_types::{
    amount::Amount,
    entities::balance::AccountBalance,
    identifier::{
        AssetId,
        Owner,
    },
};

const OWNERS: [&str; 3] = ["alice", "bob", "carol"];

/// One randomly generated step of a ledger workload.
#[derive(Debug, Clone)]
enum Step {
    Mint { owner: usize, amount: u64 },
    Transfer { from: usize, to: usize, amount: u64 },
    Burn { owner: usize, amount: u64 },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..OWNERS.len(), 0u64..1_000).prop_map(|(owner, amount)| Step::Mint {
            owner,
            amount,
        }),
        (0..OWNERS.len(), 0..OWNERS.len(), 0u64..1_000).prop_map(
            |(from, to, amount)| Step::Transfer { from, to, amount }
        ),
        (0..OWNERS.len(), 0u64..1_000).prop_map(|(owner, amount)| Step::Burn {
            owner,
            amount,
        }),
    ]
}

fn owner(index: usize) -> Owner {
    Owner::new(OWNERS[index]).unwrap()
}

fn asset() -> AssetId {
    AssetId::new("gold").unwrap()
}

/// Applies the step, committing on success and ignoring rejected steps.
/// Returns the applied supply delta.
fn apply(executor: &mut LedgerExecutor<InMemoryStorage>, step: &Step) -> i128 {
    match step {
        Step::Mint { owner: index, amount } => {
            let uncommitted = executor.mint(&asset(), &owner(*index), Amount::from(*amount));
            match uncommitted {
                Ok(uncommitted) => {
                    executor.commit_changes(uncommitted.into_changes()).unwrap();
                    i128::from(*amount)
                }
                Err(_) => 0,
            }
        }
        Step::Transfer { from, to, amount } => {
            let uncommitted = executor.transfer(
                &asset(),
                &owner(*from),
                &owner(*to),
                Amount::from(*amount),
            );
            match uncommitted {
                Ok(uncommitted) => {
                    executor.commit_changes(uncommitted.into_changes()).unwrap();
                    0
                }
                Err(_) => 0,
            }
        }
        Step::Burn { owner: index, amount } => {
            let uncommitted =
                executor.burn(&asset(), &owner(*index), Amount::from(*amount));
            match uncommitted {
                Ok(uncommitted) => {
                    executor.commit_changes(uncommitted.into_changes()).unwrap();
                    -i128::from(*amount)
                }
                Err(_) => 0,
            }
        }
    }
}

/// Decodes every persisted record of the balances column.
fn records(storage: &InMemoryStorage) -> Vec<AccountBalance> {
    storage
        .iter(Column::Balances)
        .map(|(_, value)| serde_json::from_slice(value.as_slice()).unwrap())
        .collect()
}

proptest! {
    #[test]
    fn supply_changes_only_through_mint_and_burn(
        steps in proptest::collection::vec(step_strategy(), 1..60),
    ) {
        let mut executor = LedgerExecutor::new(InMemoryStorage::default());

        let mut expected_supply: i128 = 0;
        for step in &steps {
            expected_supply = expected_supply
                .checked_add(apply(&mut executor, step))
                .unwrap();
        }

        let total: i128 = records(executor.database())
            .iter()
            .map(|record| i128::from(record.amount.as_u64()))
            .sum();
        prop_assert_eq!(total, expected_supply);
    }

    #[test]
    fn present_records_always_hold_a_positive_amount(
        steps in proptest::collection::vec(step_strategy(), 1..60),
    ) {
        let mut executor = LedgerExecutor::new(InMemoryStorage::default());
        for step in &steps {
            apply(&mut executor, step);
        }

        for record in records(executor.database()) {
            prop_assert!(!record.amount.is_zero());
        }
    }

    #[test]
    fn replaying_a_workload_reproduces_the_same_state(
        steps in proptest::collection::vec(step_strategy(), 1..60),
    ) {
        let mut first = LedgerExecutor::new(InMemoryStorage::default());
        let mut second = LedgerExecutor::new(InMemoryStorage::default());

        for step in &steps {
            apply(&mut first, step);
            apply(&mut second, step);
        }

        prop_assert_eq!(first.database(), second.database());
    }

    #[test]
    fn rejected_debits_leave_the_state_untouched(
        minted in 0u64..100,
        requested in 101u64..200,
    ) {
        let mut executor = LedgerExecutor::new(InMemoryStorage::default());
        let uncommitted = executor
            .mint(&asset(), &owner(0), Amount::from(minted))
            .unwrap();
        executor.commit_changes(uncommitted.into_changes()).unwrap();
        let before = executor.database().clone();

        let transfer = executor.transfer(
            &asset(),
            &owner(0),
            &owner(1),
            Amount::from(requested),
        );
        let burn = executor.burn(&asset(), &owner(0), Amount::from(requested));

        prop_assert!(transfer.is_err());
        prop_assert!(burn.is_err());
        prop_assert_eq!(executor.database(), &before);
    }
}
