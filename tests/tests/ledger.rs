//! End-to-end scenarios through the request boundary of the ledger.

use token_ledger_executor::{
    LedgerExecutor,
    Request,
};
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
    services::ledger::{
        Error,
        Response,
    },
};

fn owner(name: &str) -> Owner {
    Owner::new(name).unwrap()
}

fn asset(name: &str) -> AssetId {
    AssetId::new(name).unwrap()
}

fn request(caller: &str, method: &str, args: &[&str]) -> Request {
    Request::new(owner(caller), method, args.iter().copied())
}

fn balance(response: Response) -> AccountBalance {
    match response {
        Response::Balance(record) => record,
        response => panic!("Expected the balance response, got {response:?}"),
    }
}

#[test]
fn mint_transfer_burn_query_scenario() {
    let mut executor = LedgerExecutor::new(InMemoryStorage::default());

    // Mint 100 gold to alice.
    executor
        .execute_and_commit(&request("minter", "mint", &["gold", "100", "alice"]))
        .expect("Should mint 100 gold to alice");
    let record = balance(
        executor
            .execute_and_commit(&request("alice", "query", &["gold"]))
            .unwrap(),
    );
    assert_eq!(record.amount, Amount::from(100));

    // Alice sends half to bob.
    executor
        .execute_and_commit(&request("alice", "transfer", &["gold", "50", "bob"]))
        .expect("Should transfer 50 gold to bob");
    let alice = balance(
        executor
            .execute_and_commit(&request("alice", "query", &["gold"]))
            .unwrap(),
    );
    let bob = balance(
        executor
            .execute_and_commit(&request("bob", "query", &["gold"]))
            .unwrap(),
    );
    assert_eq!(alice.amount, Amount::from(50));
    assert_eq!(bob.amount, Amount::from(50));

    // Alice burns the rest of her balance; her record disappears.
    executor
        .execute_and_commit(&request("alice", "burn", &["gold", "50"]))
        .expect("Should burn the remaining 50 gold");
    let result = executor.execute_and_commit(&request("alice", "query", &["gold"]));
    assert!(matches!(result, Err(Error::AssetNotFound { .. })));

    // The remaining supply of gold belongs to bob.
    let bob = balance(
        executor
            .execute_and_commit(&request("bob", "query", &["gold"]))
            .unwrap(),
    );
    assert_eq!(bob.amount, Amount::from(50));
    assert_eq!(executor.database().entries(Column::Balances), 1);
}

#[test]
fn queries_are_symmetric_across_owners() {
    // Every owner's balance is visible through the same query path,
    // including recipients of transfers.
    let mut executor = LedgerExecutor::new(InMemoryStorage::default());
    executor
        .execute_and_commit(&request("minter", "mint", &["gold", "100", "alice"]))
        .unwrap();
    executor
        .execute_and_commit(&request("alice", "transfer", &["gold", "30", "bob"]))
        .unwrap();

    let bob = executor
        .query(&asset("gold"), &owner("bob"))
        .expect("The recipient's balance should be queryable");
    assert_eq!(bob.amount, Amount::from(30));
}

#[test]
fn records_survive_the_round_trip_through_committed_storage() {
    let mut executor = LedgerExecutor::new(InMemoryStorage::default());
    executor
        .execute_and_commit(&request("minter", "mint", &["gold", "100", "alice"]))
        .unwrap();

    let record = executor.query(&asset("gold"), &owner("alice")).unwrap();
    assert_eq!(
        record,
        AccountBalance::new(asset("gold"), owner("alice"), Amount::from(100))
    );

    // The persisted form is the stable JSON record.
    let (_, raw) = executor
        .database()
        .iter(Column::Balances)
        .next()
        .expect("One record should be persisted");
    let decoded: AccountBalance = serde_json::from_slice(raw.as_slice()).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn a_drained_account_is_indistinguishable_from_an_absent_one() {
    let mut executor = LedgerExecutor::new(InMemoryStorage::default());
    executor
        .execute_and_commit(&request("minter", "mint", &["gold", "10", "alice"]))
        .unwrap();
    executor
        .execute_and_commit(&request("alice", "burn", &["gold", "10"]))
        .unwrap();

    let drained = executor.query(&asset("gold"), &owner("alice"));
    let never_minted = executor.query(&asset("gold"), &owner("carol"));

    assert!(matches!(drained, Err(Error::AssetNotFound { .. })));
    assert!(matches!(never_minted, Err(Error::AssetNotFound { .. })));
}
