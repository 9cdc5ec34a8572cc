//! Scenario tests for the transfer guard
//!
//! Walks the reference transfer scenarios (limits 10000 per transfer,
//! 25000 per day) through every access layer: plain account, shared
//! handle, actor and registry.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use transfer_guard::{
    spawn_account_actor, Account, AccountId, AccountRegistry, Error, Metrics, SharedAccount,
    TransferError, TransferLimits,
};

/// Limits that admit a single 15000 transfer, keeping the 25000 daily cap
fn wide_transaction_limits() -> TransferLimits {
    TransferLimits::new(dec!(15000), dec!(25000)).unwrap()
}

#[test]
fn test_scenario_valid_transfer() {
    let mut account = Account::new(dec!(30000)).unwrap();

    assert_eq!(account.transfer(dec!(5000)), Ok(()));
    assert_eq!(account.balance(), dec!(25000));
    assert_eq!(account.daily_transferred(), dec!(5000));
}

#[test]
fn test_scenario_exceeds_transaction_limit() {
    let mut account = Account::new(dec!(50000)).unwrap();

    let err = account.transfer(dec!(15000)).unwrap_err();
    assert!(err.to_string().contains("per-transaction limit"));
    assert_eq!(account.balance(), dec!(50000));
}

#[test]
fn test_scenario_exceeds_daily_limit() {
    let mut account = Account::with_limits(dec!(50000), wide_transaction_limits()).unwrap();
    account.transfer(dec!(15000)).unwrap();

    let err = account.transfer(dec!(11000)).unwrap_err();
    assert!(err.to_string().contains("daily transfer limit"));
    assert_eq!(account.balance(), dec!(35000));
    assert_eq!(account.daily_transferred(), dec!(15000));
}

#[test]
fn test_scenario_exceeds_daily_limit_with_default_limits() {
    // Under the default policy the opening 15000 is itself rejected, so the
    // daily ceiling is reached with transfers that each fit.
    let mut account = Account::new(dec!(50000)).unwrap();
    assert!(matches!(
        account.transfer(dec!(15000)),
        Err(TransferError::TransactionLimitExceeded { .. })
    ));

    account.transfer(dec!(10000)).unwrap();
    account.transfer(dec!(10000)).unwrap();
    let err = account.transfer(dec!(6000)).unwrap_err();
    assert!(err.to_string().contains("daily transfer limit"));
    assert_eq!(account.balance(), dec!(30000));
    assert_eq!(account.daily_transferred(), dec!(20000));
}

#[test]
fn test_scenario_insufficient_funds() {
    let mut account = Account::new(dec!(5000)).unwrap();

    let err = account.transfer(dec!(6000)).unwrap_err();
    assert!(err.to_string().contains("Insufficient funds"));
    assert_eq!(account.balance(), dec!(5000));
}

#[test]
fn test_repeated_failure_is_stable() {
    let mut account = Account::new(dec!(5000)).unwrap();
    let first = account.transfer(dec!(6000)).unwrap_err();

    for _ in 0..5 {
        assert_eq!(account.transfer(dec!(6000)).unwrap_err(), first);
        assert_eq!(account.balance(), dec!(5000));
        assert_eq!(account.daily_transferred(), Decimal::ZERO);
    }
}

#[test]
fn test_shared_account_across_threads() {
    let shared = SharedAccount::new(Account::new(dec!(12000)).unwrap());

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            std::thread::spawn(move || {
                (0..10)
                    .map(|_| shared.transfer(dec!(1000)))
                    .filter(Result::is_ok)
                    .count()
            })
        })
        .collect();
    let accepted: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();

    // Balance runs out before the daily limit
    assert_eq!(accepted, 12);
    let snapshot = shared.snapshot();
    assert_eq!(snapshot.balance, Decimal::ZERO);
    assert_eq!(snapshot.daily_transferred, dec!(12000));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_actor_serializes_concurrent_callers() {
    let metrics = Metrics::new().unwrap();
    let handle = spawn_account_actor(
        Account::new(dec!(100000)).unwrap(),
        8,
        50,
        Some(metrics.clone()),
    );

    let mut tasks = Vec::new();
    for _ in 0..40 {
        let handle = handle.clone();
        tasks.push(tokio::spawn(async move { handle.transfer(dec!(1000)).await }));
    }

    let mut accepted = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(e) => assert!(matches!(
                e.as_transfer(),
                Some(TransferError::DailyLimitExceeded { .. })
            )),
        }
    }

    assert_eq!(accepted, 25);
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.daily_transferred, dec!(25000));
    assert_eq!(snapshot.balance, dec!(75000));
    assert_eq!(metrics.outcome_count("ok"), 25);
    assert_eq!(metrics.outcome_count("daily_limit"), 15);

    let recent = handle.recent_transfers().await.unwrap();
    assert_eq!(recent.len(), 25);
    assert_eq!(
        recent.last().map(|r| r.after.daily_transferred),
        Some(dec!(25000))
    );

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_actor_after_shutdown_reports_concurrency_error() {
    let handle = spawn_account_actor(Account::new(dec!(100)).unwrap(), 1, 20, None);
    handle.shutdown().await.unwrap();

    let result = handle.transfer(dec!(1)).await;
    assert!(matches!(result, Err(Error::Concurrency(_))));
}

#[test]
fn test_registry_accounts_are_isolated() {
    let registry = AccountRegistry::new();
    let alice = AccountId::new("ALICE");
    let bob = AccountId::new("BOB");
    registry
        .open(alice.clone(), dec!(50000), wide_transaction_limits())
        .unwrap();
    registry
        .open(bob.clone(), dec!(50000), TransferLimits::default())
        .unwrap();

    registry.transfer(&alice, dec!(15000)).unwrap();
    let err = registry.transfer(&bob, dec!(15000)).unwrap_err();
    assert!(matches!(
        err.as_transfer(),
        Some(TransferError::TransactionLimitExceeded { .. })
    ));

    let alice_state = registry.get(&alice).unwrap().snapshot();
    let bob_state = registry.get(&bob).unwrap().snapshot();
    assert_eq!(alice_state.balance, dec!(35000));
    assert_eq!(bob_state.balance, dec!(50000));
    assert_eq!(bob_state.daily_transferred, Decimal::ZERO);
}
