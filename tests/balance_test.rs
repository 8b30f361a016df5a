//! Balance recalculation integration tests.

mod common;

use bookkeeping_core::error::LedgerError;
use bookkeeping_core::models::{AccountType, EntryReference, PostLine};
use common::{create_test_account, dec, spawn_ledger, stored_balance, test_date, TestLedger};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Post a plain two-line entry: debit one account, credit another.
async fn post_simple(ledger: &TestLedger, debit_id: Uuid, credit_id: Uuid, amount: &str) {
    ledger
        .poster
        .post_entry(
            "Posting",
            test_date(),
            EntryReference::Manual,
            &[
                PostLine::debit(debit_id, dec(amount)),
                PostLine::credit(credit_id, dec(amount)),
            ],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn balance_reflects_normal_side_of_each_account_type() {
    let ledger = spawn_ledger().await;

    let asset = create_test_account(&ledger.db, "1-1100", "Cash", AccountType::Asset).await;
    let liability =
        create_test_account(&ledger.db, "3-1000", "Bank Loan", AccountType::Liability).await;
    let equity =
        create_test_account(&ledger.db, "4-1000", "Owner Equity", AccountType::Equity).await;
    let revenue =
        create_test_account(&ledger.db, "2-1300", "Rental Income", AccountType::Revenue).await;
    let expense =
        create_test_account(&ledger.db, "5-2000", "Maintenance", AccountType::Expense).await;

    // Owner investment, sales, an expense payment, and a loan.
    post_simple(&ledger, asset.account_id, equity.account_id, "1000.00").await;
    post_simple(&ledger, asset.account_id, revenue.account_id, "500.00").await;
    post_simple(&ledger, expense.account_id, asset.account_id, "200.00").await;
    post_simple(&ledger, asset.account_id, liability.account_id, "300.00").await;

    // Asset: +1000 +500 -200 +300 (debits increase, credits decrease).
    assert_eq!(
        stored_balance(&ledger.db, asset.account_id).await,
        dec("1600.00")
    );
    // Credit-normal accounts grow with credits.
    assert_eq!(
        stored_balance(&ledger.db, equity.account_id).await,
        dec("1000.00")
    );
    assert_eq!(
        stored_balance(&ledger.db, revenue.account_id).await,
        dec("500.00")
    );
    assert_eq!(
        stored_balance(&ledger.db, liability.account_id).await,
        dec("300.00")
    );
    // Expense is debit-normal.
    assert_eq!(
        stored_balance(&ledger.db, expense.account_id).await,
        dec("200.00")
    );

    // Accounting equation: assets = liabilities + equity + (revenue - expense).
    // 1600 = 300 + 1000 + (500 - 200)
}

#[tokio::test]
async fn recalculate_is_idempotent() {
    let ledger = spawn_ledger().await;

    let cash = create_test_account(&ledger.db, "1-1100", "Cash", AccountType::Asset).await;
    let revenue =
        create_test_account(&ledger.db, "2-1300", "Rental Income", AccountType::Revenue).await;

    ledger
        .poster
        .post_entry(
            "Sale",
            test_date(),
            EntryReference::Manual,
            &[
                PostLine::debit(cash.account_id, dec("75.00")),
                PostLine::credit(revenue.account_id, dec("75.00")),
            ],
        )
        .await
        .unwrap();

    let recalculator = ledger.poster.recalculator();
    recalculator.recalculate(cash.account_id).await.unwrap();
    let first = stored_balance(&ledger.db, cash.account_id).await;
    recalculator.recalculate(cash.account_id).await.unwrap();
    let second = stored_balance(&ledger.db, cash.account_id).await;

    assert_eq!(first, dec("75.00"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn recalculate_missing_account_reports_not_found() {
    let ledger = spawn_ledger().await;

    let missing = Uuid::new_v4();
    let result = ledger.poster.recalculator().recalculate(missing).await;
    assert!(matches!(result, Err(LedgerError::AccountNotFound(id)) if id == missing));
}

#[tokio::test]
async fn account_with_no_lines_recalculates_to_zero() {
    let ledger = spawn_ledger().await;

    let cash = create_test_account(&ledger.db, "1-1100", "Cash", AccountType::Asset).await;
    ledger
        .poster
        .recalculator()
        .recalculate(cash.account_id)
        .await
        .unwrap();

    assert_eq!(stored_balance(&ledger.db, cash.account_id).await, Decimal::ZERO);
}

#[tokio::test]
async fn voided_entries_are_excluded_from_derivation() {
    let ledger = spawn_ledger().await;

    let cash = create_test_account(&ledger.db, "1-1100", "Cash", AccountType::Asset).await;
    let revenue =
        create_test_account(&ledger.db, "2-1300", "Rental Income", AccountType::Revenue).await;

    let kept = ledger
        .poster
        .post_entry(
            "Kept",
            test_date(),
            EntryReference::Manual,
            &[
                PostLine::debit(cash.account_id, dec("30.00")),
                PostLine::credit(revenue.account_id, dec("30.00")),
            ],
        )
        .await
        .unwrap();
    let voided = ledger
        .poster
        .post_entry(
            "Voided",
            test_date(),
            EntryReference::Manual,
            &[
                PostLine::debit(cash.account_id, dec("99.00")),
                PostLine::credit(revenue.account_id, dec("99.00")),
            ],
        )
        .await
        .unwrap();

    ledger.poster.void_entry(voided.entry.entry_id).await.unwrap();

    assert_eq!(stored_balance(&ledger.db, cash.account_id).await, dec("30.00"));
    assert!(ledger.db.get_entry(kept.entry.entry_id).await.unwrap().is_some());
}

#[tokio::test]
async fn recalculate_all_sweeps_every_account() {
    let ledger = spawn_ledger().await;

    let cash = create_test_account(&ledger.db, "1-1100", "Cash", AccountType::Asset).await;
    let revenue =
        create_test_account(&ledger.db, "2-1300", "Rental Income", AccountType::Revenue).await;
    let expense =
        create_test_account(&ledger.db, "5-2000", "Maintenance", AccountType::Expense).await;

    ledger
        .poster
        .post_entry(
            "Sale",
            test_date(),
            EntryReference::Manual,
            &[
                PostLine::debit(cash.account_id, dec("120.00")),
                PostLine::credit(revenue.account_id, dec("120.00")),
            ],
        )
        .await
        .unwrap();

    let refreshed = ledger
        .poster
        .recalculator()
        .recalculate_all()
        .await
        .unwrap();

    assert_eq!(refreshed, 3);
    assert_eq!(stored_balance(&ledger.db, cash.account_id).await, dec("120.00"));
    assert_eq!(
        stored_balance(&ledger.db, revenue.account_id).await,
        dec("120.00")
    );
    assert_eq!(
        stored_balance(&ledger.db, expense.account_id).await,
        Decimal::ZERO
    );
}
