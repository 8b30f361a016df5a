//! Common test utilities for bookkeeping-core integration tests.

#![allow(dead_code)]

use bookkeeping_core::config::default_category_accounts;
use bookkeeping_core::models::{
    Account, AccountType, CreateAccount, FinanceAccount, FinanceTransaction, TransactionKind,
};
use bookkeeping_core::services::{CategoryResolver, Database, JournalPoster, TransactionSync};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Once;
use tempfile::TempDir;
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,bookkeeping_core=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A fully wired engine over a throwaway database file.
pub struct TestLedger {
    pub db: Database,
    pub poster: JournalPoster,
    pub resolver: CategoryResolver,
    pub sync: TransactionSync,
    _dir: TempDir,
}

/// Spawn the engine against a fresh migrated database.
pub async fn spawn_ledger() -> TestLedger {
    init_tracing();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let database_url = format!("sqlite://{}/ledger.db", dir.path().display());

    let db = Database::new(&database_url, 4, 1)
        .await
        .expect("Failed to open database");
    db.run_migrations().await.expect("Failed to run migrations");

    let poster = JournalPoster::new(db.clone());
    let resolver = CategoryResolver::new(db.clone(), default_category_accounts());
    let sync = TransactionSync::new(db.clone(), resolver.clone(), poster.clone());

    TestLedger {
        db,
        poster,
        resolver,
        sync,
        _dir: dir,
    }
}

/// Helper to create an account for testing.
pub async fn create_test_account(
    db: &Database,
    code: &str,
    name: &str,
    account_type: AccountType,
) -> Account {
    db.create_account(&CreateAccount {
        code: code.to_string(),
        name: name.to_string(),
        account_type,
    })
    .await
    .expect("Failed to create account")
}

/// Parse a decimal literal.
pub fn dec(s: &str) -> Decimal {
    s.parse().expect("Invalid decimal literal")
}

/// Business date used by the test fixtures.
pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date")
}

/// Read an account's stored (derived) balance.
pub async fn stored_balance(db: &Database, account_id: Uuid) -> Decimal {
    db.get_account(account_id)
        .await
        .expect("Failed to get account")
        .expect("Account missing")
        .current_balance()
}

/// A finance account named like an operational bank account.
pub fn finance_account(name: &str, linked_account_id: Option<Uuid>) -> FinanceAccount {
    FinanceAccount {
        finance_account_id: Uuid::new_v4(),
        name: name.to_string(),
        linked_account_id,
    }
}

pub fn income_transaction(
    amount: Decimal,
    category: &str,
    account: FinanceAccount,
) -> FinanceTransaction {
    FinanceTransaction {
        transaction_id: Uuid::new_v4(),
        kind: TransactionKind::Income,
        amount,
        date: test_date(),
        category: category.to_string(),
        finance_account: account,
        counterparty: None,
    }
}

pub fn expense_transaction(
    amount: Decimal,
    category: &str,
    account: FinanceAccount,
) -> FinanceTransaction {
    FinanceTransaction {
        transaction_id: Uuid::new_v4(),
        kind: TransactionKind::Expense,
        amount,
        date: test_date(),
        category: category.to_string(),
        finance_account: account,
        counterparty: None,
    }
}

pub fn transfer_transaction(
    amount: Decimal,
    from: FinanceAccount,
    to: Option<FinanceAccount>,
) -> FinanceTransaction {
    FinanceTransaction {
        transaction_id: Uuid::new_v4(),
        kind: TransactionKind::Transfer,
        amount,
        date: test_date(),
        category: String::new(),
        finance_account: from,
        counterparty: to,
    }
}
