//! Error taxonomy for the bookkeeping engine.
//!
//! Validation failures are rejected at the call boundary before any write and
//! carry the concrete values that violated the invariant, so an operator can
//! correct the input and retry.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("unbalanced entry: debits ({debits}) != credits ({credits}), off by {difference}")]
    UnbalancedEntry {
        debits: Decimal,
        credits: Decimal,
        difference: Decimal,
    },

    #[error("journal entry must have at least 2 lines, got {0}")]
    TooFewLines(usize),

    #[error("line {index} for account {account_id} must have exactly one of debit or credit set")]
    MalformedLine { index: usize, account_id: Uuid },

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("account with code '{0}' already exists")]
    DuplicateCode(String),

    #[error("account {0} not found")]
    AccountNotFound(Uuid),

    #[error("account {0} is closed and cannot accept postings")]
    AccountClosed(Uuid),

    #[error("account {0} is referenced by journal lines and cannot be deleted")]
    AccountInUse(Uuid),

    #[error("journal entry {0} not found")]
    EntryNotFound(Uuid),

    #[error("finance account '{0}' has no linked ledger account")]
    MissingLedgerLink(String),

    #[error("transfer transaction {0} has no destination finance account")]
    MissingTransferAccount(Uuid),

    #[error("category '{0}' does not resolve to a ledger account; supply a manual mapping")]
    UnresolvedCategory(String),

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for LedgerError {
    fn from(err: config::ConfigError) -> Self {
        LedgerError::ConfigError(anyhow::Error::new(err))
    }
}

impl LedgerError {
    /// Short label used for the error metrics counter.
    pub fn metric_label(&self) -> &'static str {
        match self {
            Self::UnbalancedEntry { .. } => "unbalanced_entry",
            Self::TooFewLines(_) => "too_few_lines",
            Self::MalformedLine { .. } => "malformed_line",
            Self::NonPositiveAmount(_) => "non_positive_amount",
            Self::DuplicateCode(_) => "duplicate_code",
            Self::AccountNotFound(_) => "account_not_found",
            Self::AccountClosed(_) => "account_closed",
            Self::AccountInUse(_) => "account_in_use",
            Self::EntryNotFound(_) => "entry_not_found",
            Self::MissingLedgerLink(_) => "missing_ledger_link",
            Self::MissingTransferAccount(_) => "missing_transfer_account",
            Self::UnresolvedCategory(_) => "unresolved_category",
            Self::DatabaseError(_) => "db_error",
            Self::ConfigError(_) => "config_error",
        }
    }
}
