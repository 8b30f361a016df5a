//! Journal entry and line models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Business object a journal entry was posted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "id")]
pub enum EntryReference {
    Transaction(Uuid),
    Invoice(Uuid),
    Manual,
}

impl EntryReference {
    /// Split into the (kind, id) columns stored on the entry row.
    pub fn as_parts(&self) -> (&'static str, Option<Uuid>) {
        match self {
            Self::Transaction(id) => ("transaction", Some(*id)),
            Self::Invoice(id) => ("invoice", Some(*id)),
            Self::Manual => ("manual", None),
        }
    }

    pub fn from_parts(kind: &str, id: Option<Uuid>) -> Option<Self> {
        match (kind, id) {
            ("transaction", Some(id)) => Some(Self::Transaction(id)),
            ("invoice", Some(id)) => Some(Self::Invoice(id)),
            ("manual", _) => Some(Self::Manual),
            _ => None,
        }
    }
}

/// Journal entry header row.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct JournalEntry {
    pub entry_id: Uuid,
    pub description: String,
    pub entry_date: NaiveDate,
    pub reference_kind: String,
    pub reference_id: Option<Uuid>,
    pub voided: bool,
    pub created_utc: DateTime<Utc>,
}

impl JournalEntry {
    /// Get parsed reference.
    pub fn reference(&self) -> Option<EntryReference> {
        EntryReference::from_parts(&self.reference_kind, self.reference_id)
    }
}

/// Single debit or credit posting against one account.
/// Exactly one of `debit`/`credit` is positive; the other is zero.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct JournalLine {
    pub line_id: Uuid,
    pub entry_id: Uuid,
    pub account_id: Uuid,
    pub debit: String,
    pub credit: String,
}

impl JournalLine {
    pub fn debit_amount(&self) -> Decimal {
        self.debit.parse().unwrap_or(Decimal::ZERO)
    }

    pub fn credit_amount(&self) -> Decimal {
        self.credit.parse().unwrap_or(Decimal::ZERO)
    }

    /// Get signed amount (positive for debit, negative for credit).
    pub fn signed_amount(&self) -> Decimal {
        self.debit_amount() - self.credit_amount()
    }
}

/// Input for a single line when posting an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostLine {
    pub account_id: Uuid,
    pub debit: Decimal,
    pub credit: Decimal,
}

impl PostLine {
    pub fn debit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    pub fn credit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
        }
    }
}

/// Entry header together with its lines (for queries and posting results).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntryWithLines {
    pub entry: JournalEntry,
    pub lines: Vec<JournalLine>,
}
