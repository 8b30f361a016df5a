//! Read-only views of the business objects that drive journal postings.
//!
//! These are owned by the surrounding application; the sync service only
//! reads them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cash flow direction of a finance transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operational cash/bank account, distinct from a ledger account.
/// `linked_account_id` names the ledger account it posts against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceAccount {
    pub finance_account_id: Uuid,
    pub name: String,
    pub linked_account_id: Option<Uuid>,
}

/// A cash transaction recorded in the admin panel.
/// `counterparty` is the destination finance account of a transfer; it is
/// `None` for income and expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceTransaction {
    pub transaction_id: Uuid,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    pub finance_account: FinanceAccount,
    pub counterparty: Option<FinanceAccount>,
}

/// A payment received against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoicePayment {
    pub invoice_id: Uuid,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub finance_account: FinanceAccount,
}
