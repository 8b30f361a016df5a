//! Ledger account model (chart of accounts).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Account types following standard accounting categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountType {
    /// Get string representation for database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "revenue" => Some(Self::Revenue),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Whether the normal balance side is debit.
    /// Asset/Expense grow with debits; Liability/Equity/Revenue with credits.
    pub fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ledger account. `balance` is a derived cache rewritten by the balance
/// recalculator; no other writer touches it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Account {
    pub account_id: Uuid,
    pub code: String,
    pub name: String,
    pub account_type: String,
    pub balance: String,
    pub created_utc: DateTime<Utc>,
    pub closed_utc: Option<DateTime<Utc>>,
}

impl Account {
    /// Check if account is closed.
    pub fn is_closed(&self) -> bool {
        self.closed_utc.is_some()
    }

    /// Get parsed account type.
    pub fn parsed_type(&self) -> Option<AccountType> {
        AccountType::parse(&self.account_type)
    }

    /// Current balance parsed from its text column.
    pub fn current_balance(&self) -> Decimal {
        self.balance.parse().unwrap_or(Decimal::ZERO)
    }
}

/// Input for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
}
