//! Domain models for the bookkeeping engine.

mod account;
mod entry;
mod mapping;
mod transaction;

pub use account::{Account, AccountType, CreateAccount};
pub use entry::{EntryReference, JournalEntry, JournalEntryWithLines, JournalLine, PostLine};
pub use mapping::CategoryMapping;
pub use transaction::{FinanceAccount, FinanceTransaction, InvoicePayment, TransactionKind};
