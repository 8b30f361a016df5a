//! Transaction-to-journal sync.
//!
//! Entry point invoked when a finance transaction is created: resolves the
//! category side, pairs it with the cash/bank side, and posts a two-line
//! entry. Nothing is posted unless both sides resolve.

use crate::error::LedgerError;
use crate::models::{
    EntryReference, FinanceAccount, FinanceTransaction, InvoicePayment, JournalEntryWithLines,
    PostLine, TransactionKind,
};
use crate::services::database::Database;
use crate::services::posting::JournalPoster;
use crate::services::resolution::CategoryResolver;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{info, instrument};
use uuid::Uuid;

/// Category under which invoice payments are resolved.
const INVOICE_PAYMENT_CATEGORY: &str = "Invoice Payment";

#[derive(Clone)]
pub struct TransactionSync {
    db: Database,
    resolver: CategoryResolver,
    poster: JournalPoster,
}

impl TransactionSync {
    pub fn new(db: Database, resolver: CategoryResolver, poster: JournalPoster) -> Self {
        Self {
            db,
            resolver,
            poster,
        }
    }

    /// Post the journal entry for a finance transaction.
    ///
    /// Re-invoking for an already-posted transaction returns the existing
    /// entry unchanged; a later edit of the transaction is therefore a no-op
    /// here and never double-posts. Correcting a posted transaction is an
    /// administrative action on the entry itself (update/void).
    #[instrument(
        skip(self, transaction, manual_mappings),
        fields(transaction_id = %transaction.transaction_id, kind = %transaction.kind)
    )]
    pub async fn sync_from_transaction(
        &self,
        transaction: &FinanceTransaction,
        manual_mappings: Option<&HashMap<String, Uuid>>,
    ) -> Result<JournalEntryWithLines, LedgerError> {
        let reference = EntryReference::Transaction(transaction.transaction_id);

        if let Some(existing) = self.db.find_entry_by_reference(&reference).await? {
            info!(
                entry_id = %existing.entry_id,
                "Transaction already posted; returning existing entry"
            );
            let lines = self.db.get_lines(existing.entry_id).await?;
            return Ok(JournalEntryWithLines {
                entry: existing,
                lines,
            });
        }

        if transaction.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(transaction.amount));
        }

        let cash_account_id = Self::linked_account(&transaction.finance_account)?;

        let (description, lines) = match transaction.kind {
            TransactionKind::Income => {
                let category_account = self
                    .resolve_category(&transaction.category, manual_mappings)
                    .await?;
                (
                    format!("Income - {}", transaction.category),
                    vec![
                        PostLine::debit(cash_account_id, transaction.amount),
                        PostLine::credit(category_account, transaction.amount),
                    ],
                )
            }
            TransactionKind::Expense => {
                let category_account = self
                    .resolve_category(&transaction.category, manual_mappings)
                    .await?;
                (
                    format!("Expense - {}", transaction.category),
                    vec![
                        PostLine::debit(category_account, transaction.amount),
                        PostLine::credit(cash_account_id, transaction.amount),
                    ],
                )
            }
            TransactionKind::Transfer => {
                let destination = transaction.counterparty.as_ref().ok_or(
                    LedgerError::MissingTransferAccount(transaction.transaction_id),
                )?;
                let destination_id = Self::linked_account(destination)?;
                (
                    format!(
                        "Transfer - {} to {}",
                        transaction.finance_account.name, destination.name
                    ),
                    vec![
                        PostLine::debit(destination_id, transaction.amount),
                        PostLine::credit(cash_account_id, transaction.amount),
                    ],
                )
            }
        };

        self.poster
            .post_entry(&description, transaction.date, reference, &lines)
            .await
    }

    /// Post the journal entry for a payment received against an invoice:
    /// debit the cash account, credit the invoice-payment revenue account.
    #[instrument(
        skip(self, payment, manual_mappings),
        fields(invoice_id = %payment.invoice_id)
    )]
    pub async fn sync_invoice_payment(
        &self,
        payment: &InvoicePayment,
        manual_mappings: Option<&HashMap<String, Uuid>>,
    ) -> Result<JournalEntryWithLines, LedgerError> {
        let reference = EntryReference::Invoice(payment.invoice_id);

        if let Some(existing) = self.db.find_entry_by_reference(&reference).await? {
            info!(
                entry_id = %existing.entry_id,
                "Invoice payment already posted; returning existing entry"
            );
            let lines = self.db.get_lines(existing.entry_id).await?;
            return Ok(JournalEntryWithLines {
                entry: existing,
                lines,
            });
        }

        if payment.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(payment.amount));
        }

        let cash_account_id = Self::linked_account(&payment.finance_account)?;
        let revenue_account = self
            .resolve_category(INVOICE_PAYMENT_CATEGORY, manual_mappings)
            .await?;

        let lines = vec![
            PostLine::debit(cash_account_id, payment.amount),
            PostLine::credit(revenue_account, payment.amount),
        ];

        self.poster
            .post_entry(
                &format!("Invoice payment - {}", payment.invoice_id),
                payment.date,
                reference,
                &lines,
            )
            .await
    }

    async fn resolve_category(
        &self,
        category: &str,
        manual_mappings: Option<&HashMap<String, Uuid>>,
    ) -> Result<Uuid, LedgerError> {
        self.resolver
            .resolve(category, manual_mappings)
            .await?
            .map(|account| account.account_id)
            .ok_or_else(|| LedgerError::UnresolvedCategory(category.to_string()))
    }

    fn linked_account(finance_account: &FinanceAccount) -> Result<Uuid, LedgerError> {
        finance_account
            .linked_account_id
            .ok_or_else(|| LedgerError::MissingLedgerLink(finance_account.name.clone()))
    }
}
