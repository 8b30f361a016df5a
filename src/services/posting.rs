//! Journal posting service.
//!
//! Validates a line set against the double-entry invariants, persists the
//! entry atomically, then refreshes the derived balance of every touched
//! account. Administrative corrections (update/void/delete) recalculate the
//! union of accounts affected before and after the change.

use crate::error::LedgerError;
use crate::models::{EntryReference, JournalEntryWithLines, PostLine};
use crate::services::database::Database;
use crate::services::metrics::{ENTRIES_POSTED, ERRORS_TOTAL};
use crate::services::recalculator::BalanceRecalculator;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

/// Rounding tolerance for the balance check: one currency cent.
static BALANCE_EPSILON: Lazy<Decimal> = Lazy::new(|| Decimal::new(1, 2));

#[derive(Clone)]
pub struct JournalPoster {
    db: Database,
    recalculator: BalanceRecalculator,
}

impl JournalPoster {
    pub fn new(db: Database) -> Self {
        Self {
            recalculator: BalanceRecalculator::new(db.clone()),
            db,
        }
    }

    /// Post a balanced journal entry. Validation failures reject before any
    /// write; once the entry is committed, recalculation failures no longer
    /// roll it back.
    #[instrument(skip(self, description, lines), fields(line_count = lines.len()))]
    pub async fn post_entry(
        &self,
        description: &str,
        entry_date: NaiveDate,
        reference: EntryReference,
        lines: &[PostLine],
    ) -> Result<JournalEntryWithLines, LedgerError> {
        let result = self
            .post_entry_inner(description, entry_date, reference, lines)
            .await;

        match &result {
            Ok(posted) => {
                ENTRIES_POSTED.with_label_values(&["ok"]).inc();
                info!(
                    entry_id = %posted.entry.entry_id,
                    line_count = posted.lines.len(),
                    "Journal entry posted"
                );
            }
            Err(e) => {
                ENTRIES_POSTED.with_label_values(&["error"]).inc();
                ERRORS_TOTAL.with_label_values(&[e.metric_label()]).inc();
            }
        }

        result
    }

    async fn post_entry_inner(
        &self,
        description: &str,
        entry_date: NaiveDate,
        reference: EntryReference,
        lines: &[PostLine],
    ) -> Result<JournalEntryWithLines, LedgerError> {
        Self::validate_lines(lines)?;

        let account_ids = Self::distinct_account_ids(lines);
        self.ensure_accounts_open(&account_ids).await?;

        let posted = self
            .db
            .insert_entry_with_lines(description, entry_date, &reference, lines)
            .await?;

        self.recalculator.recalculate_after_write(&account_ids).await;

        Ok(posted)
    }

    /// Administrative correction: rewrite an entry's description, date, and
    /// lines. Recalculates every account the entry touched before or after.
    #[instrument(skip(self, description, lines), fields(entry_id = %entry_id, line_count = lines.len()))]
    pub async fn update_entry(
        &self,
        entry_id: Uuid,
        description: &str,
        entry_date: NaiveDate,
        lines: &[PostLine],
    ) -> Result<JournalEntryWithLines, LedgerError> {
        Self::validate_lines(lines)?;

        let new_account_ids = Self::distinct_account_ids(lines);
        self.ensure_accounts_open(&new_account_ids).await?;

        let old_account_ids = self.db.entry_account_ids(entry_id).await?;

        let updated = self
            .db
            .replace_entry(entry_id, description, entry_date, lines)
            .await?;

        let mut affected = old_account_ids;
        for account_id in new_account_ids {
            if !affected.contains(&account_id) {
                affected.push(account_id);
            }
        }
        self.recalculator.recalculate_after_write(&affected).await;

        info!(entry_id = %entry_id, "Journal entry updated");

        Ok(updated)
    }

    /// Administrative correction: mark an entry voided. Its lines stay on
    /// record but drop out of balance derivation.
    #[instrument(skip(self), fields(entry_id = %entry_id))]
    pub async fn void_entry(&self, entry_id: Uuid) -> Result<(), LedgerError> {
        let account_ids = self.db.entry_account_ids(entry_id).await?;
        self.db.set_entry_voided(entry_id, true).await?;
        self.recalculator.recalculate_after_write(&account_ids).await;

        info!(entry_id = %entry_id, "Journal entry voided");

        Ok(())
    }

    /// Administrative correction: hard-delete an entry and its lines.
    #[instrument(skip(self), fields(entry_id = %entry_id))]
    pub async fn delete_entry(&self, entry_id: Uuid) -> Result<(), LedgerError> {
        let account_ids = self.db.entry_account_ids(entry_id).await?;
        self.db.delete_entry_rows(entry_id).await?;
        self.recalculator.recalculate_after_write(&account_ids).await;

        info!(entry_id = %entry_id, "Journal entry deleted");

        Ok(())
    }

    /// The recalculator this poster drives, for callers that need the
    /// reconciliation sweep.
    pub fn recalculator(&self) -> &BalanceRecalculator {
        &self.recalculator
    }

    fn validate_lines(lines: &[PostLine]) -> Result<(), LedgerError> {
        if lines.len() < 2 {
            return Err(LedgerError::TooFewLines(lines.len()));
        }

        let mut debits = Decimal::ZERO;
        let mut credits = Decimal::ZERO;

        for (index, line) in lines.iter().enumerate() {
            if line.debit < Decimal::ZERO {
                return Err(LedgerError::NonPositiveAmount(line.debit));
            }
            if line.credit < Decimal::ZERO {
                return Err(LedgerError::NonPositiveAmount(line.credit));
            }
            // A line is either a debit or a credit, never both or neither.
            if (line.debit > Decimal::ZERO) == (line.credit > Decimal::ZERO) {
                return Err(LedgerError::MalformedLine {
                    index,
                    account_id: line.account_id,
                });
            }
            debits += line.debit;
            credits += line.credit;
        }

        let difference = (debits - credits).abs();
        if difference >= *BALANCE_EPSILON {
            return Err(LedgerError::UnbalancedEntry {
                debits,
                credits,
                difference,
            });
        }

        Ok(())
    }

    async fn ensure_accounts_open(&self, account_ids: &[Uuid]) -> Result<(), LedgerError> {
        for account_id in account_ids {
            let account = self
                .db
                .get_account(*account_id)
                .await?
                .ok_or(LedgerError::AccountNotFound(*account_id))?;
            if account.is_closed() {
                return Err(LedgerError::AccountClosed(*account_id));
            }
        }
        Ok(())
    }

    fn distinct_account_ids(lines: &[PostLine]) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(lines.len());
        for line in lines {
            if !ids.contains(&line.account_id) {
                ids.push(line.account_id);
            }
        }
        ids
    }
}
