//! Balance recalculator.
//!
//! Balances are always re-derived from the full non-voided line history,
//! never adjusted incrementally, so redundant or out-of-order recalculations
//! converge on the same value.

use crate::error::LedgerError;
use crate::services::database::Database;
use crate::services::metrics::RECALCULATION_FAILURES;
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct BalanceRecalculator {
    db: Database,
}

impl BalanceRecalculator {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Recompute one account's balance from its posted lines and write it to
    /// the account row. Signed per the account type's normal side:
    /// asset/expense debit-positive, liability/equity/revenue credit-positive.
    /// Idempotent.
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn recalculate(&self, account_id: Uuid) -> Result<(), LedgerError> {
        let account = self
            .db
            .get_account(account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))?;

        let lines = self.db.account_lines(account_id).await?;
        let raw: Decimal = lines.iter().map(|l| l.signed_amount()).sum();

        let debit_normal = account
            .parsed_type()
            .map(|t| t.is_debit_normal())
            .unwrap_or(true);
        let balance = if debit_normal { raw } else { -raw };

        self.db.update_account_balance(account_id, balance).await?;

        debug!(
            balance = %balance,
            line_count = lines.len(),
            "Balance recalculated"
        );

        Ok(())
    }

    /// Refresh balances after a journal write. The entry is already
    /// committed, so failures here are logged and counted instead of being
    /// propagated; the ledger stays correct and a later sweep can repair the
    /// cached balances.
    pub async fn recalculate_after_write(&self, account_ids: &[Uuid]) {
        for account_id in account_ids {
            if let Err(e) = self.recalculate(*account_id).await {
                warn!(
                    account_id = %account_id,
                    error = %e,
                    "Balance recalculation failed; cached balance may be stale"
                );
                RECALCULATION_FAILURES
                    .with_label_values(&[e.metric_label()])
                    .inc();
            }
        }
    }

    /// Reconciliation sweep: recalculate every account. Returns how many were
    /// refreshed; per-account failures are logged and counted.
    #[instrument(skip(self))]
    pub async fn recalculate_all(&self) -> Result<usize, LedgerError> {
        let accounts = self.db.list_accounts().await?;
        let mut refreshed = 0;
        for account in &accounts {
            match self.recalculate(account.account_id).await {
                Ok(()) => refreshed += 1,
                Err(e) => {
                    warn!(
                        account_id = %account.account_id,
                        error = %e,
                        "Balance recalculation failed during sweep"
                    );
                    RECALCULATION_FAILURES
                        .with_label_values(&[e.metric_label()])
                        .inc();
                }
            }
        }
        Ok(refreshed)
    }
}
