//! Category resolution engine.
//!
//! Resolves a transaction's free-text category to a ledger account in a
//! fixed order: caller-supplied manual override (persisted as a learned
//! mapping), then the persisted mapping store, then the configured defaults.
//! Defaults are deliberately not persisted so they stay overridable.

use crate::error::LedgerError;
use crate::models::{Account, EntryReference, FinanceTransaction, TransactionKind};
use crate::services::database::Database;
use crate::services::metrics::CATEGORY_RESOLUTIONS;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct CategoryResolver {
    db: Database,
    /// Well-known category names mapped to default account codes, injected
    /// from configuration.
    defaults: HashMap<String, String>,
}

impl CategoryResolver {
    pub fn new(db: Database, defaults: HashMap<String, String>) -> Self {
        Self { db, defaults }
    }

    /// Resolve a category to its target account. `Ok(None)` means unresolved;
    /// the caller is expected to come back with a manual mapping.
    #[instrument(skip(self, manual_mappings), fields(category = %category))]
    pub async fn resolve(
        &self,
        category: &str,
        manual_mappings: Option<&HashMap<String, Uuid>>,
    ) -> Result<Option<Account>, LedgerError> {
        if category.trim().is_empty() {
            CATEGORY_RESOLUTIONS.with_label_values(&["unresolved"]).inc();
            return Ok(None);
        }

        // 1. Explicit manual override: use it and learn it.
        if let Some(account_id) = manual_mappings.and_then(|m| m.get(category)) {
            let account = self
                .db
                .get_account(*account_id)
                .await?
                .ok_or(LedgerError::AccountNotFound(*account_id))?;
            self.db
                .upsert_category_mapping(category, account.account_id)
                .await?;
            CATEGORY_RESOLUTIONS.with_label_values(&["manual"]).inc();
            debug!(account_id = %account.account_id, "Category resolved via manual mapping");
            return Ok(Some(account));
        }

        // 2. Previously learned mapping.
        if let Some(mapping) = self.db.get_category_mapping(category).await? {
            match self.db.get_account(mapping.account_id).await? {
                Some(account) => {
                    CATEGORY_RESOLUTIONS.with_label_values(&["mapping"]).inc();
                    debug!(account_id = %account.account_id, "Category resolved via persisted mapping");
                    return Ok(Some(account));
                }
                None => {
                    warn!(
                        account_id = %mapping.account_id,
                        "Persisted mapping points at a missing account; falling through to defaults"
                    );
                }
            }
        }

        // 3. Configured default, not persisted.
        if let Some(code) = self.defaults.get(category) {
            match self.db.get_account_by_code(code).await? {
                Some(account) => {
                    CATEGORY_RESOLUTIONS.with_label_values(&["default"]).inc();
                    debug!(account_id = %account.account_id, code = %code, "Category resolved via default");
                    return Ok(Some(account));
                }
                None => {
                    warn!(code = %code, "Default category account does not exist");
                }
            }
        }

        CATEGORY_RESOLUTIONS.with_label_values(&["unresolved"]).inc();
        Ok(None)
    }

    /// Distinct categories an operator still has to assign: used by income or
    /// expense transactions that have no journal entry yet and resolve via
    /// neither a persisted mapping nor a configured default.
    #[instrument(skip(self, transactions), fields(transaction_count = transactions.len()))]
    pub async fn unresolved_categories(
        &self,
        transactions: &[FinanceTransaction],
    ) -> Result<BTreeSet<String>, LedgerError> {
        let mut unresolved = BTreeSet::new();

        for transaction in transactions {
            if transaction.kind == TransactionKind::Transfer
                || transaction.category.trim().is_empty()
                || unresolved.contains(&transaction.category)
            {
                continue;
            }

            let reference = EntryReference::Transaction(transaction.transaction_id);
            if self.db.find_entry_by_reference(&reference).await?.is_some() {
                continue;
            }

            if self.resolves_automatically(&transaction.category).await? {
                continue;
            }

            unresolved.insert(transaction.category.clone());
        }

        Ok(unresolved)
    }

    /// Whether a category resolves without operator input (steps 2 and 3).
    async fn resolves_automatically(&self, category: &str) -> Result<bool, LedgerError> {
        if let Some(mapping) = self.db.get_category_mapping(category).await? {
            if self.db.get_account(mapping.account_id).await?.is_some() {
                return Ok(true);
            }
        }
        if let Some(code) = self.defaults.get(category) {
            if self.db.get_account_by_code(code).await?.is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
