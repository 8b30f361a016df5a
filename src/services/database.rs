//! Database service for the bookkeeping engine.
//!
//! Pure data access over SQLite: the account directory, the journal store,
//! and the category mapping store. Validation and orchestration live in the
//! posting/resolution/sync services.

use crate::error::LedgerError;
use crate::models::{
    Account, CategoryMapping, CreateAccount, EntryReference, JournalEntry, JournalEntryWithLines,
    JournalLine, PostLine,
};
use crate::services::metrics::DB_QUERY_DURATION;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, LedgerError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Opening SQLite database"
        );

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                LedgerError::DatabaseError(anyhow::anyhow!("Invalid database URL: {}", e))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(30))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .map_err(|e| LedgerError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("SQLite connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), LedgerError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| LedgerError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), LedgerError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| LedgerError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Account Directory
    // -------------------------------------------------------------------------

    /// Create a new account. Fails with `DuplicateCode` if the code is taken.
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create_account(&self, input: &CreateAccount) -> Result<Account, LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_account"])
            .start_timer();

        let account_id = Uuid::new_v4();
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (account_id, code, name, account_type, created_utc)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING account_id, code, name, account_type, balance, created_utc, closed_utc
            "#,
        )
        .bind(account_id)
        .bind(&input.code)
        .bind(&input.name)
        .bind(input.account_type.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                LedgerError::DuplicateCode(input.code.clone())
            }
            _ => LedgerError::DatabaseError(anyhow::anyhow!("Failed to create account: {}", e)),
        })?;

        timer.observe_duration();

        info!(
            account_id = %account.account_id,
            account_type = %account.account_type,
            "Account created"
        );

        Ok(account)
    }

    /// Get an account by ID.
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn get_account(&self, account_id: Uuid) -> Result<Option<Account>, LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_account"])
            .start_timer();

        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT account_id, code, name, account_type, balance, created_utc, closed_utc
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::DatabaseError(anyhow::anyhow!("Failed to get account: {}", e)))?;

        timer.observe_duration();

        Ok(account)
    }

    /// Get an account by its unique code.
    #[instrument(skip(self), fields(code = %code))]
    pub async fn get_account_by_code(&self, code: &str) -> Result<Option<Account>, LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_account_by_code"])
            .start_timer();

        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT account_id, code, name, account_type, balance, created_utc, closed_utc
            FROM accounts
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::DatabaseError(anyhow::anyhow!("Failed to get account: {}", e)))?;

        timer.observe_duration();

        Ok(account)
    }

    /// Fetch several accounts by ID, skipping ids that do not exist.
    #[instrument(skip(self, account_ids), fields(account_count = account_ids.len()))]
    pub async fn get_accounts_by_ids(
        &self,
        account_ids: &[Uuid],
    ) -> Result<Vec<Account>, LedgerError> {
        let mut accounts = Vec::with_capacity(account_ids.len());
        for account_id in account_ids {
            if let Some(account) = self.get_account(*account_id).await? {
                accounts.push(account);
            }
        }
        Ok(accounts)
    }

    /// List all accounts ordered by code.
    #[instrument(skip(self))]
    pub async fn list_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_accounts"])
            .start_timer();

        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT account_id, code, name, account_type, balance, created_utc, closed_utc
            FROM accounts
            ORDER BY code
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::DatabaseError(anyhow::anyhow!("Failed to list accounts: {}", e)))?;

        timer.observe_duration();

        Ok(accounts)
    }

    /// Soft-close an account. Closed accounts reject new postings but keep
    /// their history. Idempotent for an already-closed account.
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn close_account(&self, account_id: Uuid) -> Result<(), LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["close_account"])
            .start_timer();

        let result = sqlx::query(
            "UPDATE accounts SET closed_utc = $1 WHERE account_id = $2 AND closed_utc IS NULL",
        )
        .bind(Utc::now())
        .bind(account_id)
        .execute(&self.pool)
        .await
        .map_err(|e| LedgerError::DatabaseError(anyhow::anyhow!("Failed to close account: {}", e)))?;

        timer.observe_duration();

        if result.rows_affected() == 0 && self.get_account(account_id).await?.is_none() {
            return Err(LedgerError::AccountNotFound(account_id));
        }

        Ok(())
    }

    /// Delete an account. Rejected with `AccountInUse` while any journal line
    /// or category mapping still references it.
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn delete_account(&self, account_id: Uuid) -> Result<(), LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_account"])
            .start_timer();

        let referenced: i64 = sqlx::query_scalar(
            r#"
            SELECT (SELECT COUNT(*) FROM journal_lines WHERE account_id = $1)
                 + (SELECT COUNT(*) FROM category_mappings WHERE account_id = $1)
            "#,
        )
        .bind(account_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            LedgerError::DatabaseError(anyhow::anyhow!("Failed to count references: {}", e))
        })?;

        if referenced > 0 {
            return Err(LedgerError::AccountInUse(account_id));
        }

        let result = sqlx::query("DELETE FROM accounts WHERE account_id = $1")
            .bind(account_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                LedgerError::DatabaseError(anyhow::anyhow!("Failed to delete account: {}", e))
            })?;

        timer.observe_duration();

        if result.rows_affected() == 0 {
            return Err(LedgerError::AccountNotFound(account_id));
        }

        Ok(())
    }

    /// Write a derived balance. Crate-private: only the balance recalculator
    /// may mutate `accounts.balance`.
    #[instrument(skip(self), fields(account_id = %account_id, balance = %balance))]
    pub(crate) async fn update_account_balance(
        &self,
        account_id: Uuid,
        balance: Decimal,
    ) -> Result<(), LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_account_balance"])
            .start_timer();

        let result = sqlx::query("UPDATE accounts SET balance = $1 WHERE account_id = $2")
            .bind(balance.to_string())
            .bind(account_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                LedgerError::DatabaseError(anyhow::anyhow!("Failed to update balance: {}", e))
            })?;

        timer.observe_duration();

        if result.rows_affected() == 0 {
            return Err(LedgerError::AccountNotFound(account_id));
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Journal Store
    // -------------------------------------------------------------------------

    /// Persist an entry and its lines as a single atomic unit. Callers are
    /// expected to have validated the line set already.
    #[instrument(skip(self, description, lines), fields(line_count = lines.len()))]
    pub async fn insert_entry_with_lines(
        &self,
        description: &str,
        entry_date: NaiveDate,
        reference: &EntryReference,
        lines: &[PostLine],
    ) -> Result<JournalEntryWithLines, LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert_entry_with_lines"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            LedgerError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let entry_id = Uuid::new_v4();
        let (reference_kind, reference_id) = reference.as_parts();

        let entry = sqlx::query_as::<_, JournalEntry>(
            r#"
            INSERT INTO journal_entries (entry_id, description, entry_date, reference_kind, reference_id, created_utc)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING entry_id, description, entry_date, reference_kind, reference_id, voided, created_utc
            "#,
        )
        .bind(entry_id)
        .bind(description)
        .bind(entry_date)
        .bind(reference_kind)
        .bind(reference_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| LedgerError::DatabaseError(anyhow::anyhow!("Failed to insert entry: {}", e)))?;

        let mut inserted_lines = Vec::with_capacity(lines.len());
        for line in lines {
            let inserted = sqlx::query_as::<_, JournalLine>(
                r#"
                INSERT INTO journal_lines (line_id, entry_id, account_id, debit, credit)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING line_id, entry_id, account_id, debit, credit
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(entry_id)
            .bind(line.account_id)
            .bind(line.debit.to_string())
            .bind(line.credit.to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                LedgerError::DatabaseError(anyhow::anyhow!("Failed to insert line: {}", e))
            })?;
            inserted_lines.push(inserted);
        }

        tx.commit().await.map_err(|e| {
            LedgerError::DatabaseError(anyhow::anyhow!("Failed to commit transaction: {}", e))
        })?;

        timer.observe_duration();

        Ok(JournalEntryWithLines {
            entry,
            lines: inserted_lines,
        })
    }

    /// Get an entry header by ID.
    #[instrument(skip(self), fields(entry_id = %entry_id))]
    pub async fn get_entry(&self, entry_id: Uuid) -> Result<Option<JournalEntry>, LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_entry"])
            .start_timer();

        let entry = sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT entry_id, description, entry_date, reference_kind, reference_id, voided, created_utc
            FROM journal_entries
            WHERE entry_id = $1
            "#,
        )
        .bind(entry_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::DatabaseError(anyhow::anyhow!("Failed to get entry: {}", e)))?;

        timer.observe_duration();

        Ok(entry)
    }

    /// Get all lines of an entry.
    #[instrument(skip(self), fields(entry_id = %entry_id))]
    pub async fn get_lines(&self, entry_id: Uuid) -> Result<Vec<JournalLine>, LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_lines"])
            .start_timer();

        let lines = sqlx::query_as::<_, JournalLine>(
            r#"
            SELECT line_id, entry_id, account_id, debit, credit
            FROM journal_lines
            WHERE entry_id = $1
            ORDER BY line_id
            "#,
        )
        .bind(entry_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::DatabaseError(anyhow::anyhow!("Failed to get lines: {}", e)))?;

        timer.observe_duration();

        Ok(lines)
    }

    /// Get an entry together with its lines.
    pub async fn get_entry_with_lines(
        &self,
        entry_id: Uuid,
    ) -> Result<Option<JournalEntryWithLines>, LedgerError> {
        let entry = match self.get_entry(entry_id).await? {
            Some(e) => e,
            None => return Ok(None),
        };
        let lines = self.get_lines(entry_id).await?;
        Ok(Some(JournalEntryWithLines { entry, lines }))
    }

    /// Find the entry posted for a business-object reference, if any.
    #[instrument(skip(self))]
    pub async fn find_entry_by_reference(
        &self,
        reference: &EntryReference,
    ) -> Result<Option<JournalEntry>, LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["find_entry_by_reference"])
            .start_timer();

        let (reference_kind, reference_id) = reference.as_parts();

        let entry = sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT entry_id, description, entry_date, reference_kind, reference_id, voided, created_utc
            FROM journal_entries
            WHERE reference_kind = $1
              AND (reference_id = $2 OR ($2 IS NULL AND reference_id IS NULL))
            ORDER BY created_utc
            LIMIT 1
            "#,
        )
        .bind(reference_kind)
        .bind(reference_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            LedgerError::DatabaseError(anyhow::anyhow!("Failed to find entry by reference: {}", e))
        })?;

        timer.observe_duration();

        Ok(entry)
    }

    /// Distinct accounts touched by an entry's lines.
    #[instrument(skip(self), fields(entry_id = %entry_id))]
    pub async fn entry_account_ids(&self, entry_id: Uuid) -> Result<Vec<Uuid>, LedgerError> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT DISTINCT account_id FROM journal_lines WHERE entry_id = $1",
        )
        .bind(entry_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            LedgerError::DatabaseError(anyhow::anyhow!("Failed to get entry accounts: {}", e))
        })?;

        Ok(ids)
    }

    /// All non-voided lines posted against an account. This is the source of
    /// truth the balance recalculator replays.
    #[instrument(skip(self), fields(account_id = %account_id))]
    pub async fn account_lines(&self, account_id: Uuid) -> Result<Vec<JournalLine>, LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["account_lines"])
            .start_timer();

        let lines = sqlx::query_as::<_, JournalLine>(
            r#"
            SELECT l.line_id, l.entry_id, l.account_id, l.debit, l.credit
            FROM journal_lines l
            JOIN journal_entries e ON e.entry_id = l.entry_id
            WHERE l.account_id = $1
              AND e.voided = 0
            ORDER BY l.line_id
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            LedgerError::DatabaseError(anyhow::anyhow!("Failed to get account lines: {}", e))
        })?;

        timer.observe_duration();

        Ok(lines)
    }

    /// Mark an entry voided (or un-voided). Voided entries are excluded from
    /// balance derivation.
    #[instrument(skip(self), fields(entry_id = %entry_id, voided = voided))]
    pub async fn set_entry_voided(
        &self,
        entry_id: Uuid,
        voided: bool,
    ) -> Result<(), LedgerError> {
        let result = sqlx::query("UPDATE journal_entries SET voided = $1 WHERE entry_id = $2")
            .bind(voided)
            .bind(entry_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                LedgerError::DatabaseError(anyhow::anyhow!("Failed to void entry: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::EntryNotFound(entry_id));
        }

        Ok(())
    }

    /// Hard-delete an entry; its lines go with it (cascade).
    #[instrument(skip(self), fields(entry_id = %entry_id))]
    pub async fn delete_entry_rows(&self, entry_id: Uuid) -> Result<(), LedgerError> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE entry_id = $1")
            .bind(entry_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                LedgerError::DatabaseError(anyhow::anyhow!("Failed to delete entry: {}", e))
            })?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::EntryNotFound(entry_id));
        }

        Ok(())
    }

    /// Rewrite an entry's header fields and replace its lines atomically.
    #[instrument(skip(self, description, lines), fields(entry_id = %entry_id, line_count = lines.len()))]
    pub async fn replace_entry(
        &self,
        entry_id: Uuid,
        description: &str,
        entry_date: NaiveDate,
        lines: &[PostLine],
    ) -> Result<JournalEntryWithLines, LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["replace_entry"])
            .start_timer();

        let mut tx = self.pool.begin().await.map_err(|e| {
            LedgerError::DatabaseError(anyhow::anyhow!("Failed to begin transaction: {}", e))
        })?;

        let entry = sqlx::query_as::<_, JournalEntry>(
            r#"
            UPDATE journal_entries
            SET description = $1, entry_date = $2
            WHERE entry_id = $3
            RETURNING entry_id, description, entry_date, reference_kind, reference_id, voided, created_utc
            "#,
        )
        .bind(description)
        .bind(entry_date)
        .bind(entry_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| LedgerError::DatabaseError(anyhow::anyhow!("Failed to update entry: {}", e)))?
        .ok_or(LedgerError::EntryNotFound(entry_id))?;

        sqlx::query("DELETE FROM journal_lines WHERE entry_id = $1")
            .bind(entry_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                LedgerError::DatabaseError(anyhow::anyhow!("Failed to clear lines: {}", e))
            })?;

        let mut inserted_lines = Vec::with_capacity(lines.len());
        for line in lines {
            let inserted = sqlx::query_as::<_, JournalLine>(
                r#"
                INSERT INTO journal_lines (line_id, entry_id, account_id, debit, credit)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING line_id, entry_id, account_id, debit, credit
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(entry_id)
            .bind(line.account_id)
            .bind(line.debit.to_string())
            .bind(line.credit.to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                LedgerError::DatabaseError(anyhow::anyhow!("Failed to insert line: {}", e))
            })?;
            inserted_lines.push(inserted);
        }

        tx.commit().await.map_err(|e| {
            LedgerError::DatabaseError(anyhow::anyhow!("Failed to commit transaction: {}", e))
        })?;

        timer.observe_duration();

        Ok(JournalEntryWithLines {
            entry,
            lines: inserted_lines,
        })
    }

    // -------------------------------------------------------------------------
    // Category Mapping Store
    // -------------------------------------------------------------------------

    /// Persist a category mapping if none exists yet, then return the stored
    /// row. Two concurrent first-time resolutions of the same category both
    /// land on the single persisted mapping.
    #[instrument(skip(self), fields(category = %category, account_id = %account_id))]
    pub async fn upsert_category_mapping(
        &self,
        category: &str,
        account_id: Uuid,
    ) -> Result<CategoryMapping, LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["upsert_category_mapping"])
            .start_timer();

        sqlx::query(
            r#"
            INSERT INTO category_mappings (mapping_id, category, account_id, created_utc)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (category) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(category)
        .bind(account_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            LedgerError::DatabaseError(anyhow::anyhow!("Failed to upsert mapping: {}", e))
        })?;

        let mapping = sqlx::query_as::<_, CategoryMapping>(
            r#"
            SELECT mapping_id, category, account_id, created_utc
            FROM category_mappings
            WHERE category = $1
            "#,
        )
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            LedgerError::DatabaseError(anyhow::anyhow!("Failed to read mapping: {}", e))
        })?;

        timer.observe_duration();

        Ok(mapping)
    }

    /// Look up a persisted mapping by exact category string.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn get_category_mapping(
        &self,
        category: &str,
    ) -> Result<Option<CategoryMapping>, LedgerError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_category_mapping"])
            .start_timer();

        let mapping = sqlx::query_as::<_, CategoryMapping>(
            r#"
            SELECT mapping_id, category, account_id, created_utc
            FROM category_mappings
            WHERE category = $1
            "#,
        )
        .bind(category)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::DatabaseError(anyhow::anyhow!("Failed to get mapping: {}", e)))?;

        timer.observe_duration();

        Ok(mapping)
    }

    /// Remove a persisted mapping so the category resolves fresh next time.
    /// Returns whether a row was deleted.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn delete_category_mapping(&self, category: &str) -> Result<bool, LedgerError> {
        let result = sqlx::query("DELETE FROM category_mappings WHERE category = $1")
            .bind(category)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                LedgerError::DatabaseError(anyhow::anyhow!("Failed to delete mapping: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// List all persisted mappings ordered by category.
    #[instrument(skip(self))]
    pub async fn list_category_mappings(&self) -> Result<Vec<CategoryMapping>, LedgerError> {
        let mappings = sqlx::query_as::<_, CategoryMapping>(
            r#"
            SELECT mapping_id, category, account_id, created_utc
            FROM category_mappings
            ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            LedgerError::DatabaseError(anyhow::anyhow!("Failed to list mappings: {}", e))
        })?;

        Ok(mappings)
    }
}
