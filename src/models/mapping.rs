//! Persisted category-to-account mappings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Association from a free-text transaction category to a ledger account.
/// Created the first time a category is resolved (automatically or via a
/// manual override) and reused on every later resolution of that category.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CategoryMapping {
    pub mapping_id: Uuid,
    pub category: String,
    pub account_id: Uuid,
    pub created_utc: DateTime<Utc>,
}
