//! Configuration for the bookkeeping engine.

use crate::error::LedgerError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

fn default_min_connections() -> u32 {
    1
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookkeepingConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub database: DatabaseConfig,
    /// Well-known category names mapped to default ledger account codes.
    /// Consulted by the category resolver when no persisted mapping exists.
    #[serde(default = "default_category_accounts")]
    pub category_accounts: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Built-in category defaults. Overridable via configuration; never persisted
/// as learned mappings.
pub fn default_category_accounts() -> HashMap<String, String> {
    HashMap::from([
        ("Invoice Payment".to_string(), "2-1300".to_string()),
        ("Maintenance".to_string(), "5-2000".to_string()),
    ])
}

impl BookkeepingConfig {
    pub fn load() -> Result<Self, LedgerError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
