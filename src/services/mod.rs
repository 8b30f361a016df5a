//! Services module for the bookkeeping engine.

pub mod database;
pub mod metrics;
pub mod posting;
pub mod recalculator;
pub mod resolution;
pub mod sync;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
pub use posting::JournalPoster;
pub use recalculator::BalanceRecalculator;
pub use resolution::CategoryResolver;
pub use sync::TransactionSync;
