//! Tally Core Library
//!
//! Shared functionality for the Tally expense tracker:
//! - Domain models (transactions, budgets, derived read models)
//! - Aggregation engine for monthly, category and budget analytics
//! - Input parsing and validation
//! - SQLite storage with cached per-budget spend

pub mod analytics;
pub mod db;
pub mod error;
pub mod input;
pub mod models;

pub use db::Database;
pub use error::{Error, Result};
