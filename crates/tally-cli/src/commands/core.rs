//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_seed` - Load demo data
//! - `cmd_rebuild` - Recompute cached budget spend

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use tally_core::analytics::month_key_of;
use tally_core::db::Database;
use tally_core::input::validate_month;
use tracing::debug;

/// Open (or create) the database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    debug!(path = %path_str, "Opening database");
    Database::new(path_str).context("Failed to open database")
}

/// Validated month argument, or the current local month
pub fn month_or_current(month: Option<&str>) -> Result<String> {
    match month {
        Some(m) => Ok(validate_month(m)?),
        None => Ok(month_key_of(Local::now().date_naive())),
    }
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let count = db.count_transactions()?;
    println!("   Transactions: {}", count);

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record spending: tally add -a 250 -d \"Lunch\" -c Food");
    println!("  2. Set a budget:    tally budget set -c Food -a 5000");
    println!("  3. Start web UI:    tally serve");

    Ok(())
}

pub fn cmd_seed(db: &Database) -> Result<()> {
    if db.seed_demo_data().context("Failed to load demo data")? {
        println!("🌱 Loaded demo data (10 transactions, 8 budgets for 2025-01)");
        println!("   Try: tally dashboard --month 2025-01");
    } else {
        println!("Database already has transactions; demo data not loaded.");
    }
    Ok(())
}

pub fn cmd_rebuild(db: &Database) -> Result<()> {
    println!("🔄 Recomputing cached budget spend...");
    let updated = db.refresh_all_budget_spent()?;
    println!("✅ Updated {} budget(s)", updated);
    Ok(())
}
