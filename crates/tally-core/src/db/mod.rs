//! Database access layer with connection pooling and schema setup
//!
//! This module is organized by domain:
//! - `transactions` - Transaction CRUD
//! - `budgets` - Budget upserts and cached spend maintenance
//! - `reports` - Analytics and dashboard reads
//! - `seed` - Demo data

use std::sync::Arc;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::Category;

mod budgets;
mod reports;
mod seed;
mod transactions;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
    /// Backing temp file for `in_memory()` databases, removed on last drop
    _temp: Option<Arc<tempfile::TempPath>>,
}

impl Database {
    /// Open (or create) the database at `path` and ensure the schema exists
    pub fn new(path: &str) -> Result<Self> {
        Self::open(path, None)
    }

    /// Create a throwaway database (for testing)
    ///
    /// Uses a temporary file rather than `:memory:` because every pooled
    /// connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        let temp = tempfile::Builder::new()
            .prefix("tally_test_")
            .suffix(".db")
            .tempfile()?
            .into_temp_path();
        let path = temp.to_string_lossy().to_string();
        Self::open(&path, Some(Arc::new(temp)))
    }

    fn open(path: &str, temp: Option<Arc<tempfile::TempPath>>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
        });
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
            _temp: temp,
        };
        db.run_migrations()?;

        debug!(path = %db.db_path, "Database opened");
        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- Transactions (append-mostly spending records)
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                amount REAL NOT NULL,
                date TEXT NOT NULL,                        -- YYYY-MM-DD
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                created_at TEXT NOT NULL                   -- RFC 3339, UTC
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
            CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);
            CREATE INDEX IF NOT EXISTS idx_transactions_created ON transactions(created_at);

            -- Budgets (one per category per month)
            CREATE TABLE IF NOT EXISTS budgets (
                id INTEGER PRIMARY KEY,
                category TEXT NOT NULL,
                monthly_budget REAL NOT NULL,
                current_spent REAL NOT NULL DEFAULT 0,     -- cached from transactions
                month TEXT NOT NULL,                       -- YYYY-MM
                UNIQUE(category, month)
            );

            CREATE INDEX IF NOT EXISTS idx_budgets_month ON budgets(month);
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}

/// Read a category column, failing the row on unknown names
pub(crate) fn category_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Category> {
    let name: String = row.get(idx)?;
    name.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, e.into())
    })
}

/// Current time as the RFC 3339 string stored in `created_at`
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
