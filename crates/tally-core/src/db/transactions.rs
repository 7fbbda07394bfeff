//! Transaction operations
//!
//! Every write also refreshes the cached `current_spent` of the budgets it
//! touches, inside the same SQLite transaction.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::{category_column, now_timestamp, Database};
use crate::error::{Error, Result};
use crate::models::{month_prefix, Category, NewTransaction, Transaction};

const TRANSACTION_COLUMNS: &str = "id, amount, date, description, category, created_at";

impl Database {
    /// Insert a transaction, assigning its id and creation timestamp
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        let mut conn = self.conn()?;
        let created_at = now_timestamp();

        let sql_tx = conn.transaction()?;
        sql_tx.execute(
            r#"
            INSERT INTO transactions (amount, date, description, category, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                tx.amount,
                tx.date,
                tx.description,
                tx.category.as_str(),
                created_at
            ],
        )?;
        let id = sql_tx.last_insert_rowid();
        Self::refresh_budget_spent_with_conn(&sql_tx, tx.category, month_prefix(&tx.date))?;
        sql_tx.commit()?;

        debug!(id, category = %tx.category, amount = tx.amount, "Transaction inserted");

        Ok(Transaction {
            id,
            amount: tx.amount,
            date: tx.date.clone(),
            description: tx.description.clone(),
            category: tx.category,
            created_at,
        })
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        Self::get_transaction_with_conn(&conn, id)
    }

    fn get_transaction_with_conn(conn: &Connection, id: i64) -> Result<Option<Transaction>> {
        let sql = format!("SELECT {} FROM transactions WHERE id = ?1", TRANSACTION_COLUMNS);
        let tx = conn
            .query_row(&sql, params![id], Self::row_to_transaction)
            .optional()?;
        Ok(tx)
    }

    /// Replace the fields of an existing transaction (id and created_at are kept)
    pub fn update_transaction(&self, id: i64, tx: &NewTransaction) -> Result<Transaction> {
        let mut conn = self.conn()?;
        let sql_tx = conn.transaction()?;

        let existing = Self::get_transaction_with_conn(&sql_tx, id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))?;

        sql_tx.execute(
            r#"
            UPDATE transactions
            SET amount = ?1, date = ?2, description = ?3, category = ?4
            WHERE id = ?5
            "#,
            params![tx.amount, tx.date, tx.description, tx.category.as_str(), id],
        )?;

        // Both the old and the new (category, month) may have changed totals
        Self::refresh_budget_spent_with_conn(&sql_tx, existing.category, existing.month_key())?;
        Self::refresh_budget_spent_with_conn(&sql_tx, tx.category, month_prefix(&tx.date))?;
        sql_tx.commit()?;

        Ok(Transaction {
            id,
            amount: tx.amount,
            date: tx.date.clone(),
            description: tx.description.clone(),
            category: tx.category,
            created_at: existing.created_at,
        })
    }

    /// Delete a transaction
    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        let mut conn = self.conn()?;
        let sql_tx = conn.transaction()?;

        let existing = Self::get_transaction_with_conn(&sql_tx, id)?
            .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))?;

        sql_tx.execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        Self::refresh_budget_spent_with_conn(&sql_tx, existing.category, existing.month_key())?;
        sql_tx.commit()?;

        debug!(id, "Transaction deleted");
        Ok(())
    }

    /// Most recently created transactions first
    pub fn list_transactions(&self, limit: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions ORDER BY created_at DESC, id DESC LIMIT ?1",
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(params![limit], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(transactions)
    }

    /// Every transaction, newest first (the analytics snapshot)
    pub fn list_all_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions ORDER BY created_at DESC, id DESC",
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map([], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(transactions)
    }

    /// Transactions in one category, newest first
    pub fn list_transactions_by_category(&self, category: Category) -> Result<Vec<Transaction>> {
        self.search_transactions(Some(category), None, None)
    }

    /// Transactions whose date starts with `month` (any prefix works), newest first
    pub fn list_transactions_by_month(&self, month: &str) -> Result<Vec<Transaction>> {
        self.search_transactions(None, Some(month), None)
    }

    /// List transactions with optional category/month-prefix filters and limit
    pub fn search_transactions(
        &self,
        category: Option<Category>,
        month: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        // Build dynamic WHERE clause
        let mut conditions = Vec::new();
        let mut query_params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(c) = category {
            conditions.push("category = ?".to_string());
            query_params.push(Box::new(c.as_str()));
        }

        if let Some(m) = month {
            // Textual prefix match, no LIKE wildcards to escape
            conditions.push("substr(date, 1, length(?)) = ?".to_string());
            query_params.push(Box::new(m.to_string()));
            query_params.push(Box::new(m.to_string()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit_clause = match limit {
            Some(n) => {
                query_params.push(Box::new(n));
                "LIMIT ?"
            }
            None => "",
        };

        let sql = format!(
            "SELECT {} FROM transactions {} ORDER BY created_at DESC, id DESC {}",
            TRANSACTION_COLUMNS, where_clause, limit_clause
        );

        let param_refs: Vec<&dyn rusqlite::ToSql> =
            query_params.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(param_refs.as_slice(), Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(transactions)
    }

    /// Count total transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Column order: id, amount, date, description, category, created_at
    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        Ok(Transaction {
            id: row.get(0)?,
            amount: row.get(1)?,
            date: row.get(2)?,
            description: row.get(3)?,
            category: category_column(row, 4)?,
            created_at: row.get(5)?,
        })
    }
}
