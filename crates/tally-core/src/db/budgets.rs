//! Budget operations

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{category_column, Database};
use crate::error::Result;
use crate::models::{Budget, Category, NewBudget};

impl Database {
    /// Budgets for a month, ordered by category name
    pub fn list_budgets(&self, month: &str) -> Result<Vec<Budget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, category, monthly_budget, current_spent, month
            FROM budgets
            WHERE month = ?1
            ORDER BY category
            "#,
        )?;

        let budgets = stmt
            .query_map(params![month], Self::row_to_budget)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(budgets)
    }

    /// Get the budget for one category and month
    pub fn get_budget(&self, category: Category, month: &str) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        Self::get_budget_with_conn(&conn, category, month)
    }

    fn get_budget_with_conn(
        conn: &Connection,
        category: Category,
        month: &str,
    ) -> Result<Option<Budget>> {
        let budget = conn
            .query_row(
                r#"
                SELECT id, category, monthly_budget, current_spent, month
                FROM budgets
                WHERE category = ?1 AND month = ?2
                "#,
                params![category.as_str(), month],
                Self::row_to_budget,
            )
            .optional()?;
        Ok(budget)
    }

    /// Create or replace the budget for (category, month).
    ///
    /// A new record's `current_spent` is computed from the stored
    /// transactions; an existing record keeps its id.
    pub fn upsert_budget(&self, budget: &NewBudget) -> Result<Budget> {
        let mut conn = self.conn()?;
        let sql_tx = conn.transaction()?;

        sql_tx.execute(
            r#"
            INSERT INTO budgets (category, monthly_budget, month)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(category, month) DO UPDATE SET
                monthly_budget = excluded.monthly_budget
            "#,
            params![budget.category.as_str(), budget.monthly_budget, budget.month],
        )?;
        Self::refresh_budget_spent_with_conn(&sql_tx, budget.category, &budget.month)?;

        let stored = Self::get_budget_with_conn(&sql_tx, budget.category, &budget.month)?
            .ok_or_else(|| rusqlite::Error::QueryReturnedNoRows)?;
        sql_tx.commit()?;

        debug!(
            category = %budget.category,
            month = %budget.month,
            amount = budget.monthly_budget,
            "Budget saved"
        );
        Ok(stored)
    }

    /// Overwrite the cached spend for (category, month).
    ///
    /// Returns the updated record, or `None` if no such budget exists.
    pub fn update_budget_spent(
        &self,
        category: Category,
        month: &str,
        amount: f64,
    ) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE budgets SET current_spent = ?1 WHERE category = ?2 AND month = ?3",
            params![amount, category.as_str(), month],
        )?;

        if updated == 0 {
            return Ok(None);
        }
        Self::get_budget_with_conn(&conn, category, month)
    }

    /// Recompute the cached spend for (category, month) from transactions
    pub fn refresh_budget_spent(&self, category: Category, month: &str) -> Result<f64> {
        let conn = self.conn()?;
        Self::refresh_budget_spent_with_conn(&conn, category, month)
    }

    /// Recompute the cached spend of every budget. Returns how many were updated.
    pub fn refresh_all_budget_spent(&self) -> Result<usize> {
        let conn = self.conn()?;
        let updated = conn.execute(
            r#"
            UPDATE budgets SET current_spent = (
                SELECT COALESCE(SUM(t.amount), 0)
                FROM transactions t
                WHERE t.category = budgets.category
                  AND substr(t.date, 1, length(budgets.month)) = budgets.month
            )
            "#,
            [],
        )?;

        info!(budgets = updated, "Rebuilt cached budget spend");
        Ok(updated)
    }

    /// Recompute one cached spend on an existing connection.
    ///
    /// Callers inside a SQLite transaction pass it here so the write and the
    /// refresh commit together.
    pub(crate) fn refresh_budget_spent_with_conn(
        conn: &Connection,
        category: Category,
        month: &str,
    ) -> Result<f64> {
        let spent: f64 = conn.query_row(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM transactions
            WHERE category = ?1 AND substr(date, 1, length(?2)) = ?2
            "#,
            params![category.as_str(), month],
            |row| row.get(0),
        )?;

        conn.execute(
            "UPDATE budgets SET current_spent = ?1 WHERE category = ?2 AND month = ?3",
            params![spent, category.as_str(), month],
        )?;
        Ok(spent)
    }

    fn row_to_budget(row: &rusqlite::Row) -> rusqlite::Result<Budget> {
        Ok(Budget {
            id: row.get(0)?,
            category: category_column(row, 1)?,
            monthly_budget: row.get(2)?,
            current_spent: row.get(3)?,
            month: row.get(4)?,
        })
    }
}
