//! Analytics and dashboard reads
//!
//! Each read takes one snapshot of the stored rows and hands it to the pure
//! functions in `crate::analytics`.

use tracing::debug;

use super::Database;
use crate::analytics;
use crate::error::Result;
use crate::models::{AnalyticsReport, BudgetInsight, Dashboard};

/// How many transactions the dashboard lists
const RECENT_TRANSACTIONS: usize = 5;

impl Database {
    /// Monthly trend over all transactions plus the category breakdown,
    /// restricted to `month` when given
    pub fn analytics(&self, month: Option<&str>) -> Result<AnalyticsReport> {
        let transactions = self.list_all_transactions()?;

        let monthly_expenses = analytics::monthly_expenses(&transactions);
        let category_expenses = match month {
            Some(m) => analytics::category_expenses(&analytics::filter_by_month(&transactions, m)),
            None => analytics::category_expenses(&transactions),
        };

        debug!(
            transactions = transactions.len(),
            months = monthly_expenses.len(),
            "Computed analytics"
        );

        Ok(AnalyticsReport {
            monthly_expenses,
            category_expenses,
        })
    }

    /// Budget-versus-actual for every budget of a month
    pub fn budget_insights(&self, month: &str) -> Result<Vec<BudgetInsight>> {
        let budgets = self.list_budgets(month)?;
        Ok(analytics::budget_insights(&budgets))
    }

    /// Everything the dashboard shows for one month
    pub fn dashboard(&self, month: &str) -> Result<Dashboard> {
        let transactions = self.list_all_transactions()?;
        let budgets = self.list_budgets(month)?;

        let month_transactions = analytics::filter_by_month(&transactions, month);
        let recent_transactions = transactions
            .iter()
            .take(RECENT_TRANSACTIONS)
            .cloned()
            .collect();

        Ok(Dashboard {
            month: month.to_string(),
            stats: analytics::dashboard_stats(&transactions, &budgets, month),
            monthly_expenses: analytics::monthly_expenses(&transactions),
            category_expenses: analytics::category_expenses(&month_transactions),
            budget_insights: analytics::budget_insights(&budgets),
            recent_transactions,
        })
    }
}
