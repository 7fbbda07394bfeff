//! Spending analytics
//!
//! Pure aggregation over already-loaded transactions and budgets. Nothing in
//! here touches the database or the clock; callers pick the month and load the
//! snapshot, then hand slices in.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{
    Budget, BudgetInsight, Category, CategoryExpense, DashboardStats,
    MonthlyExpense, Transaction,
};

/// Total spend per month, ascending by month key.
///
/// Months are the textual `YYYY-MM` prefix of each date, so ordering is plain
/// string ordering (chronological for well-formed dates).
pub fn monthly_expenses(transactions: &[Transaction]) -> Vec<MonthlyExpense> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for tx in transactions {
        *totals.entry(tx.month_key()).or_insert(0.0) += tx.amount;
    }

    totals
        .into_iter()
        .map(|(month, amount)| MonthlyExpense {
            month: month.to_string(),
            amount,
        })
        .collect()
}

/// Spend per category with its rounded share of the grand total.
///
/// Only categories present in the input appear. Largest amount first; equal
/// amounts keep the order in which their category was first seen.
pub fn category_expenses(transactions: &[Transaction]) -> Vec<CategoryExpense> {
    // Insertion-ordered accumulators so the tie order is deterministic
    let mut groups: Vec<(Category, f64)> = Vec::new();
    let mut grand_total = 0.0;

    for tx in transactions {
        match groups.iter_mut().find(|(c, _)| *c == tx.category) {
            Some((_, amount)) => *amount += tx.amount,
            None => groups.push((tx.category, tx.amount)),
        }
        grand_total += tx.amount;
    }

    let mut expenses: Vec<CategoryExpense> = groups
        .into_iter()
        .map(|(category, amount)| CategoryExpense {
            category,
            amount,
            percentage: percent_of(amount, grand_total),
        })
        .collect();

    // sort_by is stable: ties stay in first-seen order
    expenses.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    expenses
}

/// One insight per budget, in input order.
///
/// A zero `monthly_budget` reports 0% used; it is over budget only when
/// something was spent against it.
pub fn budget_insights(budgets: &[Budget]) -> Vec<BudgetInsight> {
    budgets.iter().map(budget_insight).collect()
}

/// Budget-versus-actual for a single budget record
pub fn budget_insight(budget: &Budget) -> BudgetInsight {
    let remaining = budget.monthly_budget - budget.current_spent;

    let (is_over_budget, percentage_used) = if budget.monthly_budget == 0.0 {
        (budget.current_spent > 0.0, 0)
    } else {
        (
            remaining < 0.0,
            percent_of(budget.current_spent, budget.monthly_budget),
        )
    };

    BudgetInsight {
        category: budget.category,
        budgeted: budget.monthly_budget,
        spent: budget.current_spent,
        remaining,
        is_over_budget,
        percentage_used,
    }
}

/// Transactions whose date starts with `month_key`
pub fn filter_by_month(transactions: &[Transaction], month_key: &str) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.date.starts_with(month_key))
        .cloned()
        .collect()
}

/// Sum of all amounts (0 for no transactions)
pub fn total_amount(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|tx| tx.amount).sum()
}

/// Spend for one category within one month
pub fn category_spent(transactions: &[Transaction], category: Category, month_key: &str) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.category == category && tx.date.starts_with(month_key))
        .map(|tx| tx.amount)
        .sum()
}

/// `YYYY-MM` key for a calendar date
pub fn month_key_of(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Headline dashboard numbers for `current_month`
pub fn dashboard_stats(
    transactions: &[Transaction],
    budgets: &[Budget],
    current_month: &str,
) -> DashboardStats {
    let current_month_expenses = transactions
        .iter()
        .filter(|tx| tx.date.starts_with(current_month))
        .map(|tx| tx.amount)
        .sum();

    DashboardStats {
        total_expenses: total_amount(transactions),
        current_month_expenses,
        total_budget: budgets.iter().map(|b| b.monthly_budget).sum(),
        over_budget_count: budget_insights(budgets)
            .iter()
            .filter(|i| i.is_over_budget)
            .count(),
        transaction_count: transactions.len(),
    }
}

/// `round(part / whole * 100)`, half away from zero; 0 when `whole` is 0
fn percent_of(part: f64, whole: f64) -> i64 {
    if whole == 0.0 {
        return 0;
    }
    (part / whole * 100.0).round() as i64
}
