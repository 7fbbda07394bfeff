//! Domain models for Tally
//!
//! Stored entities (`Transaction`, `Budget`) and the derived read models the
//! analytics engine produces. Wire names are camelCase to match the JSON API.

use serde::{Deserialize, Serialize};

/// Spending category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Rent,
    Travel,
    Entertainment,
    Bills,
    Healthcare,
    Shopping,
    Other,
}

impl Category {
    /// Every category, in canonical order
    pub const ALL: [Category; 8] = [
        Self::Food,
        Self::Rent,
        Self::Travel,
        Self::Entertainment,
        Self::Bills,
        Self::Healthcare,
        Self::Shopping,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Rent => "Rent",
            Self::Travel => "Travel",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Healthcare => "Healthcare",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .or_else(|| {
                // Lowercase spellings are accepted for CLI convenience
                Self::ALL
                    .iter()
                    .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            })
            .copied()
            .ok_or_else(|| {
                format!(
                    "Unknown category: {} (valid: {})",
                    s,
                    Self::ALL
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded spending transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    /// Positive amount, currency-agnostic
    pub amount: f64,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub description: String,
    pub category: Category,
    /// RFC 3339 creation timestamp (ordering only)
    pub created_at: String,
}

impl Transaction {
    /// The `YYYY-MM` prefix of `date`.
    ///
    /// Purely textual: a malformed date still yields its first 7 characters.
    pub fn month_key(&self) -> &str {
        month_prefix(&self.date)
    }
}

/// First 7 characters of a date string (the whole string if shorter)
pub fn month_prefix(date: &str) -> &str {
    match date.char_indices().nth(7) {
        Some((idx, _)) => &date[..idx],
        None => date,
    }
}

/// A transaction to be stored (before id/timestamp assignment)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    pub date: String,
    pub description: String,
    pub category: Category,
}

/// A monthly budget for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,
    pub category: Category,
    /// Allocated ceiling for the month
    pub monthly_budget: f64,
    /// Cached spend for (category, month), maintained by the store
    pub current_spent: f64,
    /// `YYYY-MM`
    pub month: String,
}

/// Budget create/update request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    pub category: Category,
    pub monthly_budget: f64,
    pub month: String,
}

// ========== Derived Read Models ==========

/// Total spend for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpense {
    pub month: String,
    pub amount: f64,
}

/// Total spend for one category and its share of the grand total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryExpense {
    pub category: Category,
    pub amount: f64,
    /// Rounded share of the grand total, 0-100
    pub percentage: i64,
}

/// Budget-versus-actual for one budget record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInsight {
    pub category: Category,
    pub budgeted: f64,
    pub spent: f64,
    /// `budgeted - spent`, negative when over budget
    pub remaining: f64,
    pub is_over_budget: bool,
    /// Rounded, unclamped (may exceed 100)
    pub percentage_used: i64,
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_expenses: f64,
    pub current_month_expenses: f64,
    pub total_budget: f64,
    pub over_budget_count: usize,
    pub transaction_count: usize,
}

/// Analytics payload (`GET /api/analytics`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub monthly_expenses: Vec<MonthlyExpense>,
    pub category_expenses: Vec<CategoryExpense>,
}

/// Everything the dashboard view shows for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub month: String,
    pub stats: DashboardStats,
    pub monthly_expenses: Vec<MonthlyExpense>,
    pub category_expenses: Vec<CategoryExpense>,
    pub budget_insights: Vec<BudgetInsight>,
    pub recent_transactions: Vec<Transaction>,
}
