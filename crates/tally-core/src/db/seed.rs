//! Demo data

use tracing::info;

use super::Database;
use crate::error::Result;
use crate::models::{Category, NewBudget, NewTransaction};

const DEMO_MONTH: &str = "2025-01";

const DEMO_TRANSACTIONS: [(f64, &str, &str, Category); 10] = [
    (2500.0, "2025-01-15", "Grocery shopping at Big Bazaar", Category::Food),
    (15000.0, "2025-01-01", "Monthly rent payment", Category::Rent),
    (1200.0, "2025-01-10", "Movie tickets and dinner", Category::Entertainment),
    (3500.0, "2025-01-05", "Flight booking to Mumbai", Category::Travel),
    (850.0, "2025-01-12", "Electricity bill", Category::Bills),
    (1800.0, "2025-01-08", "Doctor consultation", Category::Healthcare),
    (4200.0, "2025-01-14", "New laptop accessories", Category::Shopping),
    (2800.0, "2024-12-28", "Restaurant dinner", Category::Food),
    (1500.0, "2024-12-25", "Christmas gifts", Category::Shopping),
    (900.0, "2024-12-20", "Gas bill", Category::Bills),
];

const DEMO_BUDGETS: [(Category, f64); 8] = [
    (Category::Food, 5000.0),
    (Category::Rent, 15000.0),
    (Category::Entertainment, 2000.0),
    (Category::Travel, 3000.0),
    (Category::Bills, 1500.0),
    (Category::Healthcare, 2000.0),
    (Category::Shopping, 4000.0),
    (Category::Other, 1000.0),
];

impl Database {
    /// Load the demo transactions and January 2025 budgets into an empty
    /// database. Returns false (and writes nothing) if transactions exist.
    pub fn seed_demo_data(&self) -> Result<bool> {
        if self.count_transactions()? > 0 {
            info!("Database already has transactions, skipping demo data");
            return Ok(false);
        }

        for (amount, date, description, category) in DEMO_TRANSACTIONS {
            self.insert_transaction(&NewTransaction {
                amount,
                date: date.to_string(),
                description: description.to_string(),
                category,
            })?;
        }

        for (category, monthly_budget) in DEMO_BUDGETS {
            self.upsert_budget(&NewBudget {
                category,
                monthly_budget,
                month: DEMO_MONTH.to_string(),
            })?;
        }

        info!(
            transactions = DEMO_TRANSACTIONS.len(),
            budgets = DEMO_BUDGETS.len(),
            "Seeded demo data"
        );
        Ok(true)
    }
}
