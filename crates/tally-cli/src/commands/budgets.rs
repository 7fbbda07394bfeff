//! Budget command implementations

use anyhow::Result;
use tally_core::db::Database;
use tally_core::input::{parse_budget_amount, parse_category};
use tally_core::models::NewBudget;

use super::month_or_current;

pub fn cmd_budget_set(
    db: &Database,
    category: &str,
    amount: &str,
    month: Option<&str>,
) -> Result<()> {
    let budget = db.upsert_budget(&NewBudget {
        category: parse_category(category)?,
        monthly_budget: parse_budget_amount(amount)?,
        month: month_or_current(month)?,
    })?;

    println!(
        "✅ Budget for {} in {}: {:.2} (spent so far: {:.2})",
        budget.category, budget.month, budget.monthly_budget, budget.current_spent
    );
    Ok(())
}

pub fn cmd_budget_list(db: &Database, month: Option<&str>) -> Result<()> {
    let month = month_or_current(month)?;
    let budgets = db.list_budgets(&month)?;

    if budgets.is_empty() {
        println!("No budgets for {}. Set one with:", month);
        println!("  tally budget set -c Food -a 5000 -m {}", month);
        return Ok(());
    }

    println!();
    println!("💼 Budgets for {}", month);
    println!("   ─────────────────────────────────────────────────────────────");

    for budget in &budgets {
        println!(
            "   {:<13} │ budget {:>10.2} │ spent {:>10.2}",
            budget.category.as_str(),
            budget.monthly_budget,
            budget.current_spent
        );
    }

    let total: f64 = budgets.iter().map(|b| b.monthly_budget).sum();
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   {:<13} │ budget {:>10.2}", "Total", total);

    Ok(())
}
