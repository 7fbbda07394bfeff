//! Report command implementations (monthly, categories, budgets, dashboard)

use anyhow::Result;
use tally_core::db::Database;
use tally_core::input::validate_month;
use tally_core::models::BudgetInsight;

use super::{bar, month_or_current, truncate};

/// Print `value` as pretty JSON
fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn cmd_report_monthly(db: &Database, json: bool) -> Result<()> {
    let report = db.analytics(None)?;
    if json {
        return print_json(&report.monthly_expenses);
    }

    if report.monthly_expenses.is_empty() {
        println!("No spending recorded yet.");
        return Ok(());
    }

    println!();
    println!("📅 Monthly Spending");
    println!("   ─────────────────────────────────────────────");
    for entry in &report.monthly_expenses {
        println!("   {} │ {:>12.2}", entry.month, entry.amount);
    }

    Ok(())
}

pub fn cmd_report_categories(db: &Database, month: Option<&str>, json: bool) -> Result<()> {
    let month = month.map(validate_month).transpose()?;
    let report = db.analytics(month.as_deref())?;
    if json {
        return print_json(&report.category_expenses);
    }

    let scope = month.as_deref().unwrap_or("all time");
    if report.category_expenses.is_empty() {
        println!("No spending recorded for {}.", scope);
        return Ok(());
    }

    println!();
    println!("📊 Spending by Category ({})", scope);
    println!("   ─────────────────────────────────────────────────────────────");
    for entry in &report.category_expenses {
        println!(
            "   {:<13} │ {:>12.2} │ {:>3}% {}",
            entry.category.as_str(),
            entry.amount,
            entry.percentage,
            bar(entry.percentage, 20)
        );
    }

    Ok(())
}

pub fn cmd_report_budgets(db: &Database, month: Option<&str>, json: bool) -> Result<()> {
    let month = month_or_current(month)?;
    let insights = db.budget_insights(&month)?;
    if json {
        return print_json(&insights);
    }

    if insights.is_empty() {
        println!("No budgets for {}.", month);
        return Ok(());
    }

    println!();
    println!("🎯 Budget vs Actual ({})", month);
    println!("   ─────────────────────────────────────────────────────────────");
    print_insights(&insights);

    Ok(())
}

fn print_insights(insights: &[BudgetInsight]) {
    for insight in insights {
        let marker = if insight.is_over_budget { "⚠️ " } else { "  " };
        println!(
            "   {} {:<13} │ {:>10.2} / {:>10.2} │ {:>4}% │ left {:>10.2}",
            marker,
            insight.category.as_str(),
            insight.spent,
            insight.budgeted,
            insight.percentage_used,
            insight.remaining
        );
    }
}

pub fn cmd_dashboard(db: &Database, month: Option<&str>, json: bool) -> Result<()> {
    let month = month_or_current(month)?;
    let dashboard = db.dashboard(&month)?;
    if json {
        return print_json(&dashboard);
    }

    let stats = &dashboard.stats;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│           💰 Tally Dashboard            │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Month:            {}", dashboard.month);
    println!("  Total spent:      {:.2}", stats.total_expenses);
    println!("  This month:       {:.2}", stats.current_month_expenses);
    println!("  Total budget:     {:.2}", stats.total_budget);
    println!("  Over budget:      {}", stats.over_budget_count);
    println!("  Transactions:     {}", stats.transaction_count);

    if !dashboard.category_expenses.is_empty() {
        println!();
        println!("  Top categories this month:");
        for entry in dashboard.category_expenses.iter().take(5) {
            println!(
                "    {:<13} {:>10.2} {:>3}%",
                entry.category.as_str(),
                entry.amount,
                entry.percentage
            );
        }
    }

    if !dashboard.budget_insights.is_empty() {
        println!();
        println!("  Budgets:");
        print_insights(&dashboard.budget_insights);
    }

    if !dashboard.recent_transactions.is_empty() {
        println!();
        println!("  Recent transactions:");
        for tx in &dashboard.recent_transactions {
            println!(
                "    {} │ {:>10.2} │ {}",
                tx.date,
                tx.amount,
                truncate(&tx.description, 35)
            );
        }
    }

    println!();
    Ok(())
}
