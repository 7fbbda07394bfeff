//! Transaction command implementations

use anyhow::Result;
use chrono::Local;
use tally_core::db::Database;
use tally_core::input::{parse_amount, parse_category, validate_date};
use tally_core::models::NewTransaction;

use super::truncate;

/// Fields to change on `tally edit`; `None` keeps the stored value
#[derive(Debug, Default)]
pub struct TransactionEdit {
    pub amount: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

pub fn cmd_add(
    db: &Database,
    amount: &str,
    date: Option<&str>,
    description: &str,
    category: &str,
) -> Result<()> {
    let description = description.trim();
    if description.is_empty() {
        anyhow::bail!("Description cannot be empty");
    }

    let date = match date {
        Some(d) => validate_date(d)?,
        None => Local::now().date_naive().format("%Y-%m-%d").to_string(),
    };

    let tx = db.insert_transaction(&NewTransaction {
        amount: parse_amount(amount)?,
        date,
        description: description.to_string(),
        category: parse_category(category)?,
    })?;

    println!(
        "✅ Recorded #{}: {} {:.2} ({}) on {}",
        tx.id, tx.category, tx.amount, tx.description, tx.date
    );
    Ok(())
}

pub fn cmd_edit(db: &Database, id: i64, changes: &TransactionEdit) -> Result<()> {
    let existing = db
        .get_transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    let updated = NewTransaction {
        amount: match &changes.amount {
            Some(a) => parse_amount(a)?,
            None => existing.amount,
        },
        date: match &changes.date {
            Some(d) => validate_date(d)?,
            None => existing.date,
        },
        description: match &changes.description {
            Some(d) if !d.trim().is_empty() => d.trim().to_string(),
            Some(_) => anyhow::bail!("Description cannot be empty"),
            None => existing.description,
        },
        category: match &changes.category {
            Some(c) => parse_category(c)?,
            None => existing.category,
        },
    };

    let tx = db.update_transaction(id, &updated)?;
    println!(
        "✅ Updated #{}: {} {:.2} ({}) on {}",
        tx.id, tx.category, tx.amount, tx.description, tx.date
    );
    Ok(())
}

pub fn cmd_delete(db: &Database, id: i64) -> Result<()> {
    let tx = db
        .get_transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    db.delete_transaction(id)?;
    println!("🗑️  Deleted #{}: {} ({:.2})", tx.id, tx.description, tx.amount);
    Ok(())
}

pub fn cmd_transactions_list(
    db: &Database,
    limit: i64,
    category: Option<&str>,
    month: Option<&str>,
) -> Result<()> {
    let category = category.map(parse_category).transpose()?;
    let transactions = db.search_transactions(category, month, Some(limit.max(1)))?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  tally add -a 250 -d \"Lunch\" -c Food");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        println!(
            "   [{:>4}] {} │ {:>10.2} │ {:<13} │ {}",
            tx.id,
            tx.date,
            tx.amount,
            tx.category.as_str(),
            truncate(&tx.description, 35)
        );
    }

    Ok(())
}
