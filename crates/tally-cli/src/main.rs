//! Tally CLI - Expense and budget tracker
//!
//! Usage:
//!   tally init                          Initialize database
//!   tally add -a 250 -d Lunch -c Food   Record a transaction
//!   tally report categories             Spending by category
//!   tally serve --port 3000             Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Seed => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_seed(&db)
        }
        Commands::Add {
            amount,
            date,
            description,
            category,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(&db, &amount, date.as_deref(), &description, &category)
        }
        Commands::Edit {
            id,
            amount,
            date,
            description,
            category,
        } => {
            let db = commands::open_db(&cli.db)?;
            let changes = commands::TransactionEdit {
                amount,
                date,
                description,
                category,
            };
            commands::cmd_edit(&db, id, &changes)
        }
        Commands::Delete { id } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_delete(&db, id)
        }
        Commands::Budget { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                BudgetAction::Set {
                    category,
                    amount,
                    month,
                } => commands::cmd_budget_set(&db, &category, &amount, month.as_deref()),
                BudgetAction::List { month } => commands::cmd_budget_list(&db, month.as_deref()),
            }
        }
        Commands::Transactions {
            limit,
            category,
            month,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_transactions_list(&db, limit, category.as_deref(), month.as_deref())
        }
        Commands::Report { report } => {
            let db = commands::open_db(&cli.db)?;
            match report {
                ReportType::Monthly { json } => commands::cmd_report_monthly(&db, json),
                ReportType::Categories { month, json } => {
                    commands::cmd_report_categories(&db, month.as_deref(), json)
                }
                ReportType::Budgets { month, json } => {
                    commands::cmd_report_budgets(&db, month.as_deref(), json)
                }
            }
        }
        Commands::Dashboard { month, json } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_dashboard(&db, month.as_deref(), json)
        }
        Commands::Rebuild => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_rebuild(&db)
        }
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&cli.db, &host, port, static_dir.as_deref()).await,
    }
}
