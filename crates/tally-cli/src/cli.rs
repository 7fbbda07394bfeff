//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track spending against monthly budgets
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Self-hosted expense and budget tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Load demo transactions and January 2025 budgets into an empty database
    Seed,

    /// Record a transaction
    Add {
        /// Amount spent (positive number)
        #[arg(short, long)]
        amount: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        /// What the money was spent on
        #[arg(short, long)]
        description: String,

        /// Category: Food, Rent, Travel, Entertainment, Bills, Healthcare, Shopping, Other
        #[arg(short, long)]
        category: String,
    },

    /// Change fields of an existing transaction
    Edit {
        /// Transaction ID
        id: i64,

        #[arg(short, long)]
        amount: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },

    /// Manage monthly budgets
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },

    /// List transactions, newest first
    Transactions {
        /// Maximum number to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Only this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only dates starting with this prefix (e.g. 2025-01)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Spending reports
    Report {
        #[command(subcommand)]
        report: ReportType,
    },

    /// Show the dashboard summary for a month
    Dashboard {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Recompute cached budget spend from transactions
    Rebuild,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory of static files to serve (web UI)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Create or update the budget for a category and month
    Set {
        #[arg(short, long)]
        category: String,

        /// Monthly ceiling (0 or greater)
        #[arg(short, long)]
        amount: String,

        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// List budgets for a month
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Total spending per month, oldest first
    Monthly {
        #[arg(long)]
        json: bool,
    },

    /// Spending by category with share of total
    Categories {
        /// Restrict to one month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Budget versus actual for a month
    Budgets {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        #[arg(long)]
        json: bool,
    },
}
