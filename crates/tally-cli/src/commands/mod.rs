//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, seed, rebuild) and shared utilities (open_db)
//! - `budgets` - Budget commands (set, list)
//! - `reports` - Report generation commands and the dashboard
//! - `serve` - Web server command
//! - `transactions` - Transaction commands (add, edit, delete, list)

pub mod budgets;
pub mod core;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Text bar for a 0-100 share, capped at `width` cells
pub fn bar(percentage: i64, width: usize) -> String {
    let filled = ((percentage.max(0) as usize) * width / 100).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
