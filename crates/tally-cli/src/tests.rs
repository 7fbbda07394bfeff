//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use tally_core::db::Database;
use tally_core::models::Category;

use crate::commands::{self, bar, truncate, TransactionEdit};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn setup_seeded_db() -> Database {
    let db = Database::in_memory().unwrap();
    db.seed_demo_data().unwrap();
    db
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer description", 10), "a longe...");
}

#[test]
fn test_truncate_multibyte() {
    // Must not split inside a character
    assert_eq!(truncate("café au lait ☕☕☕", 8), "café ...");
}

#[test]
fn test_bar() {
    assert_eq!(bar(0, 10), "░░░░░░░░░░");
    assert_eq!(bar(50, 10), "█████░░░░░");
    assert_eq!(bar(250, 10), "██████████");
    assert_eq!(bar(-5, 4), "░░░░");
}

#[test]
fn test_month_or_current() {
    assert_eq!(commands::month_or_current(Some("2025-01")).unwrap(), "2025-01");
    assert!(commands::month_or_current(Some("January")).is_err());
    assert_eq!(commands::month_or_current(None).unwrap().len(), 7);
}

// ========== Core Command Tests ==========

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.db");

    commands::cmd_init(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_cmd_seed_then_rebuild() {
    let db = setup_test_db();
    commands::cmd_seed(&db).unwrap();
    assert_eq!(db.count_transactions().unwrap(), 10);

    // Second seed is a no-op
    commands::cmd_seed(&db).unwrap();
    assert_eq!(db.count_transactions().unwrap(), 10);

    db.update_budget_spent(Category::Food, "2025-01", 0.0).unwrap();
    commands::cmd_rebuild(&db).unwrap();
    let food = db.get_budget(Category::Food, "2025-01").unwrap().unwrap();
    assert_eq!(food.current_spent, 2500.0);
}

// ========== Transaction Command Tests ==========

#[test]
fn test_cmd_add() {
    let db = setup_test_db();
    commands::cmd_add(&db, "250", Some("2025-03-04"), "Lunch", "food").unwrap();

    let txs = db.list_all_transactions().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].amount, 250.0);
    assert_eq!(txs[0].category, Category::Food);
    assert_eq!(txs[0].date, "2025-03-04");
}

#[test]
fn test_cmd_add_defaults_date_to_today() {
    let db = setup_test_db();
    commands::cmd_add(&db, "12.5", None, "Coffee", "Food").unwrap();

    let txs = db.list_all_transactions().unwrap();
    assert_eq!(txs[0].date.len(), 10);
}

#[test]
fn test_cmd_add_rejects_bad_input() {
    let db = setup_test_db();
    assert!(commands::cmd_add(&db, "abc", Some("2025-03-04"), "Lunch", "Food").is_err());
    assert!(commands::cmd_add(&db, "10", Some("2025-03-40"), "Lunch", "Food").is_err());
    assert!(commands::cmd_add(&db, "10", Some("2025-03-04"), "Lunch", "Snacks").is_err());
    assert!(commands::cmd_add(&db, "10", Some("2025-03-04"), "  ", "Food").is_err());
    assert_eq!(db.count_transactions().unwrap(), 0);
}

#[test]
fn test_cmd_edit_changes_only_given_fields() {
    let db = setup_test_db();
    commands::cmd_add(&db, "100", Some("2025-03-04"), "Taxi", "Travel").unwrap();
    let id = db.list_all_transactions().unwrap()[0].id;

    let changes = TransactionEdit {
        amount: Some("120".to_string()),
        category: Some("Other".to_string()),
        ..Default::default()
    };
    commands::cmd_edit(&db, id, &changes).unwrap();

    let tx = db.get_transaction(id).unwrap().unwrap();
    assert_eq!(tx.amount, 120.0);
    assert_eq!(tx.category, Category::Other);
    assert_eq!(tx.description, "Taxi");
    assert_eq!(tx.date, "2025-03-04");
}

#[test]
fn test_cmd_edit_and_delete_unknown_id() {
    let db = setup_test_db();
    assert!(commands::cmd_edit(&db, 42, &TransactionEdit::default()).is_err());
    assert!(commands::cmd_delete(&db, 42).is_err());
}

#[test]
fn test_cmd_delete() {
    let db = setup_seeded_db();
    let id = db.list_all_transactions().unwrap()[0].id;

    commands::cmd_delete(&db, id).unwrap();
    assert!(db.get_transaction(id).unwrap().is_none());
}

#[test]
fn test_cmd_transactions_list() {
    let db = setup_seeded_db();
    assert!(commands::cmd_transactions_list(&db, 5, None, None).is_ok());
    assert!(commands::cmd_transactions_list(&db, 5, Some("Food"), Some("2025-01")).is_ok());
    assert!(commands::cmd_transactions_list(&db, 5, Some("Snacks"), None).is_err());
}

#[test]
fn test_cmd_transactions_list_empty() {
    let db = setup_test_db();
    assert!(commands::cmd_transactions_list(&db, 20, None, None).is_ok());
}

// ========== Budget Command Tests ==========

#[test]
fn test_cmd_budget_set_and_list() {
    let db = setup_seeded_db();
    commands::cmd_budget_set(&db, "Food", "6000", Some("2025-01")).unwrap();

    let food = db.get_budget(Category::Food, "2025-01").unwrap().unwrap();
    assert_eq!(food.monthly_budget, 6000.0);
    assert_eq!(food.current_spent, 2500.0);

    assert!(commands::cmd_budget_list(&db, Some("2025-01")).is_ok());
    assert!(commands::cmd_budget_list(&db, Some("2031-01")).is_ok());
}

#[test]
fn test_cmd_budget_set_allows_zero_rejects_negative() {
    let db = setup_test_db();
    commands::cmd_budget_set(&db, "Other", "0", Some("2025-01")).unwrap();
    assert!(commands::cmd_budget_set(&db, "Other", "-1", Some("2025-01")).is_err());
    assert!(commands::cmd_budget_set(&db, "Other", "10", Some("2025-1")).is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_reports() {
    let db = setup_seeded_db();
    assert!(commands::cmd_report_monthly(&db, false).is_ok());
    assert!(commands::cmd_report_monthly(&db, true).is_ok());
    assert!(commands::cmd_report_categories(&db, None, false).is_ok());
    assert!(commands::cmd_report_categories(&db, Some("2025-01"), true).is_ok());
    assert!(commands::cmd_report_budgets(&db, Some("2025-01"), false).is_ok());
    assert!(commands::cmd_report_budgets(&db, Some("2025-01"), true).is_ok());
}

#[test]
fn test_cmd_reports_empty_database() {
    let db = setup_test_db();
    assert!(commands::cmd_report_monthly(&db, false).is_ok());
    assert!(commands::cmd_report_categories(&db, None, false).is_ok());
    assert!(commands::cmd_report_budgets(&db, Some("2025-01"), false).is_ok());
}

#[test]
fn test_cmd_report_categories_rejects_bad_month() {
    let db = setup_seeded_db();
    assert!(commands::cmd_report_categories(&db, Some("2025/01"), false).is_err());
}

#[test]
fn test_cmd_dashboard() {
    let db = setup_seeded_db();
    assert!(commands::cmd_dashboard(&db, Some("2025-01"), false).is_ok());
    assert!(commands::cmd_dashboard(&db, Some("2025-01"), true).is_ok());
    assert!(commands::cmd_dashboard(&db, None, false).is_ok());
}
