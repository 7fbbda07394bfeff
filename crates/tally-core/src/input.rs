//! Input parsing and validation at the request boundary
//!
//! The analytics engine trusts its inputs; everything that arrives from a
//! request body or the command line goes through here first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Category;

/// An amount as sent by a client: either a JSON number or numeric text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Validated positive amount
    pub fn value(&self) -> Result<f64> {
        match self {
            Self::Number(n) => check_amount(*n),
            Self::Text(s) => parse_amount(s),
        }
    }

    /// Validated non-negative budget amount
    pub fn budget_value(&self) -> Result<f64> {
        match self {
            Self::Number(n) => check_budget_amount(*n),
            Self::Text(s) => parse_budget_amount(s),
        }
    }

    /// Blank text counts as absent
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

/// Parse a positive, finite amount from text
pub fn parse_amount(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| Error::InvalidData(format!("Amount is not a number: {:?}", trimmed)))?;
    check_amount(value)
}

fn check_amount(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::InvalidData("Amount must be a finite number".to_string()));
    }
    if value <= 0.0 {
        return Err(Error::InvalidData(
            "Amount must be greater than 0".to_string(),
        ));
    }
    Ok(value)
}

/// Parse a budget ceiling from text; zero is allowed
pub fn parse_budget_amount(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| Error::InvalidData(format!("Budget is not a number: {:?}", trimmed)))?;
    check_budget_amount(value)
}

fn check_budget_amount(value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidData(
            "Budget must be a finite number, 0 or greater".to_string(),
        ));
    }
    Ok(value)
}

/// Parse a category name
pub fn parse_category(s: &str) -> Result<Category> {
    s.parse().map_err(Error::InvalidData)
}

/// Check a `YYYY-MM-DD` date, returning it in canonical form
pub fn validate_date(s: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        Error::InvalidData(format!("Invalid date: {:?} (use YYYY-MM-DD)", s))
    })?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Check a `YYYY-MM` month key
pub fn validate_month(s: &str) -> Result<String> {
    let trimmed = s.trim();
    let invalid = || Error::InvalidData(format!("Invalid month: {:?} (use YYYY-MM)", s));

    if trimmed.len() != 7 {
        return Err(invalid());
    }
    let first_day = NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
        .map_err(|_| invalid())?;
    Ok(first_day.format("%Y-%m").to_string())
}

/// Unwrap a required field, treating empty strings as missing
pub fn require<T: Present>(field: &str, value: Option<T>) -> Result<T> {
    match value {
        Some(v) if v.is_present() => Ok(v),
        _ => Err(Error::MissingField(field.to_string())),
    }
}

/// Whether a supplied value counts as "provided"
pub trait Present {
    fn is_present(&self) -> bool;
}

impl Present for String {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Present for AmountInput {
    fn is_present(&self) -> bool {
        !self.is_blank()
    }
}
