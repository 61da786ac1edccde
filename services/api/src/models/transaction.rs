//! Transaction model, payloads, and the monthly summary

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::EntryType;

/// Transaction as returned to clients, with the category name joined in
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub category_name: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: EntryType,
    pub date: NaiveDate,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

/// Transaction creation payload; the owner is always the authenticated
/// user and is not representable here
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub category_id: Uuid,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: EntryType,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

/// Transaction update payload (partial — absent fields keep their value)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTransaction {
    pub category_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    #[serde(rename = "type")]
    pub kind: Option<EntryType>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

/// Income/expense totals for one calendar month. The totals go over
/// the wire as JSON numbers, not decimal strings.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MonthlySummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

impl MonthlySummary {
    /// Build a summary from the two totals; the balance is derived
    pub fn new(total_income: Decimal, total_expense: Decimal) -> Self {
        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }
}
