//! Budget model and payloads

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Budget as returned to clients: the stored ceiling plus the spend
/// computed against it at read time
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BudgetResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub category_name: String,
    pub amount: Decimal,
    pub month: i32,
    pub year: i32,
    /// Sum of the owner's expense transactions in this category, month,
    /// and year; zero when none match
    pub spent_amount: Decimal,
}

/// Budget creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewBudget {
    pub category_id: Uuid,
    pub amount: Decimal,
    pub month: i32,
    pub year: i32,
}

/// Budget update payload (partial)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBudget {
    pub category_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    pub month: Option<i32>,
    pub year: Option<i32>,
}
