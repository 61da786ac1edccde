//! Savings goal model and payloads

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Savings goal entity. `saved_amount` is declarative — it is never
/// recomputed from transactions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub target_amount: Decimal,
    pub saved_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Goal creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub saved_amount: Option<Decimal>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

/// Goal update payload (partial)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGoal {
    pub name: Option<String>,
    pub target_amount: Option<Decimal>,
    pub saved_amount: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
}
