//! Category model and the shared income/expense kind

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Whether an entry moves money in or out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "entry_type", rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

/// Category entity — a shared taxonomy, not owner-scoped
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryType,
}

/// Category creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryType,
}

/// Category update payload (partial)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<EntryType>,
}
