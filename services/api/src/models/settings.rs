//! Income setting and user settings payloads

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-user monthly income record, created lazily on first access
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IncomeSetting {
    pub user_id: Uuid,
    pub monthly_income: Decimal,
}

/// Income setting update payload
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIncomeSetting {
    pub monthly_income: Decimal,
}

/// Nested profile fields exposed through the settings endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Profile {
    pub avatar: Option<String>,
}

/// User settings as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct UserSettings {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile: Profile,
}

/// Profile update payload
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdate {
    pub avatar: Option<String>,
}

/// User settings update payload (partial — only present fields are
/// overwritten; the profile avatar is applied in the same transaction)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserSettings {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile: Option<ProfileUpdate>,
}
