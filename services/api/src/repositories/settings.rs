//! Income setting repository
//!
//! Each user has exactly one income setting row, created lazily on
//! first access instead of failing with NotFound.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::IncomeSetting;

/// Income setting repository
#[derive(Clone)]
pub struct IncomeSettingRepository {
    pool: PgPool,
}

impl IncomeSettingRepository {
    /// Create a new income setting repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return the user's income setting, inserting a zero-income row
    /// first if this is the first access
    pub async fn get_or_create(&self, user_id: Uuid) -> ApiResult<IncomeSetting> {
        sqlx::query(
            r#"
            INSERT INTO income_settings (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        let setting = sqlx::query_as::<_, IncomeSetting>(
            r#"
            SELECT user_id, monthly_income
            FROM income_settings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(setting)
    }

    /// Set the user's monthly income, creating the row if needed
    pub async fn upsert(&self, user_id: Uuid, monthly_income: Decimal) -> ApiResult<IncomeSetting> {
        let setting = sqlx::query_as::<_, IncomeSetting>(
            r#"
            INSERT INTO income_settings (user_id, monthly_income)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET monthly_income = EXCLUDED.monthly_income
            RETURNING user_id, monthly_income
            "#,
        )
        .bind(user_id)
        .bind(monthly_income)
        .fetch_one(&self.pool)
        .await?;

        Ok(setting)
    }
}
