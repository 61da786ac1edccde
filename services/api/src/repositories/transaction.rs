//! Transaction repository: the owner-scoped ledger and the monthly
//! aggregation behind the summary endpoint

use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, is_foreign_key_violation};
use crate::models::{MonthlySummary, NewTransaction, TransactionResponse, UpdateTransaction};

const SELECT_TRANSACTION: &str = r#"
    SELECT t.id, t.user_id, t.category_id, c.name AS category_name,
           t.amount, t.kind, t.date, t.note, t.created_at
    FROM transactions t
    JOIN categories c ON c.id = t.category_id
"#;

/// Transaction repository
#[derive(Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List a user's transactions, most recent date first. Tie order
    /// between same-date rows is whatever the storage returns.
    pub async fn list_for_user(&self, user_id: Uuid) -> ApiResult<Vec<TransactionResponse>> {
        let transactions = sqlx::query_as::<_, TransactionResponse>(&format!(
            "{SELECT_TRANSACTION} WHERE t.user_id = $1 ORDER BY t.date DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// Create a transaction owned by the given user
    pub async fn create(
        &self,
        user_id: Uuid,
        new_transaction: &NewTransaction,
    ) -> ApiResult<TransactionResponse> {
        let row = sqlx::query(
            r#"
            INSERT INTO transactions (user_id, category_id, amount, kind, date, note)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(new_transaction.category_id)
        .bind(new_transaction.amount)
        .bind(new_transaction.kind)
        .bind(new_transaction.date)
        .bind(new_transaction.note.as_deref().unwrap_or(""))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                ApiError::Validation("Unknown category".to_string())
            } else {
                e.into()
            }
        })?;

        let id: Uuid = row.get("id");
        self.find_for_user(user_id, id)
            .await?
            .ok_or(ApiError::InternalServerError)
    }

    /// Find one of the user's transactions by ID
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> ApiResult<Option<TransactionResponse>> {
        let transaction = sqlx::query_as::<_, TransactionResponse>(&format!(
            "{SELECT_TRANSACTION} WHERE t.id = $1 AND t.user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    /// Apply a partial update to one of the user's transactions
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &UpdateTransaction,
    ) -> ApiResult<Option<TransactionResponse>> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET category_id = COALESCE($3, category_id),
                amount = COALESCE($4, amount),
                kind = COALESCE($5, kind),
                date = COALESCE($6, date),
                note = COALESCE($7, note)
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(update.category_id)
        .bind(update.amount)
        .bind(update.kind)
        .bind(update.date)
        .bind(&update.note)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                ApiError::Validation("Unknown category".to_string())
            } else {
                e.into()
            }
        })?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_for_user(user_id, id).await
    }

    /// Delete one of the user's transactions
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Total income, total expense, and balance for one calendar month
    /// of the user's ledger; all zeros when the month is empty
    pub async fn monthly_summary(
        &self,
        user_id: Uuid,
        month: i32,
        year: i32,
    ) -> ApiResult<MonthlySummary> {
        let row = sqlx::query(
            r#"
            SELECT
                COALESCE(SUM(amount) FILTER (WHERE kind = 'income'), 0) AS total_income,
                COALESCE(SUM(amount) FILTER (WHERE kind = 'expense'), 0) AS total_expense
            FROM transactions
            WHERE user_id = $1
              AND EXTRACT(MONTH FROM date) = $2
              AND EXTRACT(YEAR FROM date) = $3
            "#,
        )
        .bind(user_id)
        .bind(month)
        .bind(year)
        .fetch_one(&self.pool)
        .await?;

        let total_income: Decimal = row.get("total_income");
        let total_expense: Decimal = row.get("total_expense");

        Ok(MonthlySummary::new(total_income, total_expense))
    }
}
