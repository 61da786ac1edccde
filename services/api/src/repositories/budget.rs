//! Budget repository: monthly ceilings per category, with the actual
//! spend computed against each ceiling at read time

use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, is_foreign_key_violation, is_unique_violation};
use crate::models::{BudgetResponse, NewBudget, UpdateBudget};

const SELECT_BUDGET: &str = r#"
    SELECT b.id, b.user_id, b.category_id, c.name AS category_name,
           b.amount, b.month, b.year,
           COALESCE((
               SELECT SUM(t.amount)
               FROM transactions t
               WHERE t.user_id = b.user_id
                 AND t.category_id = b.category_id
                 AND t.kind = 'expense'
                 AND EXTRACT(MONTH FROM t.date) = b.month
                 AND EXTRACT(YEAR FROM t.date) = b.year
           ), 0) AS spent_amount
    FROM budgets b
    JOIN categories c ON c.id = b.category_id
"#;

const DUPLICATE_BUDGET: &str = "Budget already exists for this category and month";

/// Budget repository
#[derive(Clone)]
pub struct BudgetRepository {
    pool: PgPool,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the user's budgets, newest period first
    pub async fn list_for_user(&self, user_id: Uuid) -> ApiResult<Vec<BudgetResponse>> {
        let budgets = sqlx::query_as::<_, BudgetResponse>(&format!(
            "{SELECT_BUDGET} WHERE b.user_id = $1 ORDER BY b.year DESC, b.month DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(budgets)
    }

    /// Create a budget owned by the given user. The storage-level
    /// uniqueness of (user, category, month, year) is surfaced as a
    /// Conflict, never as a raw constraint error.
    pub async fn create(&self, user_id: Uuid, new_budget: &NewBudget) -> ApiResult<BudgetResponse> {
        let row = sqlx::query(
            r#"
            INSERT INTO budgets (user_id, category_id, amount, month, year)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(new_budget.category_id)
        .bind(new_budget.amount)
        .bind(new_budget.month)
        .bind(new_budget.year)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict(DUPLICATE_BUDGET.to_string())
            } else if is_foreign_key_violation(&e) {
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

    /// Find one of the user's budgets by ID
    pub async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> ApiResult<Option<BudgetResponse>> {
        let budget = sqlx::query_as::<_, BudgetResponse>(&format!(
            "{SELECT_BUDGET} WHERE b.id = $1 AND b.user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(budget)
    }

    /// Apply a partial update to one of the user's budgets
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &UpdateBudget,
    ) -> ApiResult<Option<BudgetResponse>> {
        let result = sqlx::query(
            r#"
            UPDATE budgets
            SET category_id = COALESCE($3, category_id),
                amount = COALESCE($4, amount),
                month = COALESCE($5, month),
                year = COALESCE($6, year)
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(update.category_id)
        .bind(update.amount)
        .bind(update.month)
        .bind(update.year)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict(DUPLICATE_BUDGET.to_string())
            } else if is_foreign_key_violation(&e) {
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

    /// Delete one of the user's budgets
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM budgets WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
