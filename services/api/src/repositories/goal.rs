//! Goal repository: owner-scoped savings goals

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{Goal, NewGoal, UpdateGoal};

/// Goal repository
#[derive(Clone)]
pub struct GoalRepository {
    pool: PgPool,
}

impl GoalRepository {
    /// Create a new goal repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the user's goals, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> ApiResult<Vec<Goal>> {
        let goals = sqlx::query_as::<_, Goal>(
            r#"
            SELECT id, user_id, name, target_amount, saved_amount, deadline, created_at
            FROM goals
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(goals)
    }

    /// Create a goal owned by the given user; saved_amount starts at
    /// zero unless the payload says otherwise
    pub async fn create(&self, user_id: Uuid, new_goal: &NewGoal) -> ApiResult<Goal> {
        let goal = sqlx::query_as::<_, Goal>(
            r#"
            INSERT INTO goals (user_id, name, target_amount, saved_amount, deadline)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, name, target_amount, saved_amount, deadline, created_at
            "#,
        )
        .bind(user_id)
        .bind(&new_goal.name)
        .bind(new_goal.target_amount)
        .bind(new_goal.saved_amount.unwrap_or(Decimal::ZERO))
        .bind(new_goal.deadline)
        .fetch_one(&self.pool)
        .await?;

        Ok(goal)
    }

    /// Find one of the user's goals by ID
    pub async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> ApiResult<Option<Goal>> {
        let goal = sqlx::query_as::<_, Goal>(
            r#"
            SELECT id, user_id, name, target_amount, saved_amount, deadline, created_at
            FROM goals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(goal)
    }

    /// Apply a partial update to one of the user's goals
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &UpdateGoal,
    ) -> ApiResult<Option<Goal>> {
        let goal = sqlx::query_as::<_, Goal>(
            r#"
            UPDATE goals
            SET name = COALESCE($3, name),
                target_amount = COALESCE($4, target_amount),
                saved_amount = COALESCE($5, saved_amount),
                deadline = COALESCE($6, deadline)
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, target_amount, saved_amount, deadline, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&update.name)
        .bind(update.target_amount)
        .bind(update.saved_amount)
        .bind(update.deadline)
        .fetch_optional(&self.pool)
        .await?;

        Ok(goal)
    }

    /// Delete one of the user's goals
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
