//! Category repository: the shared income/expense taxonomy
//!
//! Categories are global, keyed naturally by (name, kind). Rows
//! referenced by transactions or budgets are protected from deletion.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, is_foreign_key_violation, is_unique_violation};
use crate::models::{Category, EntryType, NewCategory, UpdateCategory};

/// Category repository
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every category
    pub async fn list(&self) -> ApiResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, kind
            FROM categories
            ORDER BY name, kind
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Create a category; (name, kind) is the natural key
    pub async fn create(&self, new_category: &NewCategory) -> ApiResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, kind)
            VALUES ($1, $2)
            RETURNING id, name, kind
            "#,
        )
        .bind(&new_category.name)
        .bind(new_category.kind)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("Category already exists".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(category)
    }

    /// Find a category by ID
    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, kind
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Apply a partial update to a category
    pub async fn update(&self, id: Uuid, update: &UpdateCategory) -> ApiResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                kind = COALESCE($3, kind)
            WHERE id = $1
            RETURNING id, name, kind
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(update.kind)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("Category already exists".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(category)
    }

    /// Delete a category. Referenced categories are protected: the
    /// foreign-key violation surfaces as Conflict, the rows stay.
    pub async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    ApiError::Conflict(
                        "Category is referenced by transactions or budgets".to_string(),
                    )
                } else {
                    e.into()
                }
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Ensure every (name, kind) pair in the catalogue exists; returns
    /// the number of newly inserted rows. Existing pairs are skipped
    /// silently, so a second run inserts nothing.
    pub async fn create_defaults(&self, catalogue: &[(String, EntryType)]) -> ApiResult<u64> {
        let mut created = 0u64;

        for (name, kind) in catalogue {
            let result = sqlx::query(
                r#"
                INSERT INTO categories (name, kind)
                VALUES ($1, $2)
                ON CONFLICT (name, kind) DO NOTHING
                "#,
            )
            .bind(name)
            .bind(kind)
            .execute(&self.pool)
            .await?;

            created += result.rows_affected();
        }

        info!("Seeded default categories: {} created", created);
        Ok(created)
    }
}
