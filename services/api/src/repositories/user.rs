//! User repository: account rows, password hashing, and settings

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use sqlx::{PgPool, Row};
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, is_unique_violation};
use crate::models::{NewUser, Profile, UpdateUserSettings, User, UserSettings};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn hash_password(password: &str) -> ApiResult<String> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                error!("Failed to hash password: {}", e);
                ApiError::InternalServerError
            })
    }

    /// Create a new user with a hashed password
    pub async fn create(&self, new_user: &NewUser) -> ApiResult<User> {
        info!("Creating new user: {}", new_user.username);

        let password_hash = Self::hash_password(&new_user.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, first_name, last_name,
                      created_at, updated_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("Username already taken".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(user)
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name,
                   created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Verify a user's password against the stored argon2 hash
    pub fn verify_password(&self, user: &User, password: &str) -> ApiResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|e| {
            error!("Failed to parse password hash: {}", e);
            ApiError::InternalServerError
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Rehash and persist a new password
    pub async fn update_password(&self, user_id: Uuid, new_password: &str) -> ApiResult<()> {
        let password_hash = Self::hash_password(new_password)?;

        sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(&password_hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a user; transactions, budgets, goals, profile, and income
    /// setting go with it via the schema's cascades
    pub async fn delete(&self, user_id: Uuid) -> ApiResult<bool> {
        info!("Deleting user account: {}", user_id);

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetch the settings view of a user: profile fields plus avatar
    pub async fn get_settings(&self, user_id: Uuid) -> ApiResult<Option<UserSettings>> {
        let row = sqlx::query(
            r#"
            SELECT u.username, u.email, u.first_name, u.last_name, p.avatar
            FROM users u
            LEFT JOIN profiles p ON p.user_id = u.id
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| UserSettings {
            username: row.get("username"),
            email: row.get("email"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            profile: Profile {
                avatar: row.get("avatar"),
            },
        }))
    }

    /// Apply a partial settings update. The user columns and the
    /// profile avatar are written inside one database transaction so a
    /// failure cannot leave the two halves out of step.
    pub async fn update_settings(
        &self,
        user_id: Uuid,
        update: &UpdateUserSettings,
    ) -> ApiResult<Option<UserSettings>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(&update.email)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        if let Some(profile) = &update.profile {
            sqlx::query(
                r#"
                INSERT INTO profiles (user_id, avatar)
                VALUES ($1, $2)
                ON CONFLICT (user_id) DO UPDATE SET avatar = EXCLUDED.avatar
                "#,
            )
            .bind(user_id)
            .bind(&profile.avatar)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_settings(user_id).await
    }
}
