//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use catalog_core::entities::{NewUser, User, UserFilter, UserPatch};
use catalog_core::traits::{RepoResult, UserRepository};
use catalog_core::value_objects::{Page, PageRequest};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_conflict};

const USER_COLUMNS: &str =
    "id, username, email, role, is_active, avatar, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> RepoResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, role, is_active, avatar, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        self.find_one("username", username).await
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.find_one("email", email).await
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &UserFilter, page: PageRequest) -> RepoResult<Page<User>> {
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM users
            WHERE ($1::TEXT IS NULL OR username ILIKE '%' || $1 || '%')
              AND ($2::BIGINT IS NULL OR id = $2)
            ",
        )
        .bind(filter.username.as_deref())
        .bind(filter.id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, role, is_active, avatar, created_at, updated_at
            FROM users
            WHERE ($1::TEXT IS NULL OR username ILIKE '%' || $1 || '%')
              AND ($2::BIGINT IS NULL OR id = $2)
            ORDER BY id
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(filter.username.as_deref())
        .bind(filter.id)
        .bind(page.sql_limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let users = rows
            .into_iter()
            .map(User::try_from)
            .collect::<RepoResult<Vec<_>>>()?;

        Ok(Page::new(users, total, page))
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (username, email, password_hash, role, is_active, avatar)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, email, role, is_active, avatar, created_at, updated_at
            ",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(&user.avatar)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, user_conflict))?;

        User::try_from(model)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: i64, patch: &UserPatch) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            UPDATE users
            SET username      = COALESCE($2, username),
                email         = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                role          = COALESCE($5, role),
                is_active     = COALESCE($6, is_active),
                avatar        = COALESCE($7, avatar),
                updated_at    = NOW()
            WHERE id = $1
            RETURNING id, username, email, role, is_active, avatar, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(patch.username.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.password_hash.as_deref())
        .bind(patch.role.map(|role| role.as_str()))
        .bind(patch.is_active)
        .bind(patch.avatar.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, user_conflict))?;

        result.map(User::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: i64, active: bool) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes the user; their reviews cascade, so title counters are
    /// lowered first within the same transaction.
    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            UPDATE titles t
            SET reviews = GREATEST(t.reviews - c.n, 0)
            FROM (
                SELECT title_id, COUNT(*)::INT AS n
                FROM reviews
                WHERE user_id = $1
                GROUP BY title_id
            ) c
            WHERE t.id = c.title_id
            ",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
