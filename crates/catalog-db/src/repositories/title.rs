//! PostgreSQL implementation of TitleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use catalog_core::entities::{NewTitle, Title, TitleFilter, TitlePatch};
use catalog_core::error::DomainError;
use catalog_core::traits::{RepoResult, TitleRepository};
use catalog_core::value_objects::{Page, PageRequest};

use crate::models::TitleModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of TitleRepository
#[derive(Clone)]
pub struct PgTitleRepository {
    pool: PgPool,
}

impl PgTitleRepository {
    /// Create a new PgTitleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TitleRepository for PgTitleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Title>> {
        let result = sqlx::query_as::<_, TitleModel>(
            r"
            SELECT id, name, slug, description, trailer, image, reviews, created_at, updated_at
            FROM titles
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Title::from))
    }

    #[instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Title>> {
        let result = sqlx::query_as::<_, TitleModel>(
            r"
            SELECT id, name, slug, description, trailer, image, reviews, created_at, updated_at
            FROM titles
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Title::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &TitleFilter, page: PageRequest) -> RepoResult<Page<Title>> {
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM titles
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
            ",
        )
        .bind(filter.name.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, TitleModel>(
            r"
            SELECT id, name, slug, description, trailer, image, reviews, created_at, updated_at
            FROM titles
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(filter.name.as_deref())
        .bind(page.sql_limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(Title::from).collect(),
            total,
            page,
        ))
    }

    #[instrument(skip(self, title), fields(slug = %title.slug))]
    async fn create(&self, title: &NewTitle) -> RepoResult<Title> {
        let model = sqlx::query_as::<_, TitleModel>(
            r"
            INSERT INTO titles (name, slug, description, trailer, image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, slug, description, trailer, image, reviews, created_at, updated_at
            ",
        )
        .bind(&title.name)
        .bind(&title.slug)
        .bind(&title.description)
        .bind(&title.trailer)
        .bind(&title.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::TitleAlreadyExists))?;

        Ok(Title::from(model))
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: i64, patch: &TitlePatch) -> RepoResult<Option<Title>> {
        let result = sqlx::query_as::<_, TitleModel>(
            r"
            UPDATE titles
            SET name        = COALESCE($2, name),
                slug        = COALESCE($3, slug),
                description = COALESCE($4, description),
                trailer     = COALESCE($5, trailer),
                image       = COALESCE($6, image),
                updated_at  = NOW()
            WHERE id = $1
            RETURNING id, name, slug, description, trailer, image, reviews, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.slug.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.trailer.as_deref())
        .bind(patch.image.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::TitleAlreadyExists))?;

        Ok(result.map(Title::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<bool> {
        // Reviews and reactions go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM titles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
