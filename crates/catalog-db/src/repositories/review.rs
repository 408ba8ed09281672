//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use catalog_core::entities::{NewReview, Review, ReviewFilter};
use catalog_core::error::DomainError;
use catalog_core::traits::{RepoResult, ReviewRepository};
use catalog_core::value_objects::{Page, PageRequest};

use crate::models::ReviewModel;

use super::error::{map_db_error, map_fk_violation};

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, title_id, user_id, content, created_at
            FROM reviews
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Review::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &ReviewFilter, page: PageRequest) -> RepoResult<Page<Review>> {
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM reviews
            WHERE ($1::BIGINT IS NULL OR title_id = $1)
            ",
        )
        .bind(filter.title_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, title_id, user_id, content, created_at
            FROM reviews
            WHERE ($1::BIGINT IS NULL OR title_id = $1)
            ORDER BY id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(filter.title_id)
        .bind(page.sql_limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(Review::from).collect(),
            total,
            page,
        ))
    }

    #[instrument(skip(self, review), fields(title_id = review.title_id, user_id = review.user_id))]
    async fn create(&self, review: &NewReview) -> RepoResult<Review> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let model = sqlx::query_as::<_, ReviewModel>(
            r"
            INSERT INTO reviews (title_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, title_id, user_id, content, created_at
            ",
        )
        .bind(review.title_id)
        .bind(review.user_id)
        .bind(&review.content)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_fk_violation(e, || DomainError::TitleNotFound(review.title_id.to_string()))
        })?;

        sqlx::query("UPDATE titles SET reviews = reviews + 1 WHERE id = $1")
            .bind(review.title_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(Review::from(model))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let title_id = sqlx::query_scalar::<_, i64>(
            "DELETE FROM reviews WHERE id = $1 RETURNING title_id",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let Some(title_id) = title_id else {
            return Ok(false);
        };

        sqlx::query("UPDATE titles SET reviews = GREATEST(reviews - 1, 0) WHERE id = $1")
            .bind(title_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(true)
    }

    #[instrument(skip(self))]
    async fn find_authors(&self, review_ids: &[i64]) -> RepoResult<Vec<(i64, i64)>> {
        if review_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT id, user_id
            FROM reviews
            WHERE id = ANY($1)
            ",
        )
        .bind(review_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }
}
