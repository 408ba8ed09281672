//! PostgreSQL implementation of ReactionRepository
//!
//! The toggle runs in a single transaction that first takes a
//! transaction-scoped advisory lock keyed by the user id, so concurrent
//! reactions from one user are applied one after the other. The partial
//! unique indexes on `(user_id, title_id)` and `(user_id, review_id)` back
//! this up at the schema level.

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};
use tracing::{debug, instrument};

use catalog_core::entities::{
    Reaction, ReactionChange, ReactionOutcome, ReactionTarget, ReactionType,
};
use catalog_core::error::DomainError;
use catalog_core::traits::{ReactionRepository, RepoResult};

use crate::models::ReactionModel;

use super::error::{map_db_error, map_fk_violation};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_existing<'e, E>(
        executor: E,
        user_id: i64,
        target: ReactionTarget,
    ) -> RepoResult<Option<Reaction>>
    where
        E: PgExecutor<'e>,
    {
        let sql = match target {
            ReactionTarget::Title(_) => {
                r"
                SELECT id, user_id, title_id, review_id, type, created_at
                FROM reactions
                WHERE user_id = $1 AND title_id = $2
                "
            }
            ReactionTarget::Review(_) => {
                r"
                SELECT id, user_id, title_id, review_id, type, created_at
                FROM reactions
                WHERE user_id = $1 AND review_id = $2
                "
            }
        };

        let result = sqlx::query_as::<_, ReactionModel>(sql)
            .bind(user_id)
            .bind(target.id())
            .fetch_optional(executor)
            .await
            .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    async fn insert<'e, E>(
        executor: E,
        user_id: i64,
        target: ReactionTarget,
        kind: ReactionType,
    ) -> RepoResult<Reaction>
    where
        E: PgExecutor<'e>,
    {
        let model = sqlx::query_as::<_, ReactionModel>(
            r"
            INSERT INTO reactions (user_id, title_id, review_id, type)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, title_id, review_id, type, created_at
            ",
        )
        .bind(user_id)
        .bind(target.title_id())
        .bind(target.review_id())
        .bind(kind.as_str())
        .fetch_one(executor)
        .await
        .map_err(|e| map_fk_violation(e, || target_not_found(target)))?;

        Reaction::try_from(model)
    }

    async fn find_by_column(&self, column: Column, ids: &[i64]) -> RepoResult<Vec<Reaction>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = match column {
            Column::Title => {
                r"
                SELECT id, user_id, title_id, review_id, type, created_at
                FROM reactions
                WHERE title_id = ANY($1)
                ORDER BY id
                "
            }
            Column::Review => {
                r"
                SELECT id, user_id, title_id, review_id, type, created_at
                FROM reactions
                WHERE review_id = ANY($1)
                ORDER BY id
                "
            }
        };

        let rows = sqlx::query_as::<_, ReactionModel>(sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter().map(Reaction::try_from).collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum Column {
    Title,
    Review,
}

fn target_not_found(target: ReactionTarget) -> DomainError {
    match target {
        ReactionTarget::Title(id) => DomainError::TitleNotFound(id.to_string()),
        ReactionTarget::Review(id) => DomainError::ReviewNotFound(id),
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, user_id: i64, target: ReactionTarget) -> RepoResult<Option<Reaction>> {
        Self::find_existing(&self.pool, user_id, target).await
    }

    #[instrument(skip(self))]
    async fn toggle(
        &self,
        user_id: i64,
        target: ReactionTarget,
        kind: ReactionType,
    ) -> RepoResult<ReactionOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let existing = Self::find_existing(&mut *tx, user_id, target).await?;
        let change = ReactionChange::plan(existing.as_ref(), kind);
        debug!(?change, "Applying reaction change");

        let outcome = match change {
            ReactionChange::Insert(kind) => {
                let reaction = Self::insert(&mut *tx, user_id, target, kind).await?;
                ReactionOutcome::Created(reaction)
            }
            ReactionChange::Delete { id } => {
                sqlx::query("DELETE FROM reactions WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_db_error)?;
                ReactionOutcome::Removed
            }
            ReactionChange::Update { id, kind } => {
                let model = sqlx::query_as::<_, ReactionModel>(
                    r"
                    UPDATE reactions
                    SET type = $2
                    WHERE id = $1
                    RETURNING id, user_id, title_id, review_id, type, created_at
                    ",
                )
                .bind(id)
                .bind(kind.as_str())
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_error)?;
                ReactionOutcome::Switched(Reaction::try_from(model)?)
            }
        };

        tx.commit().await.map_err(map_db_error)?;

        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn find_by_titles(&self, title_ids: &[i64]) -> RepoResult<Vec<Reaction>> {
        self.find_by_column(Column::Title, title_ids).await
    }

    #[instrument(skip(self))]
    async fn find_by_reviews(&self, review_ids: &[i64]) -> RepoResult<Vec<Reaction>> {
        self.find_by_column(Column::Review, review_ids).await
    }
}
