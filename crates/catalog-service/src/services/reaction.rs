//! Reaction service
//!
//! Applies like/dislike toggles and reports per-target tallies annotated
//! with the caller's own reaction.

use std::collections::HashMap;

use catalog_core::{tally_reactions, Reaction, ReactionTarget, User};
use tracing::{debug, info, instrument};

use crate::dto::{
    parse_id_list, ReactionCountQuery, ReactionCountResponse, ReactionCountsResponse,
    ReactionRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the caller's reaction on a title or review.
    ///
    /// Returns the row only when a new one was inserted.
    ///
    /// # Errors
    /// `DomainError::TargetRequired` when neither id is given; nothing is written then.
    #[instrument(skip(self, user, request), fields(user_id = user.id, kind = %request.kind))]
    pub async fn apply_reaction(
        &self,
        user: &User,
        request: ReactionRequest,
    ) -> ServiceResult<Option<Reaction>> {
        let target = ReactionTarget::from_ids(request.title_id, request.review_id)?;

        let outcome = self
            .ctx
            .reaction_repo()
            .toggle(user.id, target, request.kind)
            .await?;

        info!(reaction_target = ?target, outcome = ?outcome, "Reaction applied");
        Ok(outcome.into_created())
    }

    /// Tallies for the titles and reviews named in the query, titles first
    #[instrument(skip(self, query, current_user))]
    pub async fn count(
        &self,
        query: &ReactionCountQuery,
        current_user: Option<&User>,
    ) -> ServiceResult<ReactionCountsResponse> {
        let title_ids =
            parse_id_list(&query.title_ids).map_err(ServiceError::validation)?;
        let review_ids =
            parse_id_list(&query.review_ids).map_err(ServiceError::validation)?;
        let current_user_id = current_user.map(|user| user.id);

        let mut reactions = self
            .count_title_reactions(&title_ids, current_user_id)
            .await?;
        reactions.extend(
            self.count_review_reactions(&review_ids, current_user_id)
                .await?,
        );

        Ok(ReactionCountsResponse { reactions })
    }

    /// One entry per title that has at least one reaction
    #[instrument(skip(self))]
    pub async fn count_title_reactions(
        &self,
        title_ids: &[i64],
        current_user_id: Option<i64>,
    ) -> ServiceResult<Vec<ReactionCountResponse>> {
        if title_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self.ctx.reaction_repo().find_by_titles(title_ids).await?;
        debug!(rows = rows.len(), "Fetched title reactions");

        Ok(tally_reactions(&rows, current_user_id)
            .iter()
            .map(ReactionCountResponse::from)
            .collect())
    }

    /// One entry per review that has at least one reaction, carrying the
    /// review author's id
    #[instrument(skip(self))]
    pub async fn count_review_reactions(
        &self,
        review_ids: &[i64],
        current_user_id: Option<i64>,
    ) -> ServiceResult<Vec<ReactionCountResponse>> {
        if review_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self.ctx.reaction_repo().find_by_reviews(review_ids).await?;
        debug!(rows = rows.len(), "Fetched review reactions");

        let authors: HashMap<i64, i64> = self
            .ctx
            .review_repo()
            .find_authors(review_ids)
            .await?
            .into_iter()
            .collect();

        Ok(tally_reactions(&rows, current_user_id)
            .iter()
            .map(|tally| {
                let mut entry = ReactionCountResponse::from(tally);
                entry.user_id = authors.get(&tally.target.id()).copied();
                entry
            })
            .collect())
    }
}
