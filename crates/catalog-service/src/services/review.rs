//! Review service

use catalog_core::{NewReview, ReviewFilter, User};
use tracing::{info, instrument};

use crate::dto::{
    CreateReviewRequest, DetailResponse, ListReviewsQuery, ReviewListResponse, ReviewResponse,
};

use super::access::require_owner_or_admin;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    /// Create a new ReviewService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListReviewsQuery) -> ServiceResult<ReviewListResponse> {
        let filter = ReviewFilter {
            title_id: query.title_id,
        };
        let page = self
            .ctx
            .review_repo()
            .list(&filter, query.page_request())
            .await?;
        Ok(page.into())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, review_id: i64) -> ServiceResult<ReviewResponse> {
        self.ctx
            .review_repo()
            .find_by_id(review_id)
            .await?
            .map(ReviewResponse::from)
            .ok_or_else(|| ServiceError::not_found("Review", review_id))
    }

    /// Post a review on an existing title
    #[instrument(skip(self, author, request), fields(author_id = author.id, title_id = request.title_id))]
    pub async fn create(
        &self,
        author: &User,
        request: CreateReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        if self
            .ctx
            .title_repo()
            .find_by_id(request.title_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Title", request.title_id));
        }

        let review = self
            .ctx
            .review_repo()
            .create(&NewReview {
                title_id: request.title_id,
                user_id: author.id,
                content: request.content,
            })
            .await?;

        info!(review_id = review.id, "Review created");
        Ok(review.into())
    }

    /// Delete a review; only its author or an admin may
    #[instrument(skip(self, actor), fields(actor_id = actor.id))]
    pub async fn delete(&self, actor: &User, review_id: i64) -> ServiceResult<DetailResponse> {
        let review = self
            .ctx
            .review_repo()
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Review", review_id))?;

        require_owner_or_admin(actor, review.user_id)?;

        if !self.ctx.review_repo().delete(review_id).await? {
            return Err(ServiceError::not_found("Review", review_id));
        }

        info!(review_id, "Review deleted");
        Ok(DetailResponse::new("Review deleted successfully"))
    }
}
