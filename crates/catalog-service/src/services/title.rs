//! Title service
//!
//! Public listing and slug lookup; every write is admin-only.

use catalog_core::{normalize_slug, NewTitle, TitleFilter, TitlePatch, User};
use tracing::{info, instrument};

use crate::dto::{
    CreateTitleRequest, DetailResponse, ListTitlesQuery, ReplaceTitleRequest, TitleListResponse,
    TitleResponse, UpdateTitleRequest,
};

use super::access::require_admin;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Title service
pub struct TitleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TitleService<'a> {
    /// Create a new TitleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Paged listing, optionally filtered by a name substring
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ListTitlesQuery) -> ServiceResult<TitleListResponse> {
        let filter = TitleFilter {
            name: query.name.clone(),
        };
        let page = self
            .ctx
            .title_repo()
            .list(&filter, query.page_request())
            .await?;
        Ok(page.into())
    }

    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> ServiceResult<TitleResponse> {
        self.ctx
            .title_repo()
            .find_by_slug(slug)
            .await?
            .map(TitleResponse::from)
            .ok_or_else(|| ServiceError::not_found("Title", slug))
    }

    #[instrument(skip(self, actor, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        actor: &User,
        request: CreateTitleRequest,
    ) -> ServiceResult<TitleResponse> {
        require_admin(actor)?;

        let title = self
            .ctx
            .title_repo()
            .create(&NewTitle::new(
                request.name,
                request.slug,
                request.description,
                request.trailer,
                request.image,
            )?)
            .await?;

        info!(title_id = title.id, slug = %title.slug, "Title created");
        Ok(title.into())
    }

    #[instrument(skip(self, actor, request))]
    pub async fn update(
        &self,
        actor: &User,
        title_id: i64,
        request: UpdateTitleRequest,
    ) -> ServiceResult<TitleResponse> {
        require_admin(actor)?;

        let patch = TitlePatch {
            name: request.name,
            slug: request.slug.as_deref().map(normalize_slug).transpose()?,
            description: request.description,
            trailer: request.trailer,
            image: request.image,
        };
        let title = if patch.is_empty() {
            self.ctx.title_repo().find_by_id(title_id).await?
        } else {
            self.ctx.title_repo().update(title_id, &patch).await?
        }
        .ok_or_else(|| ServiceError::not_found("Title", title_id))?;

        info!(title_id, "Title updated");
        Ok(title.into())
    }

    /// Overwrite every editable column of a title
    #[instrument(skip(self, actor, request))]
    pub async fn replace(
        &self,
        actor: &User,
        title_id: i64,
        request: ReplaceTitleRequest,
    ) -> ServiceResult<TitleResponse> {
        require_admin(actor)?;

        let patch = TitlePatch {
            name: Some(request.name),
            slug: Some(normalize_slug(&request.slug)?),
            description: Some(request.description),
            trailer: Some(request.trailer),
            image: Some(request.image),
        };
        let title = self
            .ctx
            .title_repo()
            .update(title_id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("Title", title_id))?;

        info!(title_id, "Title replaced");
        Ok(title.into())
    }

    #[instrument(skip(self, actor))]
    pub async fn delete(&self, actor: &User, title_id: i64) -> ServiceResult<DetailResponse> {
        require_admin(actor)?;

        if !self.ctx.title_repo().delete(title_id).await? {
            return Err(ServiceError::not_found("Title", title_id));
        }

        info!(title_id, "Title deleted");
        Ok(DetailResponse::new("Title deleted successfully"))
    }
}
