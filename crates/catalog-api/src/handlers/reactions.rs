//! Reaction handlers
//!
//! Like/dislike toggling and per-target counts.

use axum::{extract::State, Json};
use catalog_service::dto::{ReactionCountQuery, ReactionCountsResponse, ReactionRequest};

use crate::extractors::{ApiQuery, AuthUser, OptionalAuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Toggle the caller's reaction on a title or review
///
/// POST /reaction
pub async fn apply_reaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<ReactionRequest>,
) -> ApiResult<NoContent> {
    let service = state.reactions();
    service.apply_reaction(&user, request).await?;
    Ok(NoContent)
}

/// Likes and dislikes per title and/or review
///
/// GET /reaction/count?title_ids=1,2&review_ids=3 (keys may also repeat)
pub async fn count_reactions(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
    ApiQuery(query): ApiQuery<ReactionCountQuery>,
) -> ApiResult<Json<ReactionCountsResponse>> {
    let service = state.reactions();
    let response = service.count(&query, user.as_ref()).await?;
    Ok(Json(response))
}
