//! Review handlers

use axum::{extract::State, Json};
use catalog_service::dto::{
    CreateReviewRequest, DetailResponse, ListReviewsQuery, ReviewListResponse, ReviewResponse,
};

use crate::extractors::{ApiPath, AuthUser, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List reviews
///
/// GET /reviews?page=&limit=&title_id=
pub async fn list_reviews(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListReviewsQuery>,
) -> ApiResult<Json<ReviewListResponse>> {
    let service = state.reviews();
    Ok(Json(service.list(&query).await?))
}

/// GET /reviews/{id}
pub async fn get_review(
    State(state): State<AppState>,
    ApiPath(review_id): ApiPath<i64>,
) -> ApiResult<Json<ReviewResponse>> {
    let service = state.reviews();
    Ok(Json(service.get(review_id).await?))
}

/// POST /reviews
pub async fn create_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> ApiResult<Created<Json<ReviewResponse>>> {
    let service = state.reviews();
    let review = service.create(&user, request).await?;
    Ok(Created(Json(review)))
}

/// Delete a review (author or admin)
///
/// DELETE /reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(review_id): ApiPath<i64>,
) -> ApiResult<Json<DetailResponse>> {
    let service = state.reviews();
    Ok(Json(service.delete(&user, review_id).await?))
}
