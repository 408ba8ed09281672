//! Title handlers

use axum::{extract::State, Json};
use catalog_service::dto::{
    CreateTitleRequest, DetailResponse, ListTitlesQuery, ReplaceTitleRequest, TitleListResponse,
    TitleResponse, UpdateTitleRequest,
};

use crate::extractors::{AdminUser, ApiPath, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List titles
///
/// GET /titles?page=&limit=&name=
pub async fn list_titles(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListTitlesQuery>,
) -> ApiResult<Json<TitleListResponse>> {
    let service = state.titles();
    Ok(Json(service.list(&query).await?))
}

/// Get a title by slug
///
/// GET /titles/{slug}
pub async fn get_title(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> ApiResult<Json<TitleResponse>> {
    let service = state.titles();
    Ok(Json(service.get_by_slug(&slug).await?))
}

/// Create a title
///
/// POST /titles
pub async fn create_title(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateTitleRequest>,
) -> ApiResult<Created<Json<TitleResponse>>> {
    let service = state.titles();
    let title = service.create(&admin, request).await?;
    Ok(Created(Json(title)))
}

/// Partially update a title
///
/// PATCH /titles/{id}
pub async fn update_title(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(title_id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateTitleRequest>,
) -> ApiResult<Json<TitleResponse>> {
    let service = state.titles();
    Ok(Json(service.update(&admin, title_id, request).await?))
}

/// Replace a title; all fields are required
///
/// PUT /titles/{id}
pub async fn replace_title(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(title_id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<ReplaceTitleRequest>,
) -> ApiResult<Json<TitleResponse>> {
    let service = state.titles();
    Ok(Json(service.replace(&admin, title_id, request).await?))
}

/// Delete a title with its reviews and reactions
///
/// DELETE /titles/{id}
pub async fn delete_title(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(title_id): ApiPath<i64>,
) -> ApiResult<Json<DetailResponse>> {
    let service = state.titles();
    Ok(Json(service.delete(&admin, title_id).await?))
}
