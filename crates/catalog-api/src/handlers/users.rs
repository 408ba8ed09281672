//! User handlers
//!
//! Registration, activation and password flows, plus account management.

use axum::{extract::State, Json};
use catalog_service::dto::{
    ActivationQuery, ChangePasswordRequest, CreateUserRequest, DetailResponse, ListUsersQuery,
    PasswordResetEmailQuery, RegisterRequest, ResetPasswordRequest, ResetTokenQuery,
    UpdateUserRequest, UserListResponse, UserResponse,
};

use crate::extractors::{AdminUser, ApiPath, ApiQuery, AuthUser, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List accounts
///
/// GET /users?page=&limit=&username=&id=
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidatedQuery(query): ValidatedQuery<ListUsersQuery>,
) -> ApiResult<Json<UserListResponse>> {
    let service = state.users();
    Ok(Json(service.list(&admin, &query).await?))
}

/// The caller's own account
///
/// GET /users/current
pub async fn get_current_user(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}

/// Self-registration; the account stays inactive until activated
///
/// POST /users/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<DetailResponse>>> {
    let service = state.users();
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// POST /users/account/activation?activation_token=
pub async fn activate_account(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ActivationQuery>,
) -> ApiResult<Json<DetailResponse>> {
    let service = state.users();
    Ok(Json(service.activate(&query.activation_token).await?))
}

/// POST /users/reset/password/email?email=
pub async fn send_password_reset_email(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PasswordResetEmailQuery>,
) -> ApiResult<Json<DetailResponse>> {
    let service = state.users();
    Ok(Json(service.request_password_reset(&query.email).await?))
}

/// Returns the id of the user the reset token belongs to
///
/// POST /users/reset/password/token/verification?reset_password_token=
pub async fn verify_reset_token(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ResetTokenQuery>,
) -> ApiResult<Json<i64>> {
    let service = state.users();
    Ok(Json(service.verify_reset_token(&query.reset_password_token)?))
}

/// POST /users/reset/password
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResetPasswordRequest>,
) -> ApiResult<Json<DetailResponse>> {
    let service = state.users();
    Ok(Json(service.reset_password(request).await?))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let service = state.users();
    let user = service.create(&admin, request).await?;
    Ok(Created(Json(user)))
}

/// Partial update by the account owner or an admin
///
/// PATCH /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(user_id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = state.users();
    Ok(Json(service.update(&user, user_id, request).await?))
}

/// POST /users/change/password
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<DetailResponse>> {
    let service = state.users();
    Ok(Json(service.change_password(&user, request).await?))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiPath(user_id): ApiPath<i64>,
) -> ApiResult<Json<DetailResponse>> {
    let service = state.users();
    Ok(Json(service.delete(&admin, user_id).await?))
}
