//! Authentication handlers

use axum::{extract::State, Json};
use catalog_service::dto::{LoginRequest, TokenResponse};

use crate::extractors::ValidatedForm;
use crate::response::ApiResult;
use crate::state::AppState;

/// Exchange username and password for a bearer token
///
/// POST /auth/token
pub async fn login(
    State(state): State<AppState>,
    ValidatedForm(request): ValidatedForm<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = state.auth();
    let response = service.login(request).await?;
    Ok(Json(response))
}
