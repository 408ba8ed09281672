//! Authentication service
//!
//! Exchanges credentials for session tokens and resolves bearer tokens back
//! to accounts.

use catalog_common::{AppError, TokenPurpose};
use catalog_core::User;
use tracing::{debug, info, instrument, warn};

use crate::dto::{LoginRequest, TokenResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Login with username and password
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| {
                warn!("Login attempt for unknown username");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        let valid = self
            .ctx
            .password_service()
            .verify(&request.password, &password_hash)?;
        if !valid {
            warn!(user_id = user.id, "Invalid password attempt");
            return Err(AppError::InvalidCredentials.into());
        }

        if !user.is_active {
            warn!(user_id = user.id, "Login refused for inactive account");
            return Err(AppError::AccountNotActivated.into());
        }

        let jwt = self.ctx.jwt_service();
        let access_token = jwt.issue_session_token(user.id, user.role)?;

        info!(user_id = user.id, "User logged in successfully");

        Ok(TokenResponse::bearer(access_token, jwt.session_token_expiry()))
    }

    /// Resolve a session token to its account
    ///
    /// # Errors
    /// Token failures are returned as-is; a deleted account is `InvalidToken`
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_token(token, TokenPurpose::Login)?;

        self.ctx
            .user_repo()
            .find_by_id(claims.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))
    }

    /// Like [`Self::authenticate`], but any token problem yields `None`.
    ///
    /// Persistence failures still propagate.
    #[instrument(skip(self, token))]
    pub async fn authenticate_optional(&self, token: &str) -> ServiceResult<Option<User>> {
        match self.authenticate(token).await {
            Ok(user) => Ok(Some(user)),
            Err(ServiceError::App(e)) => {
                debug!(error = %e, "Ignoring unusable bearer token");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
