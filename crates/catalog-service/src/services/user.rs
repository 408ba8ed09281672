//! User service
//!
//! Registration and activation, password reset and change, and the admin
//! account operations.

use catalog_common::{AppError, TokenPurpose};
use catalog_core::{NewUser, User, UserFilter, UserPatch};
use tracing::{error, info, instrument, warn};

use crate::dto::{
    ChangePasswordRequest, CreateUserRequest, DetailResponse, ListUsersQuery, RegisterRequest,
    ResetPasswordRequest, UpdateUserRequest, UserListResponse, UserResponse,
};

use super::access::{require_admin, require_owner_or_admin};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Admin listing with optional username substring and id filters
    #[instrument(skip(self, actor, query))]
    pub async fn list(
        &self,
        actor: &User,
        query: &ListUsersQuery,
    ) -> ServiceResult<UserListResponse> {
        require_admin(actor)?;

        let filter = UserFilter {
            username: query.username.clone(),
            id: query.id,
        };
        let page = self
            .ctx
            .user_repo()
            .list(&filter, query.page_request())
            .await?;

        Ok(page.into())
    }

    /// Create an inactive account and mail its activation link.
    ///
    /// If the mail cannot be sent the account is deleted again.
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<DetailResponse> {
        let password_hash = self.ctx.password_service().hash(&request.password)?;
        let user = self
            .ctx
            .user_repo()
            .create(&NewUser::registration(
                request.username,
                request.email,
                password_hash,
            ))
            .await?;

        info!(user_id = user.id, "User registered");

        let token = self.ctx.jwt_service().issue_activation_token(user.id)?;
        if let Err(e) = self
            .ctx
            .mailer()
            .send_activation(&user.email, &user.username, &token)
            .await
        {
            warn!(user_id = user.id, "Rolling back registration");
            if let Err(cleanup) = self.ctx.user_repo().delete(user.id).await {
                error!(user_id = user.id, error = %cleanup, "Failed to roll back registration");
            }
            return Err(e.into());
        }

        Ok(DetailResponse::new(
            "account created, check your email to activate it",
        ))
    }

    /// Activate the account named by an activation token
    #[instrument(skip(self, token))]
    pub async fn activate(&self, token: &str) -> ServiceResult<DetailResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_token(token, TokenPurpose::AccountActivation)
            .map_err(AppError::into_link_token_error)?;

        if !self.ctx.user_repo().set_active(claims.id, true).await? {
            return Err(ServiceError::not_found("User", claims.id));
        }

        info!(user_id = claims.id, "Account activated");
        Ok(DetailResponse::new("account activated successfully"))
    }

    /// Mail a password reset link.
    ///
    /// An unknown address is reported as a delivery failure.
    #[instrument(skip(self, email))]
    pub async fn request_password_reset(&self, email: &str) -> ServiceResult<DetailResponse> {
        let Some(user) = self.ctx.user_repo().find_by_email(email).await? else {
            warn!("Password reset requested for unknown email");
            return Err(AppError::EmailDelivery("unknown recipient".to_string()).into());
        };

        let token = self
            .ctx
            .jwt_service()
            .issue_password_reset_token(user.id)?;
        self.ctx
            .mailer()
            .send_password_reset(&user.email, &user.username, &token)
            .await?;

        info!(user_id = user.id, "Password reset email sent");
        Ok(DetailResponse::new("password reset email sent"))
    }

    /// Check a reset token and return the user id it was issued for
    #[instrument(skip(self, token))]
    pub fn verify_reset_token(&self, token: &str) -> ServiceResult<i64> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_token(token, TokenPurpose::PasswordReset)
            .map_err(AppError::into_link_token_error)?;
        Ok(claims.id)
    }

    /// Set a new password using a reset token
    #[instrument(skip(self, request))]
    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> ServiceResult<DetailResponse> {
        let user_id = self.verify_reset_token(&request.reset_password_token)?;
        let password_hash = self.ctx.password_service().hash(&request.new_password)?;

        if !self
            .ctx
            .user_repo()
            .update_password(user_id, &password_hash)
            .await?
        {
            return Err(ServiceError::not_found("User", user_id));
        }

        info!(user_id, "Password reset");
        Ok(DetailResponse::new("password changed successfully"))
    }

    /// Change the caller's password after checking the current one
    #[instrument(skip(self, actor, request), fields(user_id = actor.id))]
    pub async fn change_password(
        &self,
        actor: &User,
        request: ChangePasswordRequest,
    ) -> ServiceResult<DetailResponse> {
        let current_hash = self
            .ctx
            .user_repo()
            .get_password_hash(actor.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", actor.id))?;

        if !self
            .ctx
            .password_service()
            .verify(&request.current_password, &current_hash)?
        {
            warn!("Password change with wrong current password");
            return Err(ServiceError::validation("Wrong password."));
        }

        let password_hash = self.ctx.password_service().hash(&request.new_password)?;
        self.ctx
            .user_repo()
            .update_password(actor.id, &password_hash)
            .await?;

        info!("Password changed");
        Ok(DetailResponse::new("password changed successfully"))
    }

    /// Admin account creation
    #[instrument(skip(self, actor, request), fields(username = %request.username))]
    pub async fn create(
        &self,
        actor: &User,
        request: CreateUserRequest,
    ) -> ServiceResult<UserResponse> {
        require_admin(actor)?;

        let password_hash = self.ctx.password_service().hash(&request.password)?;
        let user = self
            .ctx
            .user_repo()
            .create(&NewUser {
                username: request.username,
                email: request.email,
                password_hash,
                role: request.role,
                is_active: request.is_active,
                avatar: request.avatar,
            })
            .await?;

        info!(user_id = user.id, created_by = actor.id, "User created");
        Ok(user.into())
    }

    /// Partial profile update by the account owner or an admin.
    ///
    /// Role and active flag changes need an admin.
    #[instrument(skip(self, actor, request), fields(actor_id = actor.id))]
    pub async fn update(
        &self,
        actor: &User,
        user_id: i64,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        require_owner_or_admin(actor, user_id)?;

        let password_hash = request
            .password
            .as_deref()
            .map(|password| self.ctx.password_service().hash(password))
            .transpose()?;

        let patch = UserPatch {
            username: request.username,
            email: request.email,
            password_hash,
            role: request.role,
            is_active: request.is_active,
            avatar: request.avatar,
        };
        if patch.touches_privileges() {
            require_admin(actor)?;
        }

        let user = if patch.is_empty() {
            self.ctx.user_repo().find_by_id(user_id).await?
        } else {
            self.ctx.user_repo().update(user_id, &patch).await?
        }
        .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        info!(user_id, "User updated");
        Ok(user.into())
    }

    /// Admin deletion
    #[instrument(skip(self, actor), fields(actor_id = actor.id))]
    pub async fn delete(&self, actor: &User, user_id: i64) -> ServiceResult<DetailResponse> {
        require_admin(actor)?;

        if !self.ctx.user_repo().delete(user_id).await? {
            return Err(ServiceError::not_found("User", user_id));
        }

        info!(user_id, "User deleted");
        Ok(DetailResponse::new("User deleted successfully"))
    }
}
