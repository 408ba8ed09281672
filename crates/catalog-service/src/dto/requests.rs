//! Request DTOs for API endpoints
//!
//! All body DTOs implement `Deserialize` and `Validate` for input validation.

use catalog_core::value_objects::DEFAULT_PAGE_LIMIT;
use catalog_core::{PageRequest, ReactionType, Role};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Login form (`application/x-www-form-urlencoded`)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Self-registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// Admin account creation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[serde(default)]
    pub role: Role,

    /// Admin-created accounts are active unless stated otherwise
    #[serde(default = "default_active")]
    pub is_active: bool,

    pub avatar: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Partial profile update; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 32, message = "Username must be 2-32 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: Option<String>,

    pub role: Option<Role>,

    pub is_active: Option<bool>,

    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub new_password: String,

    pub reset_password_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivationQuery {
    pub activation_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetEmailQuery {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetTokenQuery {
    pub reset_password_token: String,
}

// ============================================================================
// Title Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTitleRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    /// Derived from the name when omitted
    #[validate(length(min = 1, max = 200, message = "Slug must be 1-200 characters"))]
    pub slug: Option<String>,

    #[serde(default)]
    pub description: String,

    pub trailer: Option<String>,

    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTitleRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Slug must be 1-200 characters"))]
    pub slug: Option<String>,

    pub description: Option<String>,

    pub trailer: Option<String>,

    pub image: Option<String>,
}

/// Full replacement of a title; every column must be supplied
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplaceTitleRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 200, message = "Slug must be 1-200 characters"))]
    pub slug: String,

    pub description: String,

    pub trailer: String,

    pub image: String,
}

// ============================================================================
// Review Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub title_id: i64,

    #[validate(length(min = 1, max = 5000, message = "Review must be 1-5000 characters"))]
    pub content: String,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Like or dislike a title or a review
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReactionRequest {
    pub title_id: Option<i64>,
    pub review_id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: ReactionType,
}

/// Target ids for the count query.
///
/// Each key may repeat (`?title_ids=1&title_ids=2`) and each value may hold a
/// comma separated list (`?title_ids=1,2`); both forms combine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReactionCountQuery {
    #[serde(default)]
    pub title_ids: Vec<String>,
    #[serde(default)]
    pub review_ids: Vec<String>,
}

/// Parse query values holding ids, each possibly comma separated.
/// Blank fragments are skipped.
///
/// # Errors
/// Returns the offending fragment when it is not an integer
pub fn parse_id_list<S: AsRef<str>>(values: &[S]) -> Result<Vec<i64>, String> {
    values
        .iter()
        .flat_map(|value| value.as_ref().split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<i64>().map_err(|_| format!("Invalid id: {part}")))
        .collect()
}

// ============================================================================
// Listing Queries
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListTitlesQuery {
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,

    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListReviewsQuery {
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,

    pub title_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,

    pub username: Option<String>,

    pub id: Option<i64>,
}

fn page_request(page: Option<u32>, limit: Option<u32>) -> PageRequest {
    PageRequest::new(page.unwrap_or(1), limit.unwrap_or(DEFAULT_PAGE_LIMIT))
}

impl ListTitlesQuery {
    pub fn page_request(&self) -> PageRequest {
        page_request(self.page, self.limit)
    }
}

impl ListReviewsQuery {
    pub fn page_request(&self) -> PageRequest {
        page_request(self.page, self.limit)
    }
}

impl ListUsersQuery {
    pub fn page_request(&self) -> PageRequest {
        page_request(self.page, self.limit)
    }
}
