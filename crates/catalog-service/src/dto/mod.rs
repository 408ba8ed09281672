//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    parse_id_list, ActivationQuery, ChangePasswordRequest, CreateReviewRequest,
    CreateTitleRequest, CreateUserRequest, ListReviewsQuery, ListTitlesQuery, ListUsersQuery,
    LoginRequest, PasswordResetEmailQuery, ReactionCountQuery, ReactionRequest,
    RegisterRequest, ReplaceTitleRequest, ResetPasswordRequest, ResetTokenQuery,
    UpdateTitleRequest,
    UpdateUserRequest,
};

// Re-export commonly used response types
pub use responses::{
    DetailResponse, HealthChecks, HealthResponse, ReactionCountResponse, ReactionCountsResponse,
    ReadinessResponse, ReviewListResponse, ReviewResponse, TitleListResponse, TitleResponse,
    TokenResponse, UserListResponse, UserResponse,
};
