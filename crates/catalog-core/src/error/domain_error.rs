//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Title not found: {0}")]
    TitleNotFound(String),

    #[error("Review not found: {0}")]
    ReviewNotFound(i64),

    /// A reaction request named neither a title nor a review
    #[error("Reaction not found")]
    TargetRequired,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown role: {0}")]
    InvalidRole(String),

    #[error("Unknown reaction type: {0}")]
    InvalidReactionType(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Access denied. Admin role required.")]
    AdminRequired,

    #[error("Access denied. Only the owner or an admin may do this.")]
    NotResourceOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("A title with this name or slug already exists")]
    TitleAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::TitleNotFound(_) => "UNKNOWN_TITLE",
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",
            Self::TargetRequired => "REACTION_TARGET_REQUIRED",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::InvalidReactionType(_) => "INVALID_REACTION_TYPE",

            // Authorization
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::NotResourceOwner => "NOT_RESOURCE_OWNER",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::TitleAlreadyExists => "TITLE_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::TitleNotFound(_)
                | Self::ReviewNotFound(_)
                | Self::TargetRequired
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidRole(_) | Self::InvalidReactionType(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::AdminRequired | Self::NotResourceOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameAlreadyExists | Self::EmailAlreadyExists | Self::TitleAlreadyExists
        )
    }
}
