//! Role and ownership checks applied before business logic runs

use catalog_core::{DomainError, Role, User};

use super::error::ServiceResult;

/// Admin-only operations
///
/// # Errors
/// Returns `DomainError::AdminRequired` for plain users
pub fn require_admin(user: &User) -> ServiceResult<()> {
    match user.role {
        Role::Admin => Ok(()),
        Role::User => Err(DomainError::AdminRequired.into()),
    }
}

/// The caller must own the resource or be an admin
///
/// # Errors
/// Returns `DomainError::NotResourceOwner` otherwise
pub fn require_owner_or_admin(user: &User, owner_id: i64) -> ServiceResult<()> {
    match user.role {
        Role::Admin => Ok(()),
        Role::User if user.id == owner_id => Ok(()),
        Role::User => Err(DomainError::NotResourceOwner.into()),
    }
}
