//! User model -> entity mapper

use catalog_core::entities::{Role, User};
use catalog_core::error::DomainError;

use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            username: model.username,
            email: model.email,
            role: model.role.parse::<Role>()?,
            is_active: model.is_active,
            avatar: model.avatar,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
