//! Reaction model -> entity mapper

use catalog_core::entities::{Reaction, ReactionTarget, ReactionType};
use catalog_core::error::DomainError;

use crate::models::ReactionModel;

impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(Reaction {
            id: model.id,
            user_id: model.user_id,
            target: ReactionTarget::from_ids(model.title_id, model.review_id)?,
            kind: model.kind.parse::<ReactionType>()?,
            created_at: model.created_at,
        })
    }
}
