//! Review model -> entity mapper

use catalog_core::entities::Review;

use crate::models::ReviewModel;

impl From<ReviewModel> for Review {
    fn from(model: ReviewModel) -> Self {
        Review {
            id: model.id,
            title_id: model.title_id,
            user_id: model.user_id,
            content: model.content,
            created_at: model.created_at,
        }
    }
}
