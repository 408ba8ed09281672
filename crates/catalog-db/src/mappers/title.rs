//! Title model -> entity mapper

use catalog_core::entities::Title;

use crate::models::TitleModel;

impl From<TitleModel> for Title {
    fn from(model: TitleModel) -> Self {
        Title {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            trailer: model.trailer,
            image: model.image,
            reviews: model.reviews,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
