//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use catalog_core::{Page, ReactionTally, Review, Title, User};

use super::responses::{
    ReactionCountResponse, ReviewListResponse, ReviewResponse, TitleListResponse, TitleResponse,
    UserListResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
            avatar: user.avatar.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<Page<User>> for UserListResponse {
    fn from(page: Page<User>) -> Self {
        let page = page.map(UserResponse::from);
        Self {
            users: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
        }
    }
}

// ============================================================================
// Title Mappers
// ============================================================================

impl From<&Title> for TitleResponse {
    fn from(title: &Title) -> Self {
        Self {
            id: title.id,
            name: title.name.clone(),
            slug: title.slug.clone(),
            description: title.description.clone(),
            trailer: title.trailer.clone(),
            image: title.image.clone(),
            reviews: title.reviews,
            created_at: title.created_at,
            updated_at: title.updated_at,
        }
    }
}

impl From<Title> for TitleResponse {
    fn from(title: Title) -> Self {
        Self::from(&title)
    }
}

impl From<Page<Title>> for TitleListResponse {
    fn from(page: Page<Title>) -> Self {
        let page = page.map(TitleResponse::from);
        Self {
            titles: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
        }
    }
}

// ============================================================================
// Review Mappers
// ============================================================================

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            title_id: review.title_id,
            user_id: review.user_id,
            content: review.content.clone(),
            created_at: review.created_at,
        }
    }
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self::from(&review)
    }
}

impl From<Page<Review>> for ReviewListResponse {
    fn from(page: Page<Review>) -> Self {
        let page = page.map(ReviewResponse::from);
        Self {
            reviews: page.items,
            total: page.total,
            page: page.page,
            limit: page.limit,
        }
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<&ReactionTally> for ReactionCountResponse {
    fn from(tally: &ReactionTally) -> Self {
        Self {
            title_id: tally.target.title_id(),
            review_id: tally.target.review_id(),
            user_id: None,
            current_user_reaction: tally.current_user_reaction,
            likes: tally.likes,
            dislikes: tally.dislikes,
        }
    }
}
