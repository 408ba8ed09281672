//! Review entity - user-authored text about a title

use chrono::{DateTime, Utc};

/// Review entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    pub title_id: i64,
    /// Author
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    #[inline]
    pub fn is_author(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub title_id: i64,
    pub user_id: i64,
    pub content: String,
}

/// Filters for the review listing
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub title_id: Option<i64>,
}
