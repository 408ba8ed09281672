//! Reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `reactions` table. Exactly one of `title_id`/`review_id` is set.
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub user_id: i64,
    pub title_id: Option<i64>,
    pub review_id: Option<i64>,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
}
