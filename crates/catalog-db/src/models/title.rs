//! Title database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TitleModel {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub trailer: Option<String>,
    pub image: Option<String>,
    pub reviews: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
