//! Title entity - a show or movie in the catalog

use chrono::{DateTime, Utc};

use crate::error::DomainError;

/// Title entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub trailer: Option<String>,
    pub image: Option<String>,
    /// Number of reviews attached to this title
    pub reviews: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values for inserting a title
#[derive(Debug, Clone)]
pub struct NewTitle {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub trailer: Option<String>,
    pub image: Option<String>,
}

impl NewTitle {
    /// Build a title, deriving the slug from the name when none is given
    ///
    /// Explicit slugs go through the same normalisation as derived ones.
    pub fn new(
        name: String,
        slug: Option<String>,
        description: String,
        trailer: Option<String>,
        image: Option<String>,
    ) -> Result<Self, DomainError> {
        let slug = match slug.as_deref() {
            Some(slug) if !slug.trim().is_empty() => normalize_slug(slug)?,
            _ => normalize_slug(&name)?,
        };
        Ok(Self {
            name,
            slug,
            description,
            trailer,
            image,
        })
    }
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct TitlePatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub image: Option<String>,
}

impl TitlePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.trailer.is_none()
            && self.image.is_none()
    }
}

/// Filters for the title listing
#[derive(Debug, Clone, Default)]
pub struct TitleFilter {
    /// Case-insensitive substring match on the name
    pub name: Option<String>,
}

/// Lowercase the input and join its alphanumeric runs with `-`
pub fn slugify(input: &str) -> String {
    input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Slugify `raw`, refusing input with no letters or digits to keep
pub fn normalize_slug(raw: &str) -> Result<String, DomainError> {
    let slug = slugify(raw);
    if slug.is_empty() {
        return Err(DomainError::ValidationError(
            "slug must contain a letter or digit".to_string(),
        ));
    }
    Ok(slug)
}
