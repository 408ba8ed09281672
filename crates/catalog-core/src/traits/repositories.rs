//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    NewReview, NewTitle, NewUser, Reaction, ReactionOutcome, ReactionTarget, ReactionType,
    Review, ReviewFilter, Title, TitleFilter, TitlePatch, User, UserFilter, UserPatch,
};
use crate::error::DomainError;
use crate::value_objects::{Page, PageRequest};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Find user by exact email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// List users ordered by id
    async fn list(&self, filter: &UserFilter, page: PageRequest) -> RepoResult<Page<User>>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Apply a partial update. `None` when the user does not exist.
    async fn update(&self, id: i64, patch: &UserPatch) -> RepoResult<Option<User>>;

    /// Flip the active flag. `false` when the user does not exist.
    async fn set_active(&self, id: i64, active: bool) -> RepoResult<bool>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<bool>;

    /// Hard delete. `false` when the user does not exist.
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

// ============================================================================
// Title Repository
// ============================================================================

#[async_trait]
pub trait TitleRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Title>>;

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Title>>;

    /// List titles ordered by id
    async fn list(&self, filter: &TitleFilter, page: PageRequest) -> RepoResult<Page<Title>>;

    async fn create(&self, title: &NewTitle) -> RepoResult<Title>;

    async fn update(&self, id: i64, patch: &TitlePatch) -> RepoResult<Option<Title>>;

    /// Delete a title with its reviews and reactions
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

// ============================================================================
// Review Repository
// ============================================================================

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Review>>;

    /// List reviews ordered by id
    async fn list(&self, filter: &ReviewFilter, page: PageRequest) -> RepoResult<Page<Review>>;

    /// Insert a review and bump its title's review counter
    async fn create(&self, review: &NewReview) -> RepoResult<Review>;

    /// Delete a review and decrement its title's review counter
    async fn delete(&self, id: i64) -> RepoResult<bool>;

    /// `(review_id, author_id)` pairs for the given reviews
    async fn find_authors(&self, review_ids: &[i64]) -> RepoResult<Vec<(i64, i64)>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// The user's reaction on a target, if any
    async fn find(&self, user_id: i64, target: ReactionTarget) -> RepoResult<Option<Reaction>>;

    /// Atomically apply the toggle for `(user_id, target)`
    async fn toggle(
        &self,
        user_id: i64,
        target: ReactionTarget,
        kind: ReactionType,
    ) -> RepoResult<ReactionOutcome>;

    /// All reactions on the given titles, ordered by id
    async fn find_by_titles(&self, title_ids: &[i64]) -> RepoResult<Vec<Reaction>>;

    /// All reactions on the given reviews, ordered by id
    async fn find_by_reviews(&self, review_ids: &[i64]) -> RepoResult<Vec<Reaction>>;
}
