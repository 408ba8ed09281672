//! Service context - dependency container for services
//!
//! Holds all repositories, the token and password services, and the mailer.

use std::sync::Arc;

use catalog_common::auth::{JwtService, PasswordService};
use catalog_core::traits::{
    ReactionRepository, ReviewRepository, TitleRepository, UserRepository,
};
use catalog_db::{
    PgPool, PgReactionRepository, PgReviewRepository, PgTitleRepository, PgUserRepository,
};

use crate::email::Mailer;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - JWT service for bearer tokens
/// - Password hashing
/// - The mailer for activation and reset emails
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool (absent when repositories are not Postgres-backed)
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    title_repo: Arc<dyn TitleRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    mailer: Mailer,
}

impl ServiceContext {
    /// Create a context whose repositories all run against `pool`
    pub fn new(pool: PgPool, jwt_service: Arc<JwtService>, mailer: Mailer) -> Self {
        Self {
            user_repo: Arc::new(PgUserRepository::new(pool.clone())),
            title_repo: Arc::new(PgTitleRepository::new(pool.clone())),
            review_repo: Arc::new(PgReviewRepository::new(pool.clone())),
            reaction_repo: Arc::new(PgReactionRepository::new(pool.clone())),
            pool: Some(pool),
            jwt_service,
            password_service: PasswordService::new(),
            mailer,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if any
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the title repository
    pub fn title_repo(&self) -> &dyn TitleRepository {
        self.title_repo.as_ref()
    }

    /// Get the review repository
    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Get the mailer
    pub fn mailer(&self) -> &Mailer {
        &self.mailer
    }
}

/// Builder for ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    title_repo: Option<Arc<dyn TitleRepository>>,
    review_repo: Option<Arc<dyn ReviewRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    mailer: Option<Mailer>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn title_repo(mut self, repo: Arc<dyn TitleRepository>) -> Self {
        self.title_repo = Some(repo);
        self
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn mailer(mut self, mailer: Mailer) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Build the context
    ///
    /// # Errors
    /// Returns a validation error naming the first missing dependency
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            title_repo: self
                .title_repo
                .ok_or_else(|| ServiceError::validation("title_repo is required"))?,
            review_repo: self
                .review_repo
                .ok_or_else(|| ServiceError::validation("review_repo is required"))?,
            reaction_repo: self
                .reaction_repo
                .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            password_service: PasswordService::new(),
            mailer: self
                .mailer
                .ok_or_else(|| ServiceError::validation("mailer is required"))?,
        })
    }
}
