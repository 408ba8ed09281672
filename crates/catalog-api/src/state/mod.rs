//! Shared handler state
//!
//! Handlers reach the catalog services through the accessors here rather
//! than building them from the raw context.

use std::sync::Arc;

use catalog_common::AppConfig;
use catalog_service::{
    AuthService, ReactionService, ReviewService, ServiceContext, TitleService, UserService,
};

/// Cheaply cloneable state handed to every handler
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Token issuing and bearer resolution
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.service_context)
    }

    pub fn titles(&self) -> TitleService<'_> {
        TitleService::new(&self.service_context)
    }

    pub fn reviews(&self) -> ReviewService<'_> {
        ReviewService::new(&self.service_context)
    }

    pub fn reactions(&self) -> ReactionService<'_> {
        ReactionService::new(&self.service_context)
    }

    /// Registration, activation, password flows and admin user management
    pub fn users(&self) -> UserService<'_> {
        UserService::new(&self.service_context)
    }

    /// Whether a pooled database connection can be checked out
    pub async fn database_ready(&self) -> bool {
        match self.service_context.pool() {
            Some(pool) => pool.acquire().await.is_ok(),
            None => false,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("env", &self.config.app.env)
            .field("database", &self.service_context.pool().is_some())
            .finish_non_exhaustive()
    }
}
