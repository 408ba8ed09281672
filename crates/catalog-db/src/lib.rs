//! # catalog-db
//!
//! Database layer implementing the `catalog-core` repository traits with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and schema migrations
//! - Row models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_db::{create_pool, run_migrations, PgTitleRepository, PoolConfig};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     let titles = PgTitleRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    create_pool, create_pool_from_env, run_migrations, run_migrations_from, PgPool, PoolConfig,
};
pub use repositories::{
    PgReactionRepository, PgReviewRepository, PgTitleRepository, PgUserRepository,
};
