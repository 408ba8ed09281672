//! Database connection pool management

mod migrations;
mod postgres;

pub use migrations::{run_migrations, run_migrations_from, DEFAULT_MIGRATIONS_DIR};
pub use postgres::{create_pool, create_pool_from_env, PoolConfig};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
