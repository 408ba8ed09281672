//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in catalog-core.

mod error;
mod reaction;
mod review;
mod title;
mod user;

pub use reaction::PgReactionRepository;
pub use review::PgReviewRepository;
pub use title::PgTitleRepository;
pub use user::PgUserRepository;
