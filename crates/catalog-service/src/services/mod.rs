//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! request and orchestrates repositories, token handling and email.

pub mod access;
pub mod auth;
pub mod context;
pub mod error;
pub mod reaction;
pub mod review;
pub mod title;
pub mod user;

// Re-export all services for convenience
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use reaction::ReactionService;
pub use review::ReviewService;
pub use title::TitleService;
pub use user::UserService;
