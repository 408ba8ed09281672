//! Database models - SQLx-compatible structs for PostgreSQL tables

mod reaction;
mod review;
mod title;
mod user;

pub use reaction::ReactionModel;
pub use review::ReviewModel;
pub use title::TitleModel;
pub use user::UserModel;
