//! # catalog-core
//!
//! Domain layer for the media catalog: titles, reviews, users and reactions,
//! the repository ports they are persisted through, and the pure reaction
//! toggle/tally rules. No infrastructure dependencies live here.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    normalize_slug, slugify, tally_reactions, NewReview, NewTitle, NewUser, Reaction, ReactionChange,
    ReactionOutcome, ReactionTally, ReactionTarget, ReactionType, Review, ReviewFilter, Role,
    Title, TitleFilter, TitlePatch, User, UserFilter, UserPatch,
};
pub use error::DomainError;
pub use traits::{
    ReactionRepository, RepoResult, ReviewRepository, TitleRepository, UserRepository,
};
pub use value_objects::{Page, PageRequest};
