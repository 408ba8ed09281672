//! Domain entities - core business objects

mod reaction;
mod review;
mod title;
mod user;

pub use reaction::{
    tally_reactions, Reaction, ReactionChange, ReactionOutcome, ReactionTally, ReactionTarget,
    ReactionType,
};
pub use review::{NewReview, Review, ReviewFilter};
pub use title::{normalize_slug, slugify, NewTitle, Title, TitleFilter, TitlePatch};
pub use user::{NewUser, Role, User, UserFilter, UserPatch};
