//! Repository ports

mod repositories;

pub use repositories::{
    ReactionRepository, RepoResult, ReviewRepository, TitleRepository, UserRepository,
};
