//! Reaction entity - a like or dislike on a title or a review
//!
//! Holds the pure parts of the reaction engine: the per-(user, target)
//! toggle decision and the fold that turns reaction rows into per-target
//! tallies. Persistence happens elsewhere.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Like or dislike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Dislike,
}

impl ReactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(DomainError::InvalidReactionType(other.to_string())),
        }
    }
}

/// What a reaction points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionTarget {
    Title(i64),
    Review(i64),
}

impl ReactionTarget {
    /// Resolve a target from optional ids. The title id wins when both are set.
    pub fn from_ids(title_id: Option<i64>, review_id: Option<i64>) -> Result<Self, DomainError> {
        match (title_id, review_id) {
            (Some(id), _) => Ok(Self::Title(id)),
            (None, Some(id)) => Ok(Self::Review(id)),
            (None, None) => Err(DomainError::TargetRequired),
        }
    }

    #[inline]
    pub fn id(&self) -> i64 {
        match self {
            Self::Title(id) | Self::Review(id) => *id,
        }
    }

    pub fn title_id(&self) -> Option<i64> {
        match self {
            Self::Title(id) => Some(*id),
            Self::Review(_) => None,
        }
    }

    pub fn review_id(&self) -> Option<i64> {
        match self {
            Self::Review(id) => Some(*id),
            Self::Title(_) => None,
        }
    }
}

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: i64,
    pub user_id: i64,
    pub target: ReactionTarget,
    pub kind: ReactionType,
    pub created_at: DateTime<Utc>,
}

/// Write needed to move a (user, target) pair to its next toggle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionChange {
    Insert(ReactionType),
    Delete { id: i64 },
    Update { id: i64, kind: ReactionType },
}

impl ReactionChange {
    /// Decide the write for `requested` given the user's current row, if any.
    ///
    /// Same type toggles off, a different type flips in place.
    pub fn plan(existing: Option<&Reaction>, requested: ReactionType) -> Self {
        match existing {
            None => Self::Insert(requested),
            Some(row) if row.kind == requested => Self::Delete { id: row.id },
            Some(row) => Self::Update {
                id: row.id,
                kind: requested,
            },
        }
    }
}

/// Result of applying a reaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionOutcome {
    Created(Reaction),
    Removed,
    Switched(Reaction),
}

impl ReactionOutcome {
    /// The new row, only when one was inserted
    pub fn into_created(self) -> Option<Reaction> {
        match self {
            Self::Created(reaction) => Some(reaction),
            Self::Removed | Self::Switched(_) => None,
        }
    }
}

/// Aggregated likes/dislikes for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionTally {
    pub target: ReactionTarget,
    pub likes: i64,
    pub dislikes: i64,
    pub current_user_reaction: Option<ReactionType>,
}

impl ReactionTally {
    fn empty(target: ReactionTarget) -> Self {
        Self {
            target,
            likes: 0,
            dislikes: 0,
            current_user_reaction: None,
        }
    }
}

/// Fold reaction rows into one tally per target.
///
/// Tallies come out in the order their target is first seen in `rows`.
/// Targets without rows get no tally.
pub fn tally_reactions<'a, I>(rows: I, current_user: Option<i64>) -> Vec<ReactionTally>
where
    I: IntoIterator<Item = &'a Reaction>,
{
    let mut index: HashMap<ReactionTarget, usize> = HashMap::new();
    let mut tallies: Vec<ReactionTally> = Vec::new();

    for row in rows {
        let slot = *index.entry(row.target).or_insert_with(|| {
            tallies.push(ReactionTally::empty(row.target));
            tallies.len() - 1
        });
        let tally = &mut tallies[slot];

        match row.kind {
            ReactionType::Like => tally.likes += 1,
            ReactionType::Dislike => tally.dislikes += 1,
        }
        if current_user == Some(row.user_id) {
            tally.current_user_reaction = Some(row.kind);
        }
    }

    tallies
}
