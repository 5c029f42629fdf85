//! Vote record types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{ExperienceId, Timestamp, UserId};

/// The two directions a vote can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteKind {
    /// Counts toward the experience's `upvotes`.
    Up,
    /// Counts toward the experience's `downvotes`.
    Down,
}

impl VoteKind {
    /// The other direction.
    pub fn opposite(self) -> Self {
        match self {
            VoteKind::Up => VoteKind::Down,
            VoteKind::Down => VoteKind::Up,
        }
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteKind::Up => write!(f, "up"),
            VoteKind::Down => write!(f, "down"),
        }
    }
}

/// One user's standing vote on one experience.
///
/// At most one of these exists per `(experience_id, voter)` pair; the
/// pair is the record's identity in storage. `created_at` is when the
/// user first voted on this experience, `updated_at` moves every time
/// the vote's direction changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// The experience this vote is on.
    pub experience_id: ExperienceId,
    /// Who cast it.
    pub voter: UserId,
    /// Current direction.
    pub kind: VoteKind,
    /// When the voter first voted on this experience.
    pub created_at: Timestamp,
    /// When the direction last changed.
    pub updated_at: Timestamp,
}
