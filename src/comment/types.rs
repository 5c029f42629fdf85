//! Comment record types.

use serde::{Deserialize, Serialize};

use crate::types::{CommentId, ExperienceId, Timestamp, UserId};

/// A stored comment on an experience.
///
/// Threading is single-level: a comment either sits at the top level
/// (`parent_id: None`) or replies to a top-level comment. Replies to
/// replies are rejected at posting time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier (UUID v7, time-ordered).
    pub id: CommentId,
    /// The experience this comment is on.
    pub experience_id: ExperienceId,
    /// Commenter's identity. Immutable.
    pub author: UserId,
    /// Display-name snapshot taken at posting time.
    pub username: String,
    /// Comment body.
    pub content: String,
    /// Top-level comment this replies to, if any.
    pub parent_id: Option<CommentId>,
    /// Set once the content has been edited at least once.
    pub is_edited: bool,
    /// When the comment was posted. Immutable.
    pub created_at: Timestamp,
    /// Last content edit.
    pub updated_at: Timestamp,
}

impl Comment {
    /// Whether this comment replies to another comment.
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Input for posting a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// The experience to comment on.
    pub experience_id: ExperienceId,
    /// Commenter's identity.
    pub author: UserId,
    /// Commenter's display name, snapshotted onto the record.
    pub username: String,
    /// Comment body.
    pub content: String,
    /// Top-level comment to reply to, or `None` for a top-level comment.
    pub parent_id: Option<CommentId>,
}
