//! Comment ledger with single-level nesting.
//!
//! Comments attach to experiences and may reply to a top-level comment,
//! never to another reply. Each experience's `comment_count` counter
//! moves with posts and deletes inside the same write transaction that
//! touches the comment record, mirroring how vote counters are kept
//! honest.
//!
//! Deleting a top-level comment leaves its replies in place as orphans;
//! readers render them without a parent rather than losing them.
//!
//! Comment operations are available on [`Waypost`](crate::Waypost):
//!
//! - [`post_comment(comment)`](crate::Waypost::post_comment)
//! - [`edit_comment(id, content)`](crate::Waypost::edit_comment)
//! - [`delete_comment(id, experience_id)`](crate::Waypost::delete_comment)
//! - [`comments(experience_id)`](crate::Waypost::comments)

pub mod types;

pub use types::{Comment, NewComment};

use crate::error::{ValidationError, WaypostError};
use crate::storage::schema::{MAX_COMMENT_LENGTH, MAX_USERNAME_LENGTH};
use crate::types::ExperienceId;

/// Validates a comment submission before storage.
pub(crate) fn validate_new_comment(comment: &NewComment) -> Result<(), WaypostError> {
    if comment.author.as_str().is_empty() {
        return Err(ValidationError::required_field("author").into());
    }
    if comment.username.is_empty() {
        return Err(ValidationError::required_field("username").into());
    }
    if comment.username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::invalid_field(
            "username",
            format!(
                "exceeds max length of {} bytes (got {})",
                MAX_USERNAME_LENGTH,
                comment.username.len()
            ),
        )
        .into());
    }
    validate_content(&comment.content)
}

/// Validates comment content: non-empty after trimming, bounded.
///
/// Shared by posting and editing.
pub(crate) fn validate_content(content: &str) -> Result<(), WaypostError> {
    if content.trim().is_empty() {
        return Err(ValidationError::required_field("content").into());
    }
    if content.len() > MAX_COMMENT_LENGTH {
        return Err(ValidationError::content_too_large(content.len(), MAX_COMMENT_LENGTH).into());
    }
    Ok(())
}

/// Checks that `parent` can take a reply on `experience_id`.
///
/// The storage layer resolves the parent id to a record first; a missing
/// parent is its own not-found error before this runs.
pub(crate) fn check_parent(
    parent: &Comment,
    experience_id: ExperienceId,
) -> Result<(), WaypostError> {
    if parent.experience_id != experience_id {
        return Err(ValidationError::invalid_field(
            "parent_id",
            "parent comment belongs to a different experience",
        )
        .into());
    }
    if parent.parent_id.is_some() {
        return Err(ValidationError::invalid_field(
            "parent_id",
            "replies to replies are not allowed",
        )
        .into());
    }
    Ok(())
}
