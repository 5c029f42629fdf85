//! Moderation: the pending → published/rejected state machine.
//!
//! Every submission enters the store as `Pending` and is invisible to the
//! published feed until an admin rules on it. The transitions are:
//!
//! ```text
//!          approve ──▶ Published   (published_at stamped)
//! Pending ─┤
//!          reject  ──▶ Rejected    (admin_feedback stored)
//! ```
//!
//! Both moves are one-way and only valid from `Pending` — re-approving a
//! published experience or ruling on a rejected one is a state conflict.
//! The status check happens inside the storage write transaction, so two
//! admins racing on the same submission cannot both win.
//!
//! Moderation operations are available on [`Waypost`](crate::Waypost):
//!
//! - [`approve_experience(admin, id)`](crate::Waypost::approve_experience)
//! - [`reject_experience(admin, id, feedback)`](crate::Waypost::reject_experience)
//! - [`pending_queue()`](crate::Waypost::pending_queue)
//! - [`moderation_stats()`](crate::Waypost::moderation_stats)

pub mod types;

pub use types::ModerationStats;

use crate::error::{PermissionError, ValidationError, WaypostError};
use crate::storage::schema::MAX_FEEDBACK_LENGTH;
use crate::types::Principal;

/// Checks that the caller may moderate.
pub(crate) fn ensure_admin(principal: &Principal) -> Result<(), WaypostError> {
    if !principal.is_admin() {
        return Err(PermissionError::admin_required(principal.id.as_str()).into());
    }
    Ok(())
}

/// Validates rejection feedback: non-empty after trimming, bounded.
pub(crate) fn validate_feedback(feedback: &str) -> Result<(), WaypostError> {
    if feedback.trim().is_empty() {
        return Err(ValidationError::required_field("feedback").into());
    }
    if feedback.len() > MAX_FEEDBACK_LENGTH {
        return Err(ValidationError::invalid_field(
            "feedback",
            format!(
                "exceeds max length of {} bytes (got {})",
                MAX_FEEDBACK_LENGTH,
                feedback.len()
            ),
        )
        .into());
    }
    Ok(())
}
