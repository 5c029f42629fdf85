//! Moderation reporting types.

use serde::{Deserialize, Serialize};

/// Experience counts by moderation status.
///
/// Computed from the status index, not by scanning records, so it stays
/// cheap as the store grows. `total` is always the sum of the other
/// three under normal operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationStats {
    /// All experiences ever submitted.
    pub total: u64,
    /// Awaiting review.
    pub pending: u64,
    /// Approved and publicly visible.
    pub published: u64,
    /// Rejected with feedback.
    pub rejected: u64,
}
