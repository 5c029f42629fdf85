//! Database schema definitions and versioning.
//!
//! This module defines the table structure for the redb storage engine.
//! All table definitions are compile-time constants to ensure consistency.
//!
//! # Schema Versioning
//!
//! The schema version is stored in the metadata table. When opening an
//! existing database, we check the version and fail if it doesn't match.
//! Migration support will be added in a future release.
//!
//! # Table Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ METADATA_TABLE                                               │
//! │   Key: &str                                                  │
//! │   Value: &[u8] (bincode)                                     │
//! │   Entries: "db_metadata" -> DatabaseMetadata                 │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │ EXPERIENCES_TABLE                                            │
//! │   Key: &[u8; 16] (ExperienceId as UUID bytes)               │
//! │   Value: &[u8] (bincode-serialized Experience)              │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │ EXPERIENCES_BY_STATUS_TABLE (multimap index)                 │
//! │   Key: u8 (status tag)                                       │
//! │   Value: &[u8; 24] ([created_at BE: 8][experience id: 16])  │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │ VOTES_TABLE                                                  │
//! │   Key: &[u8] ([experience id: 16][voter UTF-8 bytes])       │
//! │   Value: &[u8] (bincode-serialized Vote)                    │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │ COMMENTS_TABLE                                               │
//! │   Key: &[u8; 16] (CommentId as UUID bytes)                  │
//! │   Value: &[u8] (bincode-serialized Comment)                 │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │ COMMENTS_BY_EXPERIENCE_TABLE (multimap index)                │
//! │   Key: &[u8; 16] (ExperienceId as UUID bytes)               │
//! │   Value: &[u8; 24] ([created_at BE: 8][comment id: 16])     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use redb::{MultimapTableDefinition, TableDefinition};
use serde::{Deserialize, Serialize};

use crate::experience::ExperienceStatus;
use crate::types::{Timestamp, UserId};

/// Current schema version.
///
/// Increment this when making breaking changes to the schema.
/// The database will refuse to open if versions don't match.
pub const SCHEMA_VERSION: u32 = 1;

/// Key of the [`DatabaseMetadata`] entry in [`METADATA_TABLE`].
pub const METADATA_KEY: &str = "db_metadata";

/// Maximum size of any single free-text field in bytes (100 KB).
pub const MAX_CONTENT_SIZE: usize = 100 * 1024;

/// Minimum length of an open post's content, in characters.
pub const MIN_OPEN_CONTENT_LENGTH: usize = 100;

/// Maximum length of a listing summary in bytes.
pub const MAX_SUMMARY_LENGTH: usize = 2_000;

/// Maximum length of a comment in bytes.
pub const MAX_COMMENT_LENGTH: usize = 10_000;

/// Maximum length of rejection feedback in bytes.
pub const MAX_FEEDBACK_LENGTH: usize = 2_000;

/// Maximum number of entries in a list field (pros, cons, resources, ...).
pub const MAX_LIST_ITEMS: usize = 25;

/// Maximum length of a single list entry in bytes.
pub const MAX_LIST_ITEM_LENGTH: usize = 500;

/// Maximum number of interview rounds per report.
pub const MAX_ROUNDS: usize = 30;

/// Maximum length of a denormalized username in bytes.
pub const MAX_USERNAME_LENGTH: usize = 100;

// ============================================================================
// Table Definitions
// ============================================================================

/// Metadata table for database-level information.
///
/// Stores schema version, creation time, and other database-wide settings.
/// Key is a string identifier, value is serialized data.
pub const METADATA_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("metadata");

/// Experiences table.
///
/// Key: ExperienceId as 16-byte UUID
/// Value: bincode-serialized Experience struct
pub const EXPERIENCES_TABLE: TableDefinition<&[u8; 16], &[u8]> =
    TableDefinition::new("experiences");

/// Index: experiences by moderation status.
///
/// Enables the pending-review queue (ascending created_at within the
/// Pending key) and per-status counts without scanning the main table.
/// Key: status tag byte
/// Value: [created_at big-endian: 8 bytes][ExperienceId: 16 bytes]
///
/// Entries follow an experience across status transitions: the transition
/// removes the entry under the old tag and inserts it under the new one
/// in the same transaction that rewrites the record.
pub const EXPERIENCES_BY_STATUS_TABLE: MultimapTableDefinition<u8, &[u8; 24]> =
    MultimapTableDefinition::new("experiences_by_status");

/// Votes table.
///
/// The composite key IS the vote's identity: at most one vote per
/// (experience, voter) pair, enforced by the key itself.
/// Key: [ExperienceId: 16 bytes][voter id UTF-8 bytes]
/// Value: bincode-serialized Vote struct
pub const VOTES_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("votes");

/// Comments table.
///
/// Key: CommentId as 16-byte UUID
/// Value: bincode-serialized Comment struct
pub const COMMENTS_TABLE: TableDefinition<&[u8; 16], &[u8]> = TableDefinition::new("comments");

/// Index: comments by experience.
///
/// Ascending iteration over one key yields chronological discussion order.
/// Key: ExperienceId as 16-byte UUID
/// Value: [created_at big-endian: 8 bytes][CommentId: 16 bytes]
pub const COMMENTS_BY_EXPERIENCE_TABLE: MultimapTableDefinition<&[u8; 16], &[u8; 24]> =
    MultimapTableDefinition::new("comments_by_experience");

// ============================================================================
// Database Metadata
// ============================================================================

/// Database metadata stored in the metadata table.
///
/// This is serialized with bincode and stored under the key "db_metadata".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatabaseMetadata {
    /// Schema version for compatibility checking.
    pub schema_version: u32,

    /// Timestamp when the database was created.
    pub created_at: Timestamp,

    /// Last time the database was opened (updated on each open).
    pub last_opened_at: Timestamp,
}

impl DatabaseMetadata {
    /// Creates new metadata for a fresh database.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            schema_version: SCHEMA_VERSION,
            created_at: now,
            last_opened_at: now,
        }
    }

    /// Updates the last_opened_at timestamp.
    pub fn touch(&mut self) {
        self.last_opened_at = Timestamp::now();
    }

    /// Checks if this metadata is compatible with the current schema.
    pub fn is_compatible(&self) -> bool {
        self.schema_version == SCHEMA_VERSION
    }
}

impl Default for DatabaseMetadata {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Status Tags
// ============================================================================

/// Compact status discriminant used as the status-index key.
#[inline]
pub fn status_tag(status: ExperienceStatus) -> u8 {
    match status {
        ExperienceStatus::Pending => 0,
        ExperienceStatus::Published => 1,
        ExperienceStatus::Rejected => 2,
    }
}

/// Inverse of [`status_tag`]. Returns `None` for unknown bytes.
#[inline]
pub fn status_from_tag(tag: u8) -> Option<ExperienceStatus> {
    match tag {
        0 => Some(ExperienceStatus::Pending),
        1 => Some(ExperienceStatus::Published),
        2 => Some(ExperienceStatus::Rejected),
        _ => None,
    }
}

// ============================================================================
// Key Encoding Helpers
// ============================================================================

/// Encodes a (Timestamp, id) pair as a 24-byte time-ordered index entry.
///
/// Format: [timestamp_be: 8 bytes][id: 16 bytes]
///
/// Big-endian timestamp ensures lexicographic ordering matches time
/// ordering; the trailing id disambiguates entries sharing a millisecond.
#[inline]
pub fn encode_time_ordered_entry(timestamp: Timestamp, id: &[u8; 16]) -> [u8; 24] {
    let mut entry = [0u8; 24];
    entry[..8].copy_from_slice(&timestamp.to_be_bytes());
    entry[8..24].copy_from_slice(id);
    entry
}

/// Decodes the timestamp from a time-ordered index entry.
#[inline]
pub fn decode_entry_timestamp(entry: &[u8; 24]) -> Timestamp {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&entry[..8]);
    Timestamp::from_millis(i64::from_be_bytes(bytes))
}

/// Decodes the record id from a time-ordered index entry.
#[inline]
pub fn decode_entry_id(entry: &[u8; 24]) -> [u8; 16] {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&entry[8..24]);
    bytes
}

/// Encodes the composite vote key for an (experience, voter) pair.
///
/// Format: [experience_id: 16 bytes][voter id UTF-8 bytes]
#[inline]
pub fn vote_key(experience_id: &[u8; 16], voter: &UserId) -> Vec<u8> {
    let voter_bytes = voter.as_str().as_bytes();
    let mut key = Vec::with_capacity(16 + voter_bytes.len());
    key.extend_from_slice(experience_id);
    key.extend_from_slice(voter_bytes);
    key
}

/// Returns the exclusive upper bound for scanning all votes of one experience.
///
/// The bound is the 16-byte id prefix incremented as a big-endian integer.
/// `None` means the prefix is all 0xFF and the scan is unbounded above.
#[inline]
pub fn vote_prefix_end(experience_id: &[u8; 16]) -> Option<Vec<u8>> {
    let mut end = experience_id.to_vec();
    for byte in end.iter_mut().rev() {
        if *byte < u8::MAX {
            *byte += 1;
            return Some(end);
        }
        *byte = 0;
    }
    None
}
