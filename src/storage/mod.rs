//! Storage layer abstractions for Waypost.
//!
//! This module provides a trait-based abstraction over the storage engine,
//! allowing different backends to be used (e.g., redb, mock for testing).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Waypost                                 │
//! │                         │                                    │
//! │                         ▼                                    │
//! │              ┌─────────────────────┐                        │
//! │              │   StorageEngine     │  ← Trait               │
//! │              └─────────────────────┘                        │
//! │                    ▲         ▲                              │
//! │                    │         │                              │
//! │         ┌─────────┴─┐   ┌───┴─────────┐                    │
//! │         │RedbStorage│   │ MockStorage │                    │
//! │         └───────────┘   └─────────────┘                    │
//! │           (prod)           (test)                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations that touch more than one fact — a vote and its counters, a
//! status flip and its index entry, a comment and its count — are single
//! trait methods so implementations can make them atomic.

pub mod redb;
pub mod schema;

pub use self::redb::RedbStorage;
pub use schema::{DatabaseMetadata, SCHEMA_VERSION};

use std::path::Path;

use crate::comment::Comment;
use crate::config::Config;
use crate::error::Result;
use crate::experience::Experience;
use crate::moderation::ModerationStats;
use crate::types::{CommentId, ExperienceId, Timestamp, UserId};
use crate::vote::{Vote, VoteKind, VoteTransition};

/// Storage engine trait for Waypost.
///
/// This trait defines the contract that any storage backend must implement.
/// The primary implementation is [`RedbStorage`], but other implementations
/// can be created for testing or alternative backends.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow the database to be shared
/// across threads. The engine handles internal synchronization; compound
/// operations (voting, moderating, commenting) must be atomic with respect
/// to each other.
///
/// # Example
///
/// ```rust,ignore
/// use waypost::storage::{StorageEngine, RedbStorage};
///
/// let storage = RedbStorage::open("./waypost.db", &config)?;
/// let metadata = storage.metadata();
/// println!("Schema version: {}", metadata.schema_version);
/// ```
pub trait StorageEngine: Send + Sync {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Returns the database metadata.
    fn metadata(&self) -> &DatabaseMetadata;

    /// Closes the storage engine, flushing any pending writes.
    ///
    /// This method consumes the storage engine. After calling `close()`,
    /// the engine cannot be used.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend supports reporting flush failures.
    /// Note: the current redb backend flushes on drop (infallible), so
    /// this always returns `Ok(())` for [`RedbStorage`].
    fn close(self: Box<Self>) -> Result<()>;

    /// Returns the path to the database file, if applicable.
    ///
    /// Some storage implementations (like in-memory) may not have a path.
    fn path(&self) -> Option<&Path>;

    // =========================================================================
    // Experience Storage Operations
    // =========================================================================

    /// Inserts a new experience record.
    ///
    /// Writes atomically to two tables in a single transaction:
    /// - `EXPERIENCES_TABLE` — the record itself
    /// - `EXPERIENCES_BY_STATUS_TABLE` — time-ordered status index entry
    ///
    /// The caller is responsible for validation; storage trusts the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or serialization fails.
    fn insert_experience(&self, experience: &Experience) -> Result<()>;

    /// Retrieves an experience by ID.
    ///
    /// Returns `None` if no experience with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the read transaction or deserialization fails.
    fn get_experience(&self, id: ExperienceId) -> Result<Option<Experience>>;

    /// Lists every experience record, in no particular order.
    ///
    /// Listings filter and sort in memory after this scan.
    fn all_experiences(&self) -> Result<Vec<Experience>>;

    /// Lists pending experiences, oldest submission first.
    ///
    /// Walks the status index for the pending key, which is ordered by
    /// submission time, so this is the moderation queue in review order.
    fn pending_experiences(&self) -> Result<Vec<Experience>>;

    /// Counts experiences per moderation status.
    ///
    /// Counts index entries instead of scanning records, so no
    /// deserialization happens.
    fn status_counts(&self) -> Result<ModerationStats>;

    // =========================================================================
    // Moderation Operations
    // =========================================================================

    /// Publishes a pending experience, returning the updated record.
    ///
    /// Atomically flips the status, stamps `published_at` and
    /// `updated_at`, and moves the status index entry. The pending check
    /// happens inside the write transaction, so two racing moderators
    /// cannot both win.
    ///
    /// # Errors
    ///
    /// - [`NotFoundError::Experience`](crate::error::NotFoundError) if the ID is unknown
    /// - [`StateConflictError::NotPending`](crate::error::StateConflictError) if already ruled on
    fn publish_experience(&self, id: ExperienceId, now: Timestamp) -> Result<Experience>;

    /// Rejects a pending experience with feedback, returning the updated
    /// record.
    ///
    /// Same atomicity and errors as [`publish_experience`](Self::publish_experience);
    /// `published_at` stays unset and the feedback is stored on the record.
    fn reject_experience(
        &self,
        id: ExperienceId,
        feedback: &str,
        now: Timestamp,
    ) -> Result<Experience>;

    // =========================================================================
    // Vote Operations
    // =========================================================================

    /// Applies one vote request and returns what it did.
    ///
    /// Looks up the voter's standing vote, decides the transition
    /// (cast / retract / switch), writes the vote record change and the
    /// counter deltas on the experience — all in one write transaction.
    /// Serialized writes are what keep the counters equal to the vote
    /// records under concurrent voting.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Experience`](crate::error::NotFoundError)
    /// if the experience does not exist.
    fn cast_vote(
        &self,
        experience_id: ExperienceId,
        voter: &UserId,
        kind: VoteKind,
        now: Timestamp,
    ) -> Result<VoteTransition>;

    /// Retrieves one user's standing vote on an experience.
    ///
    /// Returns `None` when the user has no standing vote.
    fn get_vote(&self, experience_id: ExperienceId, voter: &UserId) -> Result<Option<Vote>>;

    /// Lists all standing votes on an experience.
    ///
    /// Range-scans the vote table over the experience's key prefix.
    fn votes_for_experience(&self, experience_id: ExperienceId) -> Result<Vec<Vote>>;

    // =========================================================================
    // Comment Operations
    // =========================================================================

    /// Inserts a comment and bumps its experience's comment count.
    ///
    /// Verifies inside the write transaction that the experience exists
    /// and, for replies, that the parent exists, belongs to the same
    /// experience, and is itself top-level.
    ///
    /// # Errors
    ///
    /// - [`NotFoundError::Experience`](crate::error::NotFoundError) if the experience is unknown
    /// - [`NotFoundError::Comment`](crate::error::NotFoundError) if the parent is unknown
    /// - [`ValidationError::InvalidField`](crate::error::ValidationError) if the parent
    ///   belongs to a different experience or is itself a reply
    fn insert_comment(&self, comment: &Comment) -> Result<()>;

    /// Retrieves a comment by ID.
    fn get_comment(&self, id: CommentId) -> Result<Option<Comment>>;

    /// Lists an experience's comments, oldest first.
    ///
    /// Walks the per-experience comment index, which is ordered by
    /// posting time. Replies appear in the same flat list.
    fn comments_for_experience(&self, experience_id: ExperienceId) -> Result<Vec<Comment>>;

    /// Replaces a comment's content, returning the updated record.
    ///
    /// Marks the comment edited and stamps `updated_at`. Author
    /// permission checks are the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Comment`](crate::error::NotFoundError)
    /// if the ID is unknown.
    fn update_comment_content(
        &self,
        id: CommentId,
        content: &str,
        now: Timestamp,
    ) -> Result<Comment>;

    /// Deletes a comment and decrements its experience's comment count.
    ///
    /// Replies to the deleted comment are left in place. Returns `true`
    /// if the comment existed and was deleted, `false` if not found.
    fn delete_comment(&self, id: CommentId) -> Result<bool>;
}

/// Opens a storage engine at the given path.
///
/// This is a convenience function that creates a [`RedbStorage`] instance.
/// For more control, use `RedbStorage::open()` directly.
///
/// # Arguments
///
/// * `path` - Path to the database file (created if it doesn't exist)
/// * `config` - Database configuration
///
/// # Errors
///
/// Returns an error if:
/// - The database file is corrupted
/// - The database is locked by another process
/// - Schema version doesn't match
pub fn open_storage(path: impl AsRef<Path>, config: &Config) -> Result<Box<dyn StorageEngine>> {
    let storage = RedbStorage::open(path, config)?;
    Ok(Box::new(storage))
}
