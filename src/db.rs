//! Waypost main struct and lifecycle operations.
//!
//! The [`Waypost`] struct is the primary interface for interacting with
//! the store. It provides methods for:
//!
//! - Opening and closing the database
//! - Submitting experiences (the submission pipeline)
//! - Moderating submissions (approve/reject, queue, stats)
//! - Voting and commenting on experiences
//! - Listing experiences with filters, sorting, and cursor paging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use waypost::{Config, NewExperience, Principal, VoteKind, Waypost};
//!
//! // Open or create a database
//! let db = Waypost::open("./waypost.db", Config::default())?;
//!
//! // Submit an experience (usually assembled by the wizard)
//! let id = db.submit_experience(NewExperience {
//!     author: UserId::new("user-42"),
//!     username: "priya".to_string(),
//!     data: payload,
//!     summary: "How I cracked the on-site".to_string(),
//! })?;
//!
//! // An admin reviews and publishes it
//! db.approve_experience(&Principal::admin("mod-1"), id)?;
//!
//! // Readers vote on the published item
//! db.cast_vote(id, &UserId::new("user-7"), VoteKind::Up)?;
//!
//! // Close when done
//! db.close()?;
//! ```
//!
//! # Thread Safety
//!
//! `Waypost` is `Send + Sync` and can be shared across threads using `Arc`.
//! The underlying storage uses MVCC for concurrent reads with exclusive
//! write locking, so compound mutations (vote + counters, status flips)
//! serialize instead of racing.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use waypost::Waypost;
//!
//! let db = Arc::new(Waypost::open("./waypost.db", Config::default())?);
//!
//! // Clone Arc for use in another thread
//! let db_clone = Arc::clone(&db);
//! std::thread::spawn(move || {
//!     // Safe to use db_clone here
//! });
//! ```

use std::path::Path;

use tracing::{info, instrument};

use crate::comment::{validate_content, validate_new_comment, Comment, NewComment};
use crate::config::Config;
use crate::error::{NotFoundError, Result, WaypostError};
use crate::experience::{
    derive_tags, validate_submission, Experience, ExperienceStatus, NewExperience,
};
use crate::moderation::{ensure_admin, validate_feedback, ModerationStats};
use crate::query::{run_query, ExperienceFilter, ExperiencePage, PageRequest, SortBy};
use crate::storage::{open_storage, DatabaseMetadata, StorageEngine};
use crate::types::{CommentId, ExperienceId, Principal, Timestamp, UserId};
use crate::vote::{Vote, VoteKind};

/// The main Waypost database handle.
///
/// This is the primary interface for all store operations. Create an
/// instance with [`Waypost::open()`] and close it with [`Waypost::close()`].
///
/// # Ownership
///
/// `Waypost` owns its storage. When you call `close()`, the handle is
/// consumed and cannot be used afterward. This ensures resources are
/// properly released.
pub struct Waypost {
    /// Storage engine (redb).
    storage: Box<dyn StorageEngine>,

    /// Configuration used to open this database.
    config: Config,
}

impl std::fmt::Debug for Waypost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Waypost")
            .field("config", &self.config)
            .field("path", &self.storage.path())
            .finish_non_exhaustive()
    }
}

impl Waypost {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Opens or creates a Waypost database at the specified path.
    ///
    /// If the database doesn't exist, it will be created with the given
    /// configuration. If it exists, its schema version is validated.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the database file (created if it doesn't exist)
    /// * `config` - Configuration options for the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration is invalid (see [`Config::validate`])
    /// - Database file is corrupted
    /// - Database is locked by another process
    /// - Schema version doesn't match (needs migration)
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use waypost::{Config, Waypost};
    ///
    /// // Open with default configuration
    /// let db = Waypost::open("./waypost.db", Config::default())?;
    ///
    /// // Open with a custom page size for listings
    /// let db = Waypost::open("./waypost.db", Config {
    ///     default_page_size: 50,
    ///     ..Default::default()
    /// })?;
    /// ```
    #[instrument(skip(config), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        // Validate configuration first
        config.validate().map_err(WaypostError::from)?;

        info!("Opening Waypost");

        // Open storage engine
        let storage = open_storage(&path, &config)?;

        info!(
            sync_mode = ?config.sync_mode,
            page_size = config.default_page_size,
            "Waypost opened successfully"
        );

        Ok(Self { storage, config })
    }

    /// Closes the database, flushing all pending writes.
    ///
    /// This method consumes the `Waypost` instance, ensuring it cannot
    /// be used after closing. The underlying storage engine flushes all
    /// buffered data to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend reports a flush failure.
    /// Note: the current redb backend flushes durably on drop, so this
    /// always returns `Ok(())` in practice.
    #[instrument(skip(self))]
    pub fn close(self) -> Result<()> {
        info!("Closing Waypost");

        // Close storage (flushes pending writes)
        self.storage.close()?;

        info!("Waypost closed successfully");
        Ok(())
    }

    /// Returns a reference to the database configuration.
    ///
    /// This is the configuration that was used to open the database.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the database metadata.
    ///
    /// Metadata includes the schema version and timestamps for when the
    /// database was created and last opened.
    #[inline]
    pub fn metadata(&self) -> &DatabaseMetadata {
        self.storage.metadata()
    }

    // =========================================================================
    // Submission Pipeline
    // =========================================================================

    /// Submits a new experience for moderation.
    ///
    /// The submission is validated (author, username, summary, and the
    /// kind-specific required fields), search tags and the denormalized
    /// company/role columns are derived from the payload, and the record
    /// is persisted as [`ExperienceStatus::Pending`] with zeroed counters.
    /// It becomes publicly visible only after an admin approves it.
    ///
    /// Validation happens before the store is touched: a refused submission
    /// leaves no trace, and a wizard session that produced it stays intact
    /// for the author to fix.
    ///
    /// # Errors
    ///
    /// Returns [`WaypostError::Validation`] if any required field is missing
    /// or over its size cap, and [`WaypostError::Storage`] if persisting
    /// fails.
    #[instrument(skip(self, new), fields(kind = %new.data.kind(), author = %new.author))]
    pub fn submit_experience(&self, new: NewExperience) -> Result<ExperienceId> {
        validate_submission(&new)?;

        let tags = derive_tags(&new.data);
        let company_name = new.data.company_name().map(str::to_string);
        let role = new.data.role().map(str::to_string);

        let now = Timestamp::now();
        let experience = Experience {
            id: ExperienceId::new(),
            author: new.author,
            username: new.username,
            data: new.data,
            summary: new.summary,
            status: ExperienceStatus::Pending,
            admin_feedback: None,
            upvotes: 0,
            downvotes: 0,
            comment_count: 0,
            tags,
            company_name,
            role,
            created_at: now,
            updated_at: now,
            published_at: None,
        };

        self.storage.insert_experience(&experience)?;

        info!(id = %experience.id, "Experience submitted");
        Ok(experience.id)
    }

    /// Retrieves an experience by ID.
    ///
    /// Returns `Ok(None)` if no experience with that ID exists.
    pub fn get_experience(&self, id: ExperienceId) -> Result<Option<Experience>> {
        self.storage.get_experience(id)
    }

    /// Lists experiences with filtering, sorting, and cursor paging.
    ///
    /// The filter's absent fields match everything; `sort` orders the result
    /// descending with a deterministic ID tiebreak; `page` carries the limit
    /// (falling back to [`Config::default_page_size`]) and the continuation
    /// cursor from a previous page.
    ///
    /// A cursor is only meaningful for the same `(filter, sort)` combination
    /// that produced it.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use waypost::{ExperienceFilter, ExperienceStatus, PageRequest, SortBy};
    ///
    /// let filter = ExperienceFilter {
    ///     status: Some(ExperienceStatus::Published),
    ///     ..Default::default()
    /// };
    /// let mut page = db.list_experiences(&filter, SortBy::Upvotes, &PageRequest::first())?;
    /// while let Some(cursor) = page.next_cursor {
    ///     page = db.list_experiences(&filter, SortBy::Upvotes, &PageRequest::after(cursor))?;
    /// }
    /// ```
    pub fn list_experiences(
        &self,
        filter: &ExperienceFilter,
        sort: SortBy,
        page: &PageRequest,
    ) -> Result<ExperiencePage> {
        let experiences = self.storage.all_experiences()?;
        Ok(run_query(
            experiences,
            filter,
            sort,
            page,
            self.config.default_page_size,
        ))
    }

    // =========================================================================
    // Moderation
    // =========================================================================

    /// Approves a pending experience, making it publicly visible.
    ///
    /// Only admins may approve. The status guard and the transition are
    /// applied in one storage transaction, so concurrent approve/reject
    /// calls on the same item produce exactly one winner.
    ///
    /// # Errors
    ///
    /// - [`WaypostError::Permission`] if `actor` is not an admin
    /// - [`WaypostError::NotFound`] if the experience doesn't exist
    /// - [`WaypostError::StateConflict`] if it is not pending
    #[instrument(skip(self, actor), fields(actor = %actor.id))]
    pub fn approve_experience(&self, actor: &Principal, id: ExperienceId) -> Result<Experience> {
        ensure_admin(actor)?;

        let published = self.storage.publish_experience(id, Timestamp::now())?;

        info!(id = %id, "Experience approved");
        Ok(published)
    }

    /// Rejects a pending experience with reviewer feedback.
    ///
    /// Only admins may reject, and feedback is required (non-empty after
    /// trimming, within the size cap). The rejected item stays visible to
    /// its author together with the feedback; re-submission is a new item.
    ///
    /// # Errors
    ///
    /// - [`WaypostError::Permission`] if `actor` is not an admin
    /// - [`WaypostError::Validation`] if the feedback is blank or too long
    /// - [`WaypostError::NotFound`] if the experience doesn't exist
    /// - [`WaypostError::StateConflict`] if it is not pending
    #[instrument(skip(self, actor, feedback), fields(actor = %actor.id))]
    pub fn reject_experience(
        &self,
        actor: &Principal,
        id: ExperienceId,
        feedback: &str,
    ) -> Result<Experience> {
        ensure_admin(actor)?;
        validate_feedback(feedback)?;

        let rejected = self.storage.reject_experience(id, feedback, Timestamp::now())?;

        info!(id = %id, "Experience rejected");
        Ok(rejected)
    }

    /// Returns all pending experiences, oldest submission first.
    ///
    /// This is the moderation review queue; FIFO order keeps review fair.
    pub fn pending_queue(&self) -> Result<Vec<Experience>> {
        self.storage.pending_experiences()
    }

    /// Returns experience counts grouped by moderation status.
    pub fn moderation_stats(&self) -> Result<ModerationStats> {
        self.storage.status_counts()
    }

    // =========================================================================
    // Voting
    // =========================================================================

    /// Casts, toggles off, or switches a vote on an experience.
    ///
    /// Each (experience, voter) pair holds at most one vote:
    ///
    /// - no standing vote → the vote is recorded
    /// - standing vote of the same kind → it is removed (toggle-off)
    /// - standing vote of the other kind → it flips in place (switch)
    ///
    /// The vote record and the experience's denormalized counters move in
    /// one storage transaction. Returns the voter's resulting standing:
    /// `Some(kind)` after a cast or switch, `None` after a toggle-off.
    ///
    /// # Errors
    ///
    /// Returns [`WaypostError::NotFound`] if the experience doesn't exist.
    #[instrument(skip(self, voter), fields(voter = %voter))]
    pub fn cast_vote(
        &self,
        experience_id: ExperienceId,
        voter: &UserId,
        kind: VoteKind,
    ) -> Result<Option<VoteKind>> {
        let transition = self
            .storage
            .cast_vote(experience_id, voter, kind, Timestamp::now())?;
        Ok(transition.outcome())
    }

    /// Returns the voter's standing vote on an experience, if any.
    pub fn vote_of(&self, experience_id: ExperienceId, voter: &UserId) -> Result<Option<Vote>> {
        self.storage.get_vote(experience_id, voter)
    }

    /// Returns every standing vote on an experience.
    ///
    /// Mainly useful for audits: the counts by kind here always equal the
    /// experience's `upvotes`/`downvotes` counters.
    pub fn votes(&self, experience_id: ExperienceId) -> Result<Vec<Vote>> {
        self.storage.votes_for_experience(experience_id)
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Posts a comment on an experience.
    ///
    /// For a reply, set `parent_id` to a top-level comment on the same
    /// experience; replies to replies are refused (single-level nesting).
    /// The comment insert and the experience's `comment_count` increment
    /// happen in one storage transaction.
    ///
    /// # Errors
    ///
    /// - [`WaypostError::Validation`] if the content is blank or too long,
    ///   or the parent is on another experience or itself a reply
    /// - [`WaypostError::NotFound`] if the experience or parent is absent
    #[instrument(skip(self, new), fields(experience = %new.experience_id))]
    pub fn post_comment(&self, new: NewComment) -> Result<Comment> {
        validate_new_comment(&new)?;

        let now = Timestamp::now();
        let comment = Comment {
            id: CommentId::new(),
            experience_id: new.experience_id,
            author: new.author,
            username: new.username,
            content: new.content,
            parent_id: new.parent_id,
            is_edited: false,
            created_at: now,
            updated_at: now,
        };

        self.storage.insert_comment(&comment)?;
        Ok(comment)
    }

    /// Returns all comments on an experience, oldest first.
    ///
    /// Replies are not re-threaded under their parents; the listing is flat
    /// and chronological. Replies whose parent was deleted still appear.
    pub fn comments(&self, experience_id: ExperienceId) -> Result<Vec<Comment>> {
        self.storage.comments_for_experience(experience_id)
    }

    /// Replaces a comment's content, marking it as edited.
    ///
    /// # Errors
    ///
    /// Returns [`WaypostError::Validation`] if the new content is blank or
    /// too long, [`WaypostError::NotFound`] if the comment doesn't exist.
    #[instrument(skip(self, content))]
    pub fn edit_comment(&self, id: CommentId, content: &str) -> Result<Comment> {
        validate_content(content)?;
        self.storage.update_comment_content(id, content, Timestamp::now())
    }

    /// Deletes a comment from an experience.
    ///
    /// The delete and the `comment_count` decrement happen in one storage
    /// transaction. Replies to the deleted comment are kept (they become
    /// orphans in the flat listing), matching platform behavior.
    ///
    /// # Errors
    ///
    /// Returns [`WaypostError::NotFound`] if the comment doesn't exist or
    /// belongs to a different experience.
    #[instrument(skip(self))]
    pub fn delete_comment(&self, id: CommentId, experience_id: ExperienceId) -> Result<()> {
        let comment = self
            .storage
            .get_comment(id)?
            .ok_or_else(|| NotFoundError::comment(id.to_string()))?;
        if comment.experience_id != experience_id {
            return Err(NotFoundError::comment(id.to_string()).into());
        }

        // A concurrent delete can win between the check and the remove;
        // report it the same way as a missing comment.
        if !self.storage.delete_comment(id)? {
            return Err(NotFoundError::comment(id.to_string()).into());
        }
        Ok(())
    }
}

// Waypost is auto Send + Sync: Box<dyn StorageEngine + Send + Sync> and
// Config are both Send + Sync.
