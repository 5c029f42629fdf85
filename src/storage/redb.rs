//! redb storage engine implementation.
//!
//! This module provides the primary storage backend for Waypost using
//! [redb](https://docs.rs/redb), a pure Rust embedded key-value store.
//!
//! # Features
//!
//! - ACID transactions with MVCC
//! - Single-writer, multiple-reader concurrency
//! - Automatic crash recovery
//! - Zero external dependencies (pure Rust)
//!
//! The single-writer property does the heavy lifting for correctness:
//! every compound mutation (vote + counters, status flip + index move,
//! comment + count) runs in one serialized write transaction, so the
//! denormalized counters and indexes cannot drift from the records.
//!
//! # File Layout
//!
//! When you open a database at `./waypost.db`, redb creates:
//! - `./waypost.db` - Main database file
//! - `./waypost.db.lock` - Lock file for writer coordination (may not be visible)

use std::path::{Path, PathBuf};

use ::redb::{Database, MultimapValue, ReadableMultimapTable, ReadableTable};
use tracing::{debug, info, instrument, warn};

use super::schema::{
    decode_entry_id, encode_time_ordered_entry, status_tag, vote_key, vote_prefix_end,
    DatabaseMetadata, COMMENTS_BY_EXPERIENCE_TABLE, COMMENTS_TABLE, EXPERIENCES_BY_STATUS_TABLE,
    EXPERIENCES_TABLE, METADATA_KEY, METADATA_TABLE, SCHEMA_VERSION, VOTES_TABLE,
};
use super::StorageEngine;
use crate::comment::{check_parent, Comment};
use crate::config::Config;
use crate::error::{
    NotFoundError, Result, StateConflictError, StorageError, WaypostError,
};
use crate::experience::{Experience, ExperienceStatus};
use crate::moderation::ModerationStats;
use crate::types::{CommentId, ExperienceId, Timestamp, UserId};
use crate::vote::{Vote, VoteKind, VoteTransition};

/// redb storage engine wrapper.
///
/// This struct holds the redb database handle and cached metadata.
/// It implements [`StorageEngine`] for use with Waypost.
///
/// # Thread Safety
///
/// `RedbStorage` is `Send + Sync`. redb handles internal synchronization
/// using MVCC for readers and exclusive locking for writers.
#[derive(Debug)]
pub struct RedbStorage {
    /// The redb database handle.
    db: Database,

    /// Cached database metadata.
    metadata: DatabaseMetadata,

    /// Path to the database file.
    path: PathBuf,
}

impl RedbStorage {
    /// Opens or creates a database at the given path.
    ///
    /// If the database doesn't exist, it will be created and initialized.
    /// If it exists, its metadata is validated against the current schema
    /// version.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the database file
    /// * `config` - Database configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file is corrupted
    /// - The database is locked by another process
    /// - Schema version doesn't match
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use waypost::{Config, storage::RedbStorage};
    ///
    /// let storage = RedbStorage::open("./waypost.db", &Config::default())?;
    /// ```
    #[instrument(skip(config), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let db_exists = path.exists();

        debug!(db_exists = db_exists, "Opening storage engine");

        // Create or open the database
        let db = Self::create_database(path, config)?;

        if db_exists {
            // Validate existing database
            Self::open_existing(db, path.to_path_buf())
        } else {
            // Initialize new database
            Self::initialize_new(db, path.to_path_buf())
        }
    }

    /// Creates the redb database with appropriate settings.
    fn create_database(path: &Path, _config: &Config) -> Result<Database> {
        let builder = Database::builder();

        // Note: redb 2.x doesn't have set_cache_size, it manages memory internally
        // The cache_size_mb config will be used for future optimizations

        // Note: redb doesn't expose a typed error variant for lock conflicts,
        // so we detect them via error message string matching. This may need
        // updating if redb changes its error messages in a future version.
        let db = builder.create(path).map_err(|e| {
            if e.to_string().contains("locked") {
                StorageError::DatabaseLocked
            } else {
                StorageError::Redb(e.to_string())
            }
        })?;

        debug!("Database file opened successfully");
        Ok(db)
    }

    /// Initializes a new database with tables and metadata.
    #[instrument(skip(db), fields(path = %path.display()))]
    fn initialize_new(db: Database, path: PathBuf) -> Result<Self> {
        info!("Initializing new database");

        let metadata = DatabaseMetadata::new();

        // Create all tables and write metadata in a single transaction
        let write_txn = db.begin_write().map_err(StorageError::from)?;

        {
            // Create the metadata table and write metadata
            let mut meta_table = write_txn.open_table(METADATA_TABLE)?;
            let metadata_bytes = bincode::serialize(&metadata)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            meta_table.insert(METADATA_KEY, metadata_bytes.as_slice())?;

            // Create other tables (they're created on first access)
            let _ = write_txn.open_table(EXPERIENCES_TABLE)?;
            let _ = write_txn.open_table(VOTES_TABLE)?;
            let _ = write_txn.open_table(COMMENTS_TABLE)?;
            let _ = write_txn.open_multimap_table(EXPERIENCES_BY_STATUS_TABLE)?;
            let _ = write_txn.open_multimap_table(COMMENTS_BY_EXPERIENCE_TABLE)?;
        }

        write_txn.commit().map_err(StorageError::from)?;

        info!(schema_version = SCHEMA_VERSION, "Database initialized");

        Ok(Self { db, metadata, path })
    }

    /// Opens and validates an existing database.
    #[instrument(skip(db), fields(path = %path.display()))]
    fn open_existing(db: Database, path: PathBuf) -> Result<Self> {
        info!("Opening existing database");

        // Read metadata from the database
        let read_txn = db.begin_read().map_err(StorageError::from)?;

        let metadata = {
            let meta_table = read_txn.open_table(METADATA_TABLE).map_err(|e| {
                StorageError::corrupted(format!("Cannot open metadata table: {}", e))
            })?;

            let metadata_bytes = meta_table
                .get(METADATA_KEY)
                .map_err(StorageError::from)?
                .ok_or_else(|| StorageError::corrupted("Missing database metadata"))?;

            bincode::deserialize::<DatabaseMetadata>(metadata_bytes.value())
                .map_err(|e| StorageError::corrupted(format!("Invalid metadata format: {}", e)))?
        };

        drop(read_txn);

        // Validate schema version
        if metadata.schema_version != SCHEMA_VERSION {
            warn!(
                expected = SCHEMA_VERSION,
                found = metadata.schema_version,
                "Schema version mismatch"
            );
            return Err(WaypostError::Storage(StorageError::SchemaVersionMismatch {
                expected: SCHEMA_VERSION,
                found: metadata.schema_version,
            }));
        }

        // Update last_opened_at timestamp
        let mut metadata = metadata;
        metadata.touch();

        let write_txn = db.begin_write().map_err(StorageError::from)?;
        {
            let mut meta_table = write_txn.open_table(METADATA_TABLE)?;
            let metadata_bytes = bincode::serialize(&metadata)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            meta_table.insert(METADATA_KEY, metadata_bytes.as_slice())?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        info!(
            schema_version = metadata.schema_version,
            "Database opened successfully"
        );

        Ok(Self { db, metadata, path })
    }

    /// Returns a reference to the underlying redb database.
    ///
    /// This is for internal use by storage tests.
    #[inline]
    #[allow(dead_code)]
    pub(crate) fn database(&self) -> &Database {
        &self.db
    }

    /// Fetches records through the status index, in index (submission
    /// time) order.
    fn experiences_with_status(&self, status: ExperienceStatus) -> Result<Vec<Experience>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let by_status = read_txn.open_multimap_table(EXPERIENCES_BY_STATUS_TABLE)?;
        let records = read_txn.open_table(EXPERIENCES_TABLE)?;

        let mut experiences = Vec::new();
        for entry in by_status.get(status_tag(status))? {
            let entry = entry.map_err(StorageError::from)?;
            let id_bytes = decode_entry_id(entry.value());
            let record = records.get(&id_bytes)?.ok_or_else(|| {
                StorageError::corrupted("Status index points to a missing experience")
            })?;
            let experience: Experience = bincode::deserialize(record.value())
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            experiences.push(experience);
        }

        Ok(experiences)
    }
}

/// Counts multimap index entries without touching the records they point to.
fn count_index_entries(entries: MultimapValue<'_, &'static [u8; 24]>) -> Result<u64> {
    let mut count = 0u64;
    for entry in entries {
        entry.map_err(StorageError::from)?;
        count += 1;
    }
    Ok(count)
}

impl StorageEngine for RedbStorage {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    fn metadata(&self) -> &DatabaseMetadata {
        &self.metadata
    }

    #[instrument(skip(self))]
    fn close(self: Box<Self>) -> Result<()> {
        info!("Closing storage engine");

        // redb flushes all data durably on drop. Since `Database::drop` is
        // infallible, this method currently always returns Ok(()). The Result
        // return type is retained for API forward-compatibility if a future
        // storage backend can report flush errors.
        drop(self.db);

        info!("Storage engine closed");
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    // =========================================================================
    // Experience Storage Operations
    // =========================================================================

    fn insert_experience(&self, experience: &Experience) -> Result<()> {
        let bytes = bincode::serialize(experience)
            .map_err(|e| StorageError::serialization(e.to_string()))?;
        let entry = encode_time_ordered_entry(experience.created_at, experience.id.as_bytes());

        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        {
            let mut records = write_txn.open_table(EXPERIENCES_TABLE)?;
            records.insert(experience.id.as_bytes(), bytes.as_slice())?;

            let mut by_status = write_txn.open_multimap_table(EXPERIENCES_BY_STATUS_TABLE)?;
            by_status.insert(status_tag(experience.status), &entry)?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        debug!(id = %experience.id, kind = %experience.kind(), "Experience stored");
        Ok(())
    }

    fn get_experience(&self, id: ExperienceId) -> Result<Option<Experience>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = read_txn.open_table(EXPERIENCES_TABLE)?;

        match table.get(id.as_bytes())? {
            Some(value) => {
                let experience: Experience = bincode::deserialize(value.value())
                    .map_err(|e| StorageError::serialization(e.to_string()))?;
                Ok(Some(experience))
            }
            None => Ok(None),
        }
    }

    fn all_experiences(&self) -> Result<Vec<Experience>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = read_txn.open_table(EXPERIENCES_TABLE)?;

        let mut experiences = Vec::new();
        for result in table.iter()? {
            let (_, value) = result.map_err(StorageError::from)?;
            let experience: Experience = bincode::deserialize(value.value())
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            experiences.push(experience);
        }

        Ok(experiences)
    }

    fn pending_experiences(&self) -> Result<Vec<Experience>> {
        self.experiences_with_status(ExperienceStatus::Pending)
    }

    fn status_counts(&self) -> Result<ModerationStats> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let by_status = read_txn.open_multimap_table(EXPERIENCES_BY_STATUS_TABLE)?;

        let pending = count_index_entries(by_status.get(status_tag(ExperienceStatus::Pending))?)?;
        let published =
            count_index_entries(by_status.get(status_tag(ExperienceStatus::Published))?)?;
        let rejected =
            count_index_entries(by_status.get(status_tag(ExperienceStatus::Rejected))?)?;

        Ok(ModerationStats {
            total: pending + published + rejected,
            pending,
            published,
            rejected,
        })
    }

    // =========================================================================
    // Moderation Operations
    // =========================================================================

    fn publish_experience(&self, id: ExperienceId, now: Timestamp) -> Result<Experience> {
        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        let published;
        {
            let mut records = write_txn.open_table(EXPERIENCES_TABLE)?;
            let mut experience: Experience = {
                match records.get(id.as_bytes())? {
                    Some(value) => bincode::deserialize(value.value())
                        .map_err(|e| StorageError::serialization(e.to_string()))?,
                    // Dropping the transaction rolls it back
                    None => return Err(NotFoundError::experience(id.to_string()).into()),
                }
            };

            if !experience.status.is_pending() {
                return Err(
                    StateConflictError::not_pending(id.to_string(), experience.status).into(),
                );
            }

            let entry = encode_time_ordered_entry(experience.created_at, id.as_bytes());
            experience.status = ExperienceStatus::Published;
            experience.published_at = Some(now);
            experience.updated_at = now;

            let bytes = bincode::serialize(&experience)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            records.insert(id.as_bytes(), bytes.as_slice())?;

            let mut by_status = write_txn.open_multimap_table(EXPERIENCES_BY_STATUS_TABLE)?;
            by_status.remove(status_tag(ExperienceStatus::Pending), &entry)?;
            by_status.insert(status_tag(ExperienceStatus::Published), &entry)?;

            published = experience;
        }
        write_txn.commit().map_err(StorageError::from)?;

        debug!(id = %id, "Experience published");
        Ok(published)
    }

    fn reject_experience(
        &self,
        id: ExperienceId,
        feedback: &str,
        now: Timestamp,
    ) -> Result<Experience> {
        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        let rejected;
        {
            let mut records = write_txn.open_table(EXPERIENCES_TABLE)?;
            let mut experience: Experience = {
                match records.get(id.as_bytes())? {
                    Some(value) => bincode::deserialize(value.value())
                        .map_err(|e| StorageError::serialization(e.to_string()))?,
                    None => return Err(NotFoundError::experience(id.to_string()).into()),
                }
            };

            if !experience.status.is_pending() {
                return Err(
                    StateConflictError::not_pending(id.to_string(), experience.status).into(),
                );
            }

            let entry = encode_time_ordered_entry(experience.created_at, id.as_bytes());
            experience.status = ExperienceStatus::Rejected;
            experience.admin_feedback = Some(feedback.to_string());
            experience.updated_at = now;

            let bytes = bincode::serialize(&experience)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            records.insert(id.as_bytes(), bytes.as_slice())?;

            let mut by_status = write_txn.open_multimap_table(EXPERIENCES_BY_STATUS_TABLE)?;
            by_status.remove(status_tag(ExperienceStatus::Pending), &entry)?;
            by_status.insert(status_tag(ExperienceStatus::Rejected), &entry)?;

            rejected = experience;
        }
        write_txn.commit().map_err(StorageError::from)?;

        debug!(id = %id, "Experience rejected");
        Ok(rejected)
    }

    // =========================================================================
    // Vote Operations
    // =========================================================================

    fn cast_vote(
        &self,
        experience_id: ExperienceId,
        voter: &UserId,
        kind: VoteKind,
        now: Timestamp,
    ) -> Result<VoteTransition> {
        let key = vote_key(experience_id.as_bytes(), voter);

        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        let transition;
        {
            let mut records = write_txn.open_table(EXPERIENCES_TABLE)?;
            let mut experience: Experience = {
                match records.get(experience_id.as_bytes())? {
                    Some(value) => bincode::deserialize(value.value())
                        .map_err(|e| StorageError::serialization(e.to_string()))?,
                    None => {
                        return Err(NotFoundError::experience(experience_id.to_string()).into())
                    }
                }
            };

            let mut votes = write_txn.open_table(VOTES_TABLE)?;
            let standing: Option<Vote> = {
                match votes.get(key.as_slice())? {
                    Some(value) => Some(
                        bincode::deserialize(value.value())
                            .map_err(|e| StorageError::serialization(e.to_string()))?,
                    ),
                    None => None,
                }
            };

            transition = VoteTransition::decide(standing.as_ref().map(|v| v.kind), kind);

            match transition {
                VoteTransition::Cast(kind) => {
                    let vote = Vote {
                        experience_id,
                        voter: voter.clone(),
                        kind,
                        created_at: now,
                        updated_at: now,
                    };
                    let bytes = bincode::serialize(&vote)
                        .map_err(|e| StorageError::serialization(e.to_string()))?;
                    votes.insert(key.as_slice(), bytes.as_slice())?;
                }
                VoteTransition::Retract(_) => {
                    votes.remove(key.as_slice())?;
                }
                VoteTransition::Switch { to, .. } => {
                    // decide() only yields Switch when a vote is standing
                    if let Some(mut vote) = standing {
                        vote.kind = to;
                        vote.updated_at = now;
                        let bytes = bincode::serialize(&vote)
                            .map_err(|e| StorageError::serialization(e.to_string()))?;
                        votes.insert(key.as_slice(), bytes.as_slice())?;
                    }
                }
            }

            let (up_delta, down_delta) = transition.deltas();
            experience.upvotes = experience.upvotes.saturating_add_signed(up_delta);
            experience.downvotes = experience.downvotes.saturating_add_signed(down_delta);

            let bytes = bincode::serialize(&experience)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            records.insert(experience_id.as_bytes(), bytes.as_slice())?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        debug!(
            experience = %experience_id,
            voter = %voter,
            transition = ?transition,
            "Vote applied"
        );
        Ok(transition)
    }

    fn get_vote(&self, experience_id: ExperienceId, voter: &UserId) -> Result<Option<Vote>> {
        let key = vote_key(experience_id.as_bytes(), voter);

        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = read_txn.open_table(VOTES_TABLE)?;

        match table.get(key.as_slice())? {
            Some(value) => {
                let vote: Vote = bincode::deserialize(value.value())
                    .map_err(|e| StorageError::serialization(e.to_string()))?;
                Ok(Some(vote))
            }
            None => Ok(None),
        }
    }

    fn votes_for_experience(&self, experience_id: ExperienceId) -> Result<Vec<Vote>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = read_txn.open_table(VOTES_TABLE)?;

        let start = experience_id.as_bytes().to_vec();
        let end = vote_prefix_end(experience_id.as_bytes());

        // All keys for this experience share its 16-byte prefix
        let range = match end.as_deref() {
            Some(end) => table.range::<&[u8]>(start.as_slice()..end)?,
            None => table.range::<&[u8]>(start.as_slice()..)?,
        };

        let mut votes = Vec::new();
        for entry in range {
            let (_, value) = entry.map_err(StorageError::from)?;
            let vote: Vote = bincode::deserialize(value.value())
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            votes.push(vote);
        }

        Ok(votes)
    }

    // =========================================================================
    // Comment Operations
    // =========================================================================

    fn insert_comment(&self, comment: &Comment) -> Result<()> {
        let bytes = bincode::serialize(comment)
            .map_err(|e| StorageError::serialization(e.to_string()))?;
        let entry = encode_time_ordered_entry(comment.created_at, comment.id.as_bytes());

        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        {
            let mut records = write_txn.open_table(EXPERIENCES_TABLE)?;
            let mut experience: Experience = {
                match records.get(comment.experience_id.as_bytes())? {
                    Some(value) => bincode::deserialize(value.value())
                        .map_err(|e| StorageError::serialization(e.to_string()))?,
                    None => {
                        return Err(
                            NotFoundError::experience(comment.experience_id.to_string()).into()
                        )
                    }
                }
            };

            let mut comments = write_txn.open_table(COMMENTS_TABLE)?;

            // Reply rules are checked against the live parent record
            if let Some(parent_id) = comment.parent_id {
                let parent: Comment = {
                    match comments.get(parent_id.as_bytes())? {
                        Some(value) => bincode::deserialize(value.value())
                            .map_err(|e| StorageError::serialization(e.to_string()))?,
                        None => return Err(NotFoundError::comment(parent_id.to_string()).into()),
                    }
                };
                check_parent(&parent, comment.experience_id)?;
            }

            comments.insert(comment.id.as_bytes(), bytes.as_slice())?;

            let mut by_experience = write_txn.open_multimap_table(COMMENTS_BY_EXPERIENCE_TABLE)?;
            by_experience.insert(comment.experience_id.as_bytes(), &entry)?;

            experience.comment_count = experience.comment_count.saturating_add(1);
            let experience_bytes = bincode::serialize(&experience)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            records.insert(comment.experience_id.as_bytes(), experience_bytes.as_slice())?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        debug!(id = %comment.id, experience = %comment.experience_id, "Comment stored");
        Ok(())
    }

    fn get_comment(&self, id: CommentId) -> Result<Option<Comment>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let table = read_txn.open_table(COMMENTS_TABLE)?;

        match table.get(id.as_bytes())? {
            Some(value) => {
                let comment: Comment = bincode::deserialize(value.value())
                    .map_err(|e| StorageError::serialization(e.to_string()))?;
                Ok(Some(comment))
            }
            None => Ok(None),
        }
    }

    fn comments_for_experience(&self, experience_id: ExperienceId) -> Result<Vec<Comment>> {
        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let by_experience = read_txn.open_multimap_table(COMMENTS_BY_EXPERIENCE_TABLE)?;
        let records = read_txn.open_table(COMMENTS_TABLE)?;

        let mut comments = Vec::new();
        for entry in by_experience.get(experience_id.as_bytes())? {
            let entry = entry.map_err(StorageError::from)?;
            let id_bytes = decode_entry_id(entry.value());
            let record = records.get(&id_bytes)?.ok_or_else(|| {
                StorageError::corrupted("Comment index points to a missing comment")
            })?;
            let comment: Comment = bincode::deserialize(record.value())
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            comments.push(comment);
        }

        Ok(comments)
    }

    fn update_comment_content(
        &self,
        id: CommentId,
        content: &str,
        now: Timestamp,
    ) -> Result<Comment> {
        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        let updated;
        {
            let mut comments = write_txn.open_table(COMMENTS_TABLE)?;
            let mut comment: Comment = {
                match comments.get(id.as_bytes())? {
                    Some(value) => bincode::deserialize(value.value())
                        .map_err(|e| StorageError::serialization(e.to_string()))?,
                    None => return Err(NotFoundError::comment(id.to_string()).into()),
                }
            };

            comment.content = content.to_string();
            comment.is_edited = true;
            comment.updated_at = now;

            let bytes = bincode::serialize(&comment)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            comments.insert(id.as_bytes(), bytes.as_slice())?;

            updated = comment;
        }
        write_txn.commit().map_err(StorageError::from)?;

        debug!(id = %id, "Comment edited");
        Ok(updated)
    }

    fn delete_comment(&self, id: CommentId) -> Result<bool> {
        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        let existed;
        {
            let mut comments = write_txn.open_table(COMMENTS_TABLE)?;
            let removed: Option<Comment> = {
                match comments.remove(id.as_bytes())? {
                    Some(value) => Some(
                        bincode::deserialize(value.value())
                            .map_err(|e| StorageError::serialization(e.to_string()))?,
                    ),
                    None => None,
                }
            };

            match removed {
                Some(comment) => {
                    let entry = encode_time_ordered_entry(comment.created_at, id.as_bytes());
                    let mut by_experience =
                        write_txn.open_multimap_table(COMMENTS_BY_EXPERIENCE_TABLE)?;
                    by_experience.remove(comment.experience_id.as_bytes(), &entry)?;

                    let mut records = write_txn.open_table(EXPERIENCES_TABLE)?;
                    let mut experience: Experience = {
                        match records.get(comment.experience_id.as_bytes())? {
                            Some(value) => bincode::deserialize(value.value())
                                .map_err(|e| StorageError::serialization(e.to_string()))?,
                            None => {
                                return Err(StorageError::corrupted(
                                    "Comment references a missing experience",
                                )
                                .into())
                            }
                        }
                    };
                    experience.comment_count = experience.comment_count.saturating_sub(1);
                    let bytes = bincode::serialize(&experience)
                        .map_err(|e| StorageError::serialization(e.to_string()))?;
                    records.insert(comment.experience_id.as_bytes(), bytes.as_slice())?;

                    existed = true;
                }
                None => existed = false,
            }
        }
        write_txn.commit().map_err(StorageError::from)?;

        if existed {
            debug!(id = %id, "Comment deleted");
        }
        Ok(existed)
    }
}

// RedbStorage is auto Send + Sync: Database, DatabaseMetadata, and PathBuf
// are all Send + Sync.
