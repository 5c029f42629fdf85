//! Error types for Waypost.
//!
//! Waypost uses a hierarchical error system:
//! - `WaypostError` is the top-level error returned by all public APIs
//! - Specific error types (`StorageError`, `ValidationError`,
//!   `StateConflictError`, ...) provide detail
//!
//! # Error Handling Pattern
//! ```rust,ignore
//! use waypost::{Waypost, Config, Result};
//!
//! fn example() -> Result<()> {
//!     let db = Waypost::open("./waypost.db", Config::default())?;
//!     // ... operations that may fail ...
//!     db.close()?;
//!     Ok(())
//! }
//! ```

use crate::experience::ExperienceStatus;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Waypost operations.
pub type Result<T> = std::result::Result<T, WaypostError>;

/// Top-level error enum for all Waypost operations.
///
/// This is the only error type returned by public APIs.
/// Use pattern matching to handle specific error cases.
#[derive(Debug, Error)]
pub enum WaypostError {
    /// Storage layer error (I/O, corruption, transactions).
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of what's wrong with the configuration.
        reason: String,
    },

    /// Requested entity not found.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// A state-machine guard refused the operation.
    #[error("{0}")]
    StateConflict(#[from] StateConflictError),

    /// Caller is not allowed to perform the operation.
    #[error("{0}")]
    Permission(#[from] PermissionError),

    /// General I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WaypostError {
    /// Creates a configuration error with the given reason.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Returns true if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a storage error.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Returns true if this is a state-conflict error.
    ///
    /// State conflicts are retryable: the caller may re-fetch the item and
    /// decide whether the operation still makes sense.
    pub fn is_state_conflict(&self) -> bool {
        matches!(self, Self::StateConflict(_))
    }

    /// Returns true if this is a permission error.
    pub fn is_permission(&self) -> bool {
        matches!(self, Self::Permission(_))
    }
}

/// Storage-related errors.
///
/// These errors indicate problems with the underlying storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database file or data is corrupted.
    #[error("Database corrupted: {0}")]
    Corrupted(String),

    /// Database file not found at expected path.
    #[error("Database not found: {0}")]
    DatabaseNotFound(PathBuf),

    /// Database is locked by another process.
    #[error("Database is locked by another writer")]
    DatabaseLocked,

    /// Transaction failed (commit, rollback, etc.).
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error from the redb storage engine.
    #[error("Storage engine error: {0}")]
    Redb(String),

    /// Database schema version doesn't match expected version.
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch {
        /// Expected schema version.
        expected: u32,
        /// Actual schema version found in database.
        found: u32,
    },

    /// Table not found in database.
    #[error("Table not found: {0}")]
    TableNotFound(String),
}

impl StorageError {
    /// Creates a corruption error with the given message.
    pub fn corrupted(msg: impl Into<String>) -> Self {
        Self::Corrupted(msg.into())
    }

    /// Creates a transaction error with the given message.
    pub fn transaction(msg: impl Into<String>) -> Self {
        Self::Transaction(msg.into())
    }

    /// Creates a serialization error with the given message.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a redb error with the given message.
    pub fn redb(msg: impl Into<String>) -> Self {
        Self::Redb(msg.into())
    }
}

// Conversions from redb error types
impl From<redb::Error> for StorageError {
    fn from(err: redb::Error) -> Self {
        StorageError::Redb(err.to_string())
    }
}

impl From<redb::DatabaseError> for StorageError {
    fn from(err: redb::DatabaseError) -> Self {
        StorageError::Redb(err.to_string())
    }
}

impl From<redb::TransactionError> for StorageError {
    fn from(err: redb::TransactionError) -> Self {
        StorageError::Transaction(err.to_string())
    }
}

impl From<redb::CommitError> for StorageError {
    fn from(err: redb::CommitError) -> Self {
        StorageError::Transaction(format!("Commit failed: {}", err))
    }
}

impl From<redb::TableError> for StorageError {
    fn from(err: redb::TableError) -> Self {
        StorageError::Redb(format!("Table error: {}", err))
    }
}

impl From<redb::StorageError> for StorageError {
    fn from(err: redb::StorageError) -> Self {
        StorageError::Redb(format!("Storage error: {}", err))
    }
}

// Convert bincode errors to StorageError
impl From<bincode::Error> for StorageError {
    fn from(err: bincode::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

// Also allow direct conversion to WaypostError for convenience
impl From<redb::Error> for WaypostError {
    fn from(err: redb::Error) -> Self {
        WaypostError::Storage(StorageError::from(err))
    }
}

impl From<redb::DatabaseError> for WaypostError {
    fn from(err: redb::DatabaseError) -> Self {
        WaypostError::Storage(StorageError::from(err))
    }
}

impl From<redb::TransactionError> for WaypostError {
    fn from(err: redb::TransactionError) -> Self {
        WaypostError::Storage(StorageError::from(err))
    }
}

impl From<redb::CommitError> for WaypostError {
    fn from(err: redb::CommitError) -> Self {
        WaypostError::Storage(StorageError::from(err))
    }
}

impl From<redb::TableError> for WaypostError {
    fn from(err: redb::TableError) -> Self {
        WaypostError::Storage(StorageError::from(err))
    }
}

impl From<redb::StorageError> for WaypostError {
    fn from(err: redb::StorageError) -> Self {
        WaypostError::Storage(StorageError::from(err))
    }
}

impl From<bincode::Error> for WaypostError {
    fn from(err: bincode::Error) -> Self {
        WaypostError::Storage(StorageError::from(err))
    }
}

/// Validation errors for input data.
///
/// These errors indicate problems with data provided by the caller.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A field has an invalid value.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the invalid field.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },

    /// Content exceeds maximum allowed size.
    #[error("Content too large: {size} bytes (max: {max} bytes)")]
    ContentTooLarge {
        /// Actual content size in bytes.
        size: usize,
        /// Maximum allowed size in bytes.
        max: usize,
    },

    /// A required field is missing or empty.
    #[error("Required field missing: {field}")]
    RequiredField {
        /// Name of the missing field.
        field: String,
    },

    /// Too many items in a collection field.
    #[error("Too many items in '{field}': {count} (max: {max})")]
    TooManyItems {
        /// Name of the field.
        field: String,
        /// Actual count.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// An in-progress wizard draft is not submittable yet.
    #[error("Draft incomplete: {reason}")]
    IncompleteDraft {
        /// Which part of the draft is unfinished.
        reason: String,
    },
}

impl ValidationError {
    /// Creates an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a content too large error.
    pub fn content_too_large(size: usize, max: usize) -> Self {
        Self::ContentTooLarge { size, max }
    }

    /// Creates a required field error.
    pub fn required_field(field: impl Into<String>) -> Self {
        Self::RequiredField {
            field: field.into(),
        }
    }

    /// Creates a too many items error.
    pub fn too_many_items(field: impl Into<String>, count: usize, max: usize) -> Self {
        Self::TooManyItems {
            field: field.into(),
            count,
            max,
        }
    }

    /// Creates an incomplete draft error.
    pub fn incomplete_draft(reason: impl Into<String>) -> Self {
        Self::IncompleteDraft {
            reason: reason.into(),
        }
    }
}

/// Not found errors for specific entity types.
#[derive(Debug, Error)]
pub enum NotFoundError {
    /// Experience with given ID not found.
    #[error("Experience not found: {0}")]
    Experience(String),

    /// Comment with given ID not found.
    #[error("Comment not found: {0}")]
    Comment(String),

    /// Vote not found for given experience/voter pair.
    #[error("Vote not found: {0}")]
    Vote(String),
}

impl NotFoundError {
    /// Creates an experience not found error.
    pub fn experience(id: impl ToString) -> Self {
        Self::Experience(id.to_string())
    }

    /// Creates a comment not found error.
    pub fn comment(id: impl ToString) -> Self {
        Self::Comment(id.to_string())
    }

    /// Creates a vote not found error.
    pub fn vote(id: impl ToString) -> Self {
        Self::Vote(id.to_string())
    }
}

/// State-machine guard failures.
///
/// Returned when an operation finds its target in a state that forbids the
/// transition. The item itself is left untouched.
#[derive(Debug, Error)]
pub enum StateConflictError {
    /// Moderation transition attempted on an item that is not pending review.
    #[error("Experience {id} is not pending review (current status: {status})")]
    NotPending {
        /// ID of the experience.
        id: String,
        /// Status observed when the guard ran.
        status: ExperienceStatus,
    },
}

impl StateConflictError {
    /// Creates a not-pending guard error.
    pub fn not_pending(id: impl ToString, status: ExperienceStatus) -> Self {
        Self::NotPending {
            id: id.to_string(),
            status,
        }
    }

    /// Returns the status the guard observed.
    pub fn observed_status(&self) -> ExperienceStatus {
        match self {
            Self::NotPending { status, .. } => *status,
        }
    }
}

/// Authorization failures.
///
/// Rejected before any store mutation is attempted.
#[derive(Debug, Error)]
pub enum PermissionError {
    /// Moderation requires the admin role.
    #[error("Moderation requires the admin role (caller: {actor})")]
    AdminRequired {
        /// ID of the caller that was refused.
        actor: String,
    },
}

impl PermissionError {
    /// Creates an admin-required error.
    pub fn admin_required(actor: impl ToString) -> Self {
        Self::AdminRequired {
            actor: actor.to_string(),
        }
    }
}
