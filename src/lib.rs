//! # Waypost
//!
//! Embedded content store for community career-experience platforms.
//!
//! Waypost is the core of a career-experience community: members submit
//! structured posts (interview reports, work reviews, transition stories,
//! learning journeys, open-form posts) through a multi-step wizard,
//! administrators moderate them, and the community votes and comments on
//! the published ones.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waypost::{Config, ExperienceKind, Principal, UserId, VoteKind, Waypost};
//! use waypost::wizard::WizardSession;
//!
//! // Open or create a database
//! let db = Waypost::open("./waypost.db", Config::default())?;
//!
//! // Walk the wizard and submit
//! let mut session = WizardSession::new();
//! session.select_type(ExperienceKind::Open);
//! // ... fill the draft via session.draft_mut(), advance() through the steps ...
//! session.set_summary("What I wish I knew before switching teams");
//! let id = db.submit_experience(session.submission(UserId::new("user-42"), "priya")?)?;
//!
//! // An admin reviews the pending queue
//! db.approve_experience(&Principal::admin("mod-1"), id)?;
//!
//! // Readers react to the published post
//! db.cast_vote(id, &UserId::new("user-7"), VoteKind::Up)?;
//!
//! // Clean up
//! db.close()?;
//! ```
//!
//! ## Key Concepts
//!
//! ### Experience
//!
//! An **experience** is one community submission. Its payload is a typed
//! variant per kind (interview, work, transition, learning, open), and the
//! stored record carries the platform state around it: moderation status,
//! vote counters, comment count, derived search tags.
//!
//! ### Moderation
//!
//! Every submission starts **pending** and is invisible to the public.
//! An admin either publishes it or rejects it with feedback; both states
//! are terminal. The pending queue is reviewed oldest-first.
//!
//! ### Votes and Comments
//!
//! Each (experience, voter) pair holds at most one vote; voting the same
//! way again toggles it off, voting the other way switches it. Comments
//! are flat and chronological with single-level replies. Both engines keep
//! their denormalized counters transactionally exact.
//!
//! ### Wizard
//!
//! [`wizard::WizardSession`] drives the multi-step submission form:
//! per-kind step counts, per-step completion gates, and assembly of the
//! final submission. Sessions are plain values owned by the caller and are
//! never persisted.
//!
//! ## Thread Safety
//!
//! `Waypost` is `Send + Sync` and can be shared across threads using `Arc`.
//! The database uses MVCC for concurrent reads with exclusive write locking.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

// ============================================================================
// Module declarations
// ============================================================================

mod config;
mod db;
mod error;
mod types;

pub mod storage;

// Domain modules
mod comment;
mod experience;
mod moderation;
mod query;
mod vote;

/// Wizard engine for the multi-step submission form.
pub mod wizard;

// ============================================================================
// Public API re-exports
// ============================================================================

// Main database interface
pub use db::Waypost;

// Configuration
pub use config::{Config, SyncMode};

// Error handling
pub use error::{
    NotFoundError, PermissionError, Result, StateConflictError, StorageError, ValidationError,
    WaypostError,
};

// Core types
pub use types::{CommentId, ExperienceId, Principal, Timestamp, UserId, UserRole};

// Domain types
pub use comment::{Comment, NewComment};
pub use experience::{
    EmploymentType, Experience, ExperienceData, ExperienceKind, ExperienceLevel, ExperienceStatus,
    InterviewOutcome, InterviewReport, InterviewRound, InterviewType, LearningJourney,
    NewExperience, OpenPost, Rating, TransitionStory, WorkReview,
};
pub use moderation::ModerationStats;
pub use vote::{Vote, VoteKind, VoteTransition};

// Listing queries
pub use query::{Cursor, ExperienceFilter, ExperiencePage, PageRequest, SortBy};

// Storage (for advanced users)
pub use storage::DatabaseMetadata;

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Convenient imports for common Waypost usage.
///
/// ```rust
/// use waypost::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::db::Waypost;
    pub use crate::error::{Result, WaypostError};
    pub use crate::experience::{
        Experience, ExperienceData, ExperienceKind, ExperienceStatus, NewExperience,
    };
    pub use crate::query::{ExperienceFilter, PageRequest, SortBy};
    pub use crate::types::{ExperienceId, Principal, UserId, UserRole};
    pub use crate::vote::VoteKind;
    pub use crate::wizard::WizardSession;
}
