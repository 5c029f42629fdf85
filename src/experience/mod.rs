//! Experience management module.
//!
//! An **experience** is the core data type in Waypost — a community member's
//! write-up of an interview, a job, a career transition, a learning journey,
//! or a free-form post. Experiences carry a rich payload, a derived kind, a
//! moderation status, and denormalized engagement counters.
//!
//! # Operations
//!
//! All experience operations are available on [`Waypost`](crate::Waypost):
//!
//! - [`submit_experience(submission)`](crate::Waypost::submit_experience)
//! - [`get_experience(id)`](crate::Waypost::get_experience)
//! - [`list_experiences(filter, sort, page)`](crate::Waypost::list_experiences)
//! - [`pending_queue()`](crate::Waypost::pending_queue)
//!
//! # Lifecycle
//!
//! ```text
//! NewExperience ──validate──▶ Experience { status: Pending }
//!                                  │
//!                    approve ──────┴────── reject
//!                        ▼                    ▼
//!                    Published            Rejected
//! ```
//!
//! Every stored [`Experience`] starts life `Pending` with zeroed counters
//! and tags derived from its payload. Status changes after that point are
//! the moderation module's business; votes and comments adjust the
//! counters without touching the payload.

pub mod types;

mod tags;
mod validation;

pub use types::{
    EmploymentType, Experience, ExperienceData, ExperienceKind, ExperienceLevel, ExperienceStatus,
    InterviewOutcome, InterviewReport, InterviewRound, InterviewType, LearningJourney,
    NewExperience, OpenPost, Rating, TransitionStory, WorkReview,
};

pub(crate) use tags::derive_tags;
pub(crate) use validation::validate_submission;
