//! Input validation for experience submissions.
//!
//! Validates a [`NewExperience`] before it reaches the storage layer. All
//! size/count constraints are defined as constants in
//! [`crate::storage::schema`].
//!
//! # Validation Layers
//!
//! ```text
//! Waypost::submit_experience()
//!     ├── validate_submission()        ← top-level fields
//!     │       └── per-variant checks  ← the fields the wizard gates require
//!     └── storage.insert_experience() ← only reached if valid
//! ```
//!
//! The per-variant checks mirror the wizard's step gates: a draft that
//! passed every gate always passes here. The pipeline still re-checks so
//! that hand-built payloads cannot bypass the rules.

use crate::error::{ValidationError, WaypostError};
use crate::experience::types::{
    ExperienceData, InterviewReport, LearningJourney, NewExperience, OpenPost, TransitionStory,
    WorkReview,
};
use crate::storage::schema::{
    MAX_CONTENT_SIZE, MAX_LIST_ITEMS, MAX_LIST_ITEM_LENGTH, MAX_ROUNDS, MAX_SUMMARY_LENGTH,
    MAX_USERNAME_LENGTH, MIN_OPEN_CONTENT_LENGTH,
};

/// Validates a [`NewExperience`] before storage.
///
/// # Rules
///
/// | Field | Constraint |
/// |-------|------------|
/// | `author` | Non-empty |
/// | `username` | Non-empty, max 100 bytes |
/// | `summary` | Non-empty after trimming, max 2 KB |
/// | payload text fields | Non-empty where the wizard requires them, max 100 KB each |
/// | payload list fields | Max 25 entries, each non-empty and max 500 bytes |
/// | `Interview.interview_month` | 1–12 |
/// | `Interview.rounds` | Non-empty, max 30, every description non-empty |
/// | `Open.content` | At least 100 characters |
/// | `Open.key_takeaways` | At least one entry |
pub(crate) fn validate_submission(submission: &NewExperience) -> Result<(), WaypostError> {
    // Author: non-empty
    if submission.author.as_str().is_empty() {
        return Err(ValidationError::required_field("author").into());
    }

    // Username snapshot: non-empty, bounded
    if submission.username.is_empty() {
        return Err(ValidationError::required_field("username").into());
    }
    if submission.username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::invalid_field(
            "username",
            format!(
                "exceeds max length of {} bytes (got {})",
                MAX_USERNAME_LENGTH,
                submission.username.len()
            ),
        )
        .into());
    }

    // Summary: non-empty after trimming, bounded
    if submission.summary.trim().is_empty() {
        return Err(ValidationError::required_field("summary").into());
    }
    if submission.summary.len() > MAX_SUMMARY_LENGTH {
        return Err(ValidationError::invalid_field(
            "summary",
            format!(
                "exceeds max length of {} bytes (got {})",
                MAX_SUMMARY_LENGTH,
                submission.summary.len()
            ),
        )
        .into());
    }

    // Payload: variant-specific required fields
    match &submission.data {
        ExperienceData::Interview(report) => validate_interview(report),
        ExperienceData::Work(review) => validate_work(review),
        ExperienceData::Transition(story) => validate_transition(story),
        ExperienceData::Learning(journey) => validate_learning(journey),
        ExperienceData::Open(post) => validate_open(post),
    }
}

/// Requires a non-empty, size-bounded text field.
fn require_text(field: &'static str, value: &str) -> Result<(), WaypostError> {
    if value.is_empty() {
        return Err(ValidationError::required_field(field).into());
    }
    if value.len() > MAX_CONTENT_SIZE {
        return Err(ValidationError::content_too_large(value.len(), MAX_CONTENT_SIZE).into());
    }
    Ok(())
}

/// Checks list length and per-entry constraints. Empty lists pass.
fn check_list(field: &'static str, items: &[String]) -> Result<(), WaypostError> {
    if items.len() > MAX_LIST_ITEMS {
        return Err(ValidationError::too_many_items(field, items.len(), MAX_LIST_ITEMS).into());
    }
    for (i, item) in items.iter().enumerate() {
        if item.is_empty() {
            return Err(
                ValidationError::invalid_field(field, format!("entry at index {} is empty", i))
                    .into(),
            );
        }
        if item.len() > MAX_LIST_ITEM_LENGTH {
            return Err(ValidationError::invalid_field(
                field,
                format!(
                    "entry at index {} exceeds max length of {} bytes (got {})",
                    i,
                    MAX_LIST_ITEM_LENGTH,
                    item.len()
                ),
            )
            .into());
        }
    }
    Ok(())
}

fn validate_interview(report: &InterviewReport) -> Result<(), WaypostError> {
    require_text("role", &report.role)?;
    require_text("company_name", &report.company_name)?;

    // Month: 1–12
    if !(1..=12).contains(&report.interview_month) {
        return Err(ValidationError::invalid_field(
            "interview_month",
            format!("must be between 1 and 12, got {}", report.interview_month),
        )
        .into());
    }

    // Year: sanity bounds
    if !(1970..=2100).contains(&report.interview_year) {
        return Err(ValidationError::invalid_field(
            "interview_year",
            format!("must be between 1970 and 2100, got {}", report.interview_year),
        )
        .into());
    }

    require_text("opportunity_source", &report.opportunity_source)?;
    require_text("designation", &report.designation)?;

    // Rounds: non-empty, bounded, every round described
    if report.rounds.is_empty() {
        return Err(ValidationError::required_field("rounds").into());
    }
    if report.rounds.len() > MAX_ROUNDS {
        return Err(
            ValidationError::too_many_items("rounds", report.rounds.len(), MAX_ROUNDS).into(),
        );
    }
    for (i, round) in report.rounds.iter().enumerate() {
        if round.description.is_empty() {
            return Err(ValidationError::invalid_field(
                "rounds",
                format!("round at index {} is missing a description", i),
            )
            .into());
        }
        if round.description.len() > MAX_CONTENT_SIZE {
            return Err(
                ValidationError::content_too_large(round.description.len(), MAX_CONTENT_SIZE)
                    .into(),
            );
        }
    }

    require_text("preparation_tips", &report.preparation_tips)?;
    Ok(())
}

fn validate_work(review: &WorkReview) -> Result<(), WaypostError> {
    require_text("company_name", &review.company_name)?;
    require_text("role", &review.role)?;
    require_text("duration", &review.duration)?;
    require_text("work_description", &review.work_description)?;
    require_text("learnings", &review.learnings)?;

    // At least one pro or con
    if review.pros.is_empty() && review.cons.is_empty() {
        return Err(ValidationError::invalid_field(
            "pros/cons",
            "at least one pro or con is required",
        )
        .into());
    }
    check_list("pros", &review.pros)?;
    check_list("cons", &review.cons)?;
    Ok(())
}

fn validate_transition(story: &TransitionStory) -> Result<(), WaypostError> {
    require_text("from_role", &story.from_role)?;
    require_text("to_role", &story.to_role)?;
    require_text("transition_reason", &story.transition_reason)?;
    require_text("challenges_faced", &story.challenges_faced)?;
    require_text("how_overcame", &story.how_overcame)?;
    require_text("timeline_duration", &story.timeline_duration)?;
    require_text("advice_for_others", &story.advice_for_others)?;
    Ok(())
}

fn validate_learning(journey: &LearningJourney) -> Result<(), WaypostError> {
    require_text("skill", &journey.skill)?;
    require_text("category", &journey.category)?;
    require_text("duration", &journey.duration)?;

    // Resources: non-empty
    if journey.resources.is_empty() {
        return Err(ValidationError::required_field("resources").into());
    }
    check_list("resources", &journey.resources)?;

    require_text("learning_path", &journey.learning_path)?;
    check_list("projects_built", &journey.projects_built)?;
    require_text("challenges_faced", &journey.challenges_faced)?;
    require_text("outcomes", &journey.outcomes)?;
    require_text("tips", &journey.tips)?;
    Ok(())
}

fn validate_open(post: &OpenPost) -> Result<(), WaypostError> {
    require_text("title", &post.title)?;
    require_text("category", &post.category)?;

    // Content: minimum length in characters, maximum in bytes
    let content_chars = post.content.chars().count();
    if content_chars < MIN_OPEN_CONTENT_LENGTH {
        return Err(ValidationError::invalid_field(
            "content",
            format!(
                "must be at least {} characters, got {}",
                MIN_OPEN_CONTENT_LENGTH, content_chars
            ),
        )
        .into());
    }
    if post.content.len() > MAX_CONTENT_SIZE {
        return Err(ValidationError::content_too_large(post.content.len(), MAX_CONTENT_SIZE).into());
    }

    // Takeaways: at least one
    if post.key_takeaways.is_empty() {
        return Err(ValidationError::required_field("key_takeaways").into());
    }
    check_list("key_takeaways", &post.key_takeaways)?;
    Ok(())
}
