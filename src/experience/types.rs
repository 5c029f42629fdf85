//! Type definitions for experiences.
//!
//! An **experience** is the core data type in Waypost — one community-submitted
//! career story. Each experience carries a structured payload specific to its
//! kind, an author-written summary, moderation state, and vote/comment counters.
//!
//! # Type Hierarchy
//!
//! ```text
//! ExperienceData (rich, one payload struct per content kind)
//!     ↓ kind()
//! ExperienceKind (fieldless discriminant; drives wizard step counts)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{ExperienceId, Timestamp, UserId};

// ============================================================================
// Rating — shared 1–5 scale
// ============================================================================

/// Five-point scale used for round difficulty, overall interview difficulty,
/// and work-experience ratings.
///
/// Construction is validated; a `Rating` always holds a value in `1..=5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating on the scale.
    pub const MIN: u8 = 1;
    /// Highest rating on the scale.
    pub const MAX: u8 = 5;

    /// Creates a rating, returning `None` if `value` is outside `1..=5`.
    #[inline]
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Returns the numeric value (1–5).
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

// ============================================================================
// Choice enums for the interview variant
// ============================================================================

/// How the interview opportunity was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterviewType {
    /// On-campus placement drive.
    Campus,
    /// Direct/off-campus application.
    OffCampus,
}

impl InterviewType {
    /// Lowercase label used in derived search tags.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Campus => "campus",
            Self::OffCampus => "off_campus",
        }
    }
}

/// Employment type the interview was for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    /// Internship position.
    Internship,
    /// Full-time position.
    FullTime,
    /// Part-time position.
    PartTime,
    /// Contract position.
    Contract,
}

impl EmploymentType {
    /// Lowercase label used in derived search tags (underscores become spaces).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Internship => "internship",
            Self::FullTime => "full time",
            Self::PartTime => "part time",
            Self::Contract => "contract",
        }
    }
}

/// Candidate experience level at the time of the interview.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    /// No prior professional experience.
    Fresher,
    /// About one year of experience.
    OneYear,
    /// About two years of experience.
    TwoYears,
    /// Three or more years of experience.
    ThreePlusYears,
    /// Five or more years of experience.
    FivePlusYears,
}

/// Final result of the interview process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterviewOutcome {
    /// Received an offer.
    Selected,
    /// Rejected.
    Rejected,
    /// Kept on hold by the company.
    OnHold,
    /// Result not announced yet.
    Pending,
}

impl InterviewOutcome {
    /// Lowercase label used in derived search tags.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Selected => "selected",
            Self::Rejected => "rejected",
            Self::OnHold => "on_hold",
            Self::Pending => "pending",
        }
    }
}

/// One round within an interview process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewRound {
    /// Position in the process (1-based).
    pub round_number: u32,
    /// Free-form round label (e.g. "Technical Round", "HR Round").
    pub round_type: String,
    /// What happened in this round.
    pub description: String,
    /// How hard this round was.
    pub difficulty: Rating,
    /// Optional advice for this round.
    pub tips: Option<String>,
}

// ============================================================================
// Per-kind payload structs
// ============================================================================

/// Payload for an interview experience.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewReport {
    /// Campus or off-campus process.
    pub interview_type: InterviewType,
    /// Role interviewed for.
    pub role: String,
    /// Employment type of the position.
    pub employment_type: EmploymentType,
    /// Company name.
    pub company_name: String,
    /// Month of the interview (1–12).
    pub interview_month: u8,
    /// Year of the interview.
    pub interview_year: u16,
    /// How the opportunity was found (referral, job board, ...).
    pub opportunity_source: String,
    /// Exact designation/title of the position.
    pub designation: String,
    /// Candidate's experience level at the time.
    pub experience_level: ExperienceLevel,
    /// Rounds in process order.
    pub rounds: Vec<InterviewRound>,
    /// Overall difficulty across all rounds.
    pub overall_difficulty: Rating,
    /// Preparation advice for future candidates.
    pub preparation_tips: String,
    /// Final result.
    pub outcome: InterviewOutcome,
    /// Offer/compensation details, if shared.
    pub offer_details: Option<String>,
}

/// Payload for a work-experience review.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkReview {
    /// Company name.
    pub company_name: String,
    /// Role held.
    pub role: String,
    /// How long the author worked there (free text, e.g. "2 years").
    pub duration: String,
    /// Team size, if shared.
    pub team_size: Option<u32>,
    /// What the work involved.
    pub work_description: String,
    /// What the author learned.
    pub learnings: String,
    /// Highlights.
    pub pros: Vec<String>,
    /// Drawbacks.
    pub cons: Vec<String>,
    /// Overall rating of the experience.
    pub rating: Rating,
    /// Whether the author would recommend working there.
    pub would_recommend: bool,
}

/// Payload for a career-transition story.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionStory {
    /// Role transitioned from.
    pub from_role: String,
    /// Role transitioned to.
    pub to_role: String,
    /// Company left, if shared.
    pub from_company: Option<String>,
    /// Company joined, if shared.
    pub to_company: Option<String>,
    /// Why the author made the switch.
    pub transition_reason: String,
    /// Obstacles along the way.
    pub challenges_faced: String,
    /// How the obstacles were overcome.
    pub how_overcame: String,
    /// How long the transition took (free text).
    pub timeline_duration: String,
    /// Advice for others attempting the same move.
    pub advice_for_others: String,
}

/// Payload for a learning journey.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningJourney {
    /// Skill or technology learned.
    pub skill: String,
    /// Category of the skill (e.g. "Web Development").
    pub category: String,
    /// How long the journey took (free text).
    pub duration: String,
    /// Resources used (courses, books, sites).
    pub resources: Vec<String>,
    /// The path/order the author followed.
    pub learning_path: String,
    /// Projects built along the way (may be empty).
    pub projects_built: Vec<String>,
    /// Obstacles along the way.
    pub challenges_faced: String,
    /// What the journey led to.
    pub outcomes: String,
    /// Advice for others learning the same skill.
    pub tips: String,
}

/// Payload for an open-form post.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPost {
    /// Post title.
    pub title: String,
    /// Free-form category label.
    pub category: String,
    /// Main body (at least 100 characters to be submittable).
    pub content: String,
    /// Key takeaways (at least one to be submittable).
    pub key_takeaways: Vec<String>,
}

// ============================================================================
// ExperienceData — rich tagged union over the five kinds
// ============================================================================

/// Rich experience payload, one variant per content kind.
///
/// This is the full payload stored in the experience record. The kind
/// discriminant is never stored separately — it is always derived via
/// [`kind()`](Self::kind), so payload and kind cannot disagree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceData {
    /// Interview process report.
    Interview(InterviewReport),
    /// Review of time spent at a company.
    Work(WorkReview),
    /// Career transition story.
    Transition(TransitionStory),
    /// Learning journey.
    Learning(LearningJourney),
    /// Open-form post.
    Open(OpenPost),
}

impl ExperienceData {
    /// Returns the fieldless [`ExperienceKind`] discriminant.
    pub fn kind(&self) -> ExperienceKind {
        match self {
            Self::Interview(_) => ExperienceKind::Interview,
            Self::Work(_) => ExperienceKind::Work,
            Self::Transition(_) => ExperienceKind::Transition,
            Self::Learning(_) => ExperienceKind::Learning,
            Self::Open(_) => ExperienceKind::Open,
        }
    }

    /// Returns the company name when the active variant carries one.
    ///
    /// Interview and work payloads name a company; the other kinds don't
    /// (a transition's optional companies are not used for filtering).
    pub fn company_name(&self) -> Option<&str> {
        match self {
            Self::Interview(report) => Some(report.company_name.as_str()),
            Self::Work(review) => Some(review.company_name.as_str()),
            _ => None,
        }
    }

    /// Returns the role when the active variant carries one.
    pub fn role(&self) -> Option<&str> {
        match self {
            Self::Interview(report) => Some(report.role.as_str()),
            Self::Work(review) => Some(review.role.as_str()),
            _ => None,
        }
    }
}

impl Default for ExperienceData {
    /// Returns an empty open post, the least-structured kind.
    fn default() -> Self {
        Self::Open(OpenPost::default())
    }
}

/// Fieldless experience kind discriminant.
///
/// Drives wizard step counts and listing filters. Obtained from a payload
/// via [`ExperienceData::kind()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceKind {
    /// Interview process report.
    Interview,
    /// Review of time spent at a company.
    Work,
    /// Career transition story.
    Transition,
    /// Learning journey.
    Learning,
    /// Open-form post.
    Open,
}

impl fmt::Display for ExperienceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Interview => "interview",
            Self::Work => "work",
            Self::Transition => "transition",
            Self::Learning => "learning",
            Self::Open => "open",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// ExperienceStatus — moderation state
// ============================================================================

/// Moderation state of an experience.
///
/// Every submission starts `Pending`. An administrator moves it to exactly
/// one of the two terminal states; there is no path back to `Pending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceStatus {
    /// Awaiting review. Initial state of every submission.
    Pending,
    /// Approved and publicly visible. Terminal.
    Published,
    /// Rejected with feedback, visible only to its author. Terminal.
    Rejected,
}

impl ExperienceStatus {
    /// Returns true if the item is awaiting review.
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if the item is publicly visible.
    #[inline]
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }

    /// Returns true if the item was rejected.
    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

impl fmt::Display for ExperienceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Published => "published",
            Self::Rejected => "rejected",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// Experience — the full stored record
// ============================================================================

/// A stored experience — one community submission and its platform state.
///
/// The payload fields (`data`, `summary`) are written once by the submission
/// pipeline. Moderation owns `status`/`admin_feedback`/`published_at`; the
/// vote and comment engines own the three counters and nothing else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    /// Unique identifier (UUID v7, time-ordered).
    pub id: ExperienceId,

    /// Author's identity. Immutable.
    pub author: UserId,

    /// Author's display name as it was at submission time.
    ///
    /// A frozen snapshot; later profile renames do not propagate here.
    pub username: String,

    /// Kind-specific payload.
    pub data: ExperienceData,

    /// Author-written abstract shown in listings.
    pub summary: String,

    /// Moderation state.
    pub status: ExperienceStatus,

    /// Reviewer feedback, set only when the item was rejected.
    pub admin_feedback: Option<String>,

    /// Count of UP votes. Maintained transactionally with vote records.
    pub upvotes: u32,

    /// Count of DOWN votes. Maintained transactionally with vote records.
    pub downvotes: u32,

    /// Count of live comments. Maintained transactionally with the ledger.
    pub comment_count: u32,

    /// Deduplicated lowercase search tags derived at submission time.
    pub tags: Vec<String>,

    /// Company name copied from the payload for filtering, when present.
    pub company_name: Option<String>,

    /// Role copied from the payload for filtering, when present.
    pub role: Option<String>,

    /// When the item was submitted. Immutable.
    pub created_at: Timestamp,

    /// Last mutation by its owner or a moderator.
    pub updated_at: Timestamp,

    /// When the item became public. Set exactly once, on approval.
    pub published_at: Option<Timestamp>,
}

impl Experience {
    /// Returns the kind discriminant of the payload.
    #[inline]
    pub fn kind(&self) -> ExperienceKind {
        self.data.kind()
    }

    /// Net score: upvotes minus downvotes.
    ///
    /// Always derived from the two counters, never stored.
    #[inline]
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }
}

// ============================================================================
// NewExperience — input for submit_experience()
// ============================================================================

/// Input for creating a new experience via
/// [`Waypost::submit_experience()`](crate::Waypost::submit_experience).
///
/// Only author-provided fields appear here. The `id`, `status`, counters,
/// tags, and timestamps are assigned by the submission pipeline.
#[derive(Clone, Debug)]
pub struct NewExperience {
    /// Author's identity.
    pub author: UserId,

    /// Author's display name, snapshotted onto the record.
    pub username: String,

    /// Kind-specific payload assembled by the wizard.
    pub data: ExperienceData,

    /// Author-written abstract. Must be non-empty after trimming.
    pub summary: String,
}

impl Default for NewExperience {
    fn default() -> Self {
        Self {
            author: UserId::new(""),
            username: String::new(),
            data: ExperienceData::default(),
            summary: String::new(),
        }
    }
}
