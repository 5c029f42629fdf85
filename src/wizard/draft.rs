//! Draft payloads for in-progress wizard sessions.
//!
//! A draft mirrors its finished payload type, but every field the form
//! collects later starts unset: text fields are empty strings, selects are
//! `None`. Step gates read the draft directly; [`DraftData::finalize`]
//! converts a finished draft into an [`ExperienceData`] payload.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::experience::types::{
    EmploymentType, ExperienceData, ExperienceKind, ExperienceLevel, InterviewOutcome,
    InterviewReport, InterviewRound, InterviewType, LearningJourney, OpenPost, Rating,
    TransitionStory, WorkReview,
};
use crate::storage::schema::MIN_OPEN_CONTENT_LENGTH;

// ============================================================================
// Draft structs
// ============================================================================

/// In-progress interview report. Selects are `None` until the user picks a
/// value; `offer_details` stays a plain string and becomes `None` at
/// finalization if left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewDraft {
    /// Campus or off-campus. Step 1.
    pub interview_type: Option<InterviewType>,
    /// Role interviewed for. Step 1.
    pub role: String,
    /// Internship, full time, part time, or contract. Step 1.
    pub employment_type: Option<EmploymentType>,
    /// Company interviewed at. Step 2.
    pub company_name: String,
    /// Month of the interview (1-12). Step 2.
    pub interview_month: Option<u8>,
    /// Year of the interview. Step 2.
    pub interview_year: Option<u16>,
    /// How the opportunity was found. Step 2.
    pub opportunity_source: String,
    /// Designation applied for. Step 3.
    pub designation: String,
    /// Candidate's experience level. Step 3.
    pub experience_level: Option<ExperienceLevel>,
    /// Interview rounds in order. Step 4.
    pub rounds: Vec<InterviewRound>,
    /// Overall difficulty (1-5). Step 5.
    pub overall_difficulty: Option<Rating>,
    /// Advice on preparing. Step 5.
    pub preparation_tips: String,
    /// How it ended. Step 6.
    pub outcome: Option<InterviewOutcome>,
    /// Offer details, optional.
    pub offer_details: String,
}

/// In-progress work review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkDraft {
    /// Company reviewed. Step 1.
    pub company_name: String,
    /// Role held there. Step 1.
    pub role: String,
    /// How long the author worked there. Step 1.
    pub duration: String,
    /// Team size, optional.
    pub team_size: Option<u32>,
    /// What the work was like. Step 2.
    pub work_description: String,
    /// What the author learned. Step 2.
    pub learnings: String,
    /// Upsides. Step 3 needs pros or cons.
    pub pros: Vec<String>,
    /// Downsides. Step 3 needs pros or cons.
    pub cons: Vec<String>,
    /// Overall rating (1-5). Step 4.
    pub rating: Option<Rating>,
    /// Whether the author would recommend the company; `false` if never
    /// answered.
    pub would_recommend: Option<bool>,
}

/// In-progress transition story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDraft {
    /// Role moved away from. Step 1.
    pub from_role: String,
    /// Role moved into. Step 1.
    pub to_role: String,
    /// Previous company, optional.
    pub from_company: String,
    /// New company, optional.
    pub to_company: String,
    /// Why the author switched. Step 2.
    pub transition_reason: String,
    /// What made the switch hard. Step 3.
    pub challenges_faced: String,
    /// How those challenges were overcome. Step 3.
    pub how_overcame: String,
    /// How long the transition took. Step 4.
    pub timeline_duration: String,
    /// Advice for readers attempting the same move. Step 4.
    pub advice_for_others: String,
}

/// In-progress learning journey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningDraft {
    /// Skill learned. Step 1.
    pub skill: String,
    /// Skill category. Step 1.
    pub category: String,
    /// How long it took. Step 1.
    pub duration: String,
    /// Resources used. Step 2.
    pub resources: Vec<String>,
    /// The path taken through the material. Step 2.
    pub learning_path: String,
    /// Projects built along the way, may stay empty.
    pub projects_built: Vec<String>,
    /// What made it hard. Step 3.
    pub challenges_faced: String,
    /// Where the author ended up. Step 4.
    pub outcomes: String,
    /// Advice for others. Step 4.
    pub tips: String,
}

/// In-progress open post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenDraft {
    /// Post title. Step 1.
    pub title: String,
    /// Post category. Step 1.
    pub category: String,
    /// Free-form body; step 2 needs at least 100 characters.
    pub content: String,
    /// Key takeaways. Step 3 needs at least one.
    pub key_takeaways: Vec<String>,
}

// ============================================================================
// DraftData
// ============================================================================

/// The payload of an in-progress wizard session, one variant per
/// [`ExperienceKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftData {
    /// In-progress interview report.
    Interview(InterviewDraft),
    /// In-progress work review.
    Work(WorkDraft),
    /// In-progress transition story.
    Transition(TransitionDraft),
    /// In-progress learning journey.
    Learning(LearningDraft),
    /// In-progress open post.
    Open(OpenDraft),
}

impl DraftData {
    /// Creates a blank draft for the given kind.
    pub(crate) fn empty(kind: ExperienceKind) -> Self {
        match kind {
            ExperienceKind::Interview => DraftData::Interview(InterviewDraft::default()),
            ExperienceKind::Work => DraftData::Work(WorkDraft::default()),
            ExperienceKind::Transition => DraftData::Transition(TransitionDraft::default()),
            ExperienceKind::Learning => DraftData::Learning(LearningDraft::default()),
            ExperienceKind::Open => DraftData::Open(OpenDraft::default()),
        }
    }

    /// The kind this draft will finalize into.
    pub fn kind(&self) -> ExperienceKind {
        match self {
            DraftData::Interview(_) => ExperienceKind::Interview,
            DraftData::Work(_) => ExperienceKind::Work,
            DraftData::Transition(_) => ExperienceKind::Transition,
            DraftData::Learning(_) => ExperienceKind::Learning,
            DraftData::Open(_) => ExperienceKind::Open,
        }
    }

    /// Whether the fields collected on `step` are filled in.
    ///
    /// Step 0 is the type-selection step and is complete by construction
    /// (a draft only exists once a type is chosen). The final step of
    /// every flow is the review step and has no gate of its own; steps
    /// past the flow's range report `false`.
    ///
    /// A text field counts as filled when it is non-empty (whitespace
    /// included); a select counts when a value was picked.
    pub fn step_complete(&self, step: usize) -> bool {
        match self {
            DraftData::Interview(d) => match step {
                0 => true,
                1 => d.interview_type.is_some() && !d.role.is_empty() && d.employment_type.is_some(),
                2 => {
                    !d.company_name.is_empty()
                        && d.interview_month.is_some()
                        && d.interview_year.is_some()
                        && !d.opportunity_source.is_empty()
                }
                3 => !d.designation.is_empty() && d.experience_level.is_some(),
                4 => !d.rounds.is_empty() && d.rounds.iter().all(|r| !r.description.is_empty()),
                5 => d.overall_difficulty.is_some() && !d.preparation_tips.is_empty(),
                6 => d.outcome.is_some(),
                _ => false,
            },
            DraftData::Work(d) => match step {
                0 => true,
                1 => !d.company_name.is_empty() && !d.role.is_empty() && !d.duration.is_empty(),
                2 => !d.work_description.is_empty() && !d.learnings.is_empty(),
                3 => !d.pros.is_empty() || !d.cons.is_empty(),
                4 => d.rating.is_some(),
                _ => false,
            },
            DraftData::Transition(d) => match step {
                0 => true,
                1 => !d.from_role.is_empty() && !d.to_role.is_empty(),
                2 => !d.transition_reason.is_empty(),
                3 => !d.challenges_faced.is_empty() && !d.how_overcame.is_empty(),
                4 => !d.timeline_duration.is_empty() && !d.advice_for_others.is_empty(),
                _ => false,
            },
            DraftData::Learning(d) => match step {
                0 => true,
                1 => !d.skill.is_empty() && !d.category.is_empty() && !d.duration.is_empty(),
                2 => !d.resources.is_empty() && !d.learning_path.is_empty(),
                3 => !d.challenges_faced.is_empty(),
                4 => !d.outcomes.is_empty() && !d.tips.is_empty(),
                _ => false,
            },
            DraftData::Open(d) => match step {
                0 => true,
                1 => !d.title.is_empty() && !d.category.is_empty(),
                2 => d.content.chars().count() >= MIN_OPEN_CONTENT_LENGTH,
                3 => !d.key_takeaways.is_empty(),
                _ => false,
            },
        }
    }

    /// Converts the draft into a finished payload.
    ///
    /// Fails with a validation error if any select the flow requires is
    /// still unset. Text fields are passed through as-is; the submission
    /// pipeline re-checks them. `would_recommend` defaults to `false`
    /// when never answered, and empty optional strings become `None`.
    pub fn finalize(&self) -> Result<ExperienceData> {
        match self {
            DraftData::Interview(d) => Ok(ExperienceData::Interview(InterviewReport {
                interview_type: require(d.interview_type, "interview_type")?,
                role: d.role.clone(),
                employment_type: require(d.employment_type, "employment_type")?,
                company_name: d.company_name.clone(),
                interview_month: require(d.interview_month, "interview_month")?,
                interview_year: require(d.interview_year, "interview_year")?,
                opportunity_source: d.opportunity_source.clone(),
                designation: d.designation.clone(),
                experience_level: require(d.experience_level, "experience_level")?,
                rounds: d.rounds.clone(),
                overall_difficulty: require(d.overall_difficulty, "overall_difficulty")?,
                preparation_tips: d.preparation_tips.clone(),
                outcome: require(d.outcome, "outcome")?,
                offer_details: none_if_empty(&d.offer_details),
            })),
            DraftData::Work(d) => Ok(ExperienceData::Work(WorkReview {
                company_name: d.company_name.clone(),
                role: d.role.clone(),
                duration: d.duration.clone(),
                team_size: d.team_size,
                work_description: d.work_description.clone(),
                learnings: d.learnings.clone(),
                pros: d.pros.clone(),
                cons: d.cons.clone(),
                rating: require(d.rating, "rating")?,
                would_recommend: d.would_recommend.unwrap_or(false),
            })),
            DraftData::Transition(d) => Ok(ExperienceData::Transition(TransitionStory {
                from_role: d.from_role.clone(),
                to_role: d.to_role.clone(),
                from_company: none_if_empty(&d.from_company),
                to_company: none_if_empty(&d.to_company),
                transition_reason: d.transition_reason.clone(),
                challenges_faced: d.challenges_faced.clone(),
                how_overcame: d.how_overcame.clone(),
                timeline_duration: d.timeline_duration.clone(),
                advice_for_others: d.advice_for_others.clone(),
            })),
            DraftData::Learning(d) => Ok(ExperienceData::Learning(LearningJourney {
                skill: d.skill.clone(),
                category: d.category.clone(),
                duration: d.duration.clone(),
                resources: d.resources.clone(),
                learning_path: d.learning_path.clone(),
                projects_built: d.projects_built.clone(),
                challenges_faced: d.challenges_faced.clone(),
                outcomes: d.outcomes.clone(),
                tips: d.tips.clone(),
            })),
            DraftData::Open(d) => Ok(ExperienceData::Open(OpenPost {
                title: d.title.clone(),
                category: d.category.clone(),
                content: d.content.clone(),
                key_takeaways: d.key_takeaways.clone(),
            })),
        }
    }

    /// Mutable access to the interview draft, if that is what this is.
    pub fn as_interview_mut(&mut self) -> Option<&mut InterviewDraft> {
        match self {
            DraftData::Interview(d) => Some(d),
            _ => None,
        }
    }

    /// Mutable access to the work draft, if that is what this is.
    pub fn as_work_mut(&mut self) -> Option<&mut WorkDraft> {
        match self {
            DraftData::Work(d) => Some(d),
            _ => None,
        }
    }

    /// Mutable access to the transition draft, if that is what this is.
    pub fn as_transition_mut(&mut self) -> Option<&mut TransitionDraft> {
        match self {
            DraftData::Transition(d) => Some(d),
            _ => None,
        }
    }

    /// Mutable access to the learning draft, if that is what this is.
    pub fn as_learning_mut(&mut self) -> Option<&mut LearningDraft> {
        match self {
            DraftData::Learning(d) => Some(d),
            _ => None,
        }
    }

    /// Mutable access to the open-post draft, if that is what this is.
    pub fn as_open_mut(&mut self) -> Option<&mut OpenDraft> {
        match self {
            DraftData::Open(d) => Some(d),
            _ => None,
        }
    }
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or_else(|| {
        ValidationError::incomplete_draft(format!("{} was never selected", field)).into()
    })
}

fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
