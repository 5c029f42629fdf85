//! Multi-step submission wizard.
//!
//! A [`WizardSession`] is an in-memory walk through the submission form
//! for one experience. The session tracks which step the user is on,
//! holds the growing [`DraftData`], and gates forward navigation on the
//! current step's required fields. Nothing here touches storage: a
//! finished session produces a [`NewExperience`] that is handed to
//! [`Waypost::submit_experience`](crate::Waypost::submit_experience).
//!
//! # Steps
//!
//! Step 0 is type selection. Picking a type fixes the flow length and
//! starts a blank draft:
//!
//! | Kind | Content steps | Review step | Total |
//! |------|--------------|-------------|-------|
//! | Interview | 1–6 | 7 | 7 |
//! | Work | 1–4 | 5 | 5 |
//! | Transition | 1–4 | 5 | 5 |
//! | Learning | 1–4 | 5 | 5 |
//! | Open | 1–3 | 4 | 4 |
//!
//! Forward navigation ([`advance`](WizardSession::advance)) is gated on
//! the current step's fields; backward navigation and direct jumps are
//! not. All navigation is total: an impossible move returns `false`
//! and leaves the session untouched.

mod draft;

pub use draft::{
    DraftData, InterviewDraft, LearningDraft, OpenDraft, TransitionDraft, WorkDraft,
};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::experience::types::{ExperienceKind, NewExperience};
use crate::types::UserId;

/// Total step count for a flow, review step included.
fn step_count(kind: ExperienceKind) -> usize {
    match kind {
        ExperienceKind::Interview => 7,
        ExperienceKind::Work => 5,
        ExperienceKind::Transition => 5,
        ExperienceKind::Learning => 5,
        ExperienceKind::Open => 4,
    }
}

/// One user's walk through the submission form.
///
/// ```
/// use waypost::wizard::WizardSession;
/// use waypost::ExperienceKind;
///
/// let mut session = WizardSession::new();
/// assert!(!session.advance()); // no type selected yet
///
/// session.select_type(ExperienceKind::Open);
/// assert_eq!(session.current_step(), 1);
/// assert_eq!(session.total_steps(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardSession {
    current_step: usize,
    total_steps: usize,
    draft: Option<DraftData>,
    summary: String,
}

impl WizardSession {
    /// Starts a fresh session on the type-selection step.
    pub fn new() -> Self {
        Self {
            current_step: 0,
            total_steps: 1,
            draft: None,
            summary: String::new(),
        }
    }

    /// The step the session is currently on.
    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Total steps for the selected flow. `1` until a type is chosen.
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// The in-progress draft, if a type has been selected.
    pub fn draft(&self) -> Option<&DraftData> {
        self.draft.as_ref()
    }

    /// Mutable access to the in-progress draft.
    pub fn draft_mut(&mut self) -> Option<&mut DraftData> {
        self.draft.as_mut()
    }

    /// The summary text entered so far.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Replaces the summary text.
    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = summary.into();
    }

    /// Selects the experience type and moves to step 1.
    ///
    /// Always starts a blank draft, discarding any previous one, even
    /// when re-selecting the same kind.
    pub fn select_type(&mut self, kind: ExperienceKind) {
        self.draft = Some(DraftData::empty(kind));
        self.total_steps = step_count(kind);
        self.current_step = 1;
    }

    /// Moves forward one step if the current step's gate passes.
    ///
    /// Returns `false` without moving when no type is selected, the
    /// session is already on the review step, or required fields for
    /// the current step are missing.
    pub fn advance(&mut self) -> bool {
        let Some(draft) = &self.draft else {
            return false;
        };
        if self.current_step >= self.total_steps {
            return false;
        }
        if !draft.step_complete(self.current_step) {
            return false;
        }
        self.current_step += 1;
        true
    }

    /// Moves back one step. Returns `false` when already on step 0.
    ///
    /// Going back never discards entered data.
    pub fn retreat(&mut self) -> bool {
        if self.current_step == 0 {
            return false;
        }
        self.current_step -= 1;
        true
    }

    /// Jumps directly to `step`, skipping gates.
    ///
    /// Any step from 0 through [`total_steps`](Self::total_steps) is
    /// reachable; anything past that returns `false` without moving.
    /// This is how the review step's "edit" links work.
    pub fn go_to(&mut self, step: usize) -> bool {
        if step > self.total_steps {
            return false;
        }
        self.current_step = step;
        true
    }

    /// Clears the session back to a fresh type-selection step.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Builds the submission this session describes.
    ///
    /// Does not consume or clear the session, so a failed submission
    /// leaves everything in place for the user to fix. Fails if no type
    /// was selected or a required select in the draft is still unset;
    /// text fields are checked later by the submission pipeline.
    pub fn submission(&self, author: UserId, username: impl Into<String>) -> Result<NewExperience> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| ValidationError::incomplete_draft("no experience type selected"))?;
        let data = draft.finalize()?;
        Ok(NewExperience {
            author,
            username: username.into(),
            data,
            summary: self.summary.clone(),
        })
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}
