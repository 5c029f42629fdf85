//! Vote engine: toggle and switch semantics.
//!
//! A user holds at most one standing vote per experience. Sending a vote
//! request means one of three things depending on what is already there:
//!
//! - no standing vote → **cast** the requested vote
//! - standing vote in the same direction → **retract** it (toggle off)
//! - standing vote in the other direction → **switch** it
//!
//! [`VoteTransition::decide`] is the pure heart of that rule. The storage
//! layer looks up the standing vote, decides the transition, applies the
//! record change and the counter deltas all inside one write transaction,
//! which is what keeps the denormalized counters equal to the vote records
//! under concurrency.
//!
//! Voting is available on [`Waypost`](crate::Waypost):
//!
//! - [`cast_vote(experience_id, voter, kind)`](crate::Waypost::cast_vote)
//! - [`vote_of(experience_id, voter)`](crate::Waypost::vote_of)

pub mod types;

pub use types::{Vote, VoteKind};

/// What a vote request does to the standing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No standing vote; the requested vote is recorded.
    Cast(VoteKind),
    /// Standing vote in the requested direction; it is removed.
    Retract(VoteKind),
    /// Standing vote in the opposite direction; it flips.
    Switch { from: VoteKind, to: VoteKind },
}

impl VoteTransition {
    /// Decides the transition for a request against the standing vote.
    pub fn decide(existing: Option<VoteKind>, requested: VoteKind) -> Self {
        match existing {
            None => VoteTransition::Cast(requested),
            Some(current) if current == requested => VoteTransition::Retract(current),
            Some(current) => VoteTransition::Switch {
                from: current,
                to: requested,
            },
        }
    }

    /// The standing vote after the transition is applied.
    pub fn outcome(&self) -> Option<VoteKind> {
        match self {
            VoteTransition::Cast(kind) => Some(*kind),
            VoteTransition::Retract(_) => None,
            VoteTransition::Switch { to, .. } => Some(*to),
        }
    }

    /// Counter adjustments as `(upvote_delta, downvote_delta)`.
    pub fn deltas(&self) -> (i32, i32) {
        match self {
            VoteTransition::Cast(VoteKind::Up) => (1, 0),
            VoteTransition::Cast(VoteKind::Down) => (0, 1),
            VoteTransition::Retract(VoteKind::Up) => (-1, 0),
            VoteTransition::Retract(VoteKind::Down) => (0, -1),
            VoteTransition::Switch {
                from: VoteKind::Up,
                to: VoteKind::Down,
            } => (-1, 1),
            VoteTransition::Switch {
                from: VoteKind::Down,
                to: VoteKind::Up,
            } => (1, -1),
            // Same-direction "switch" cannot come out of decide()
            VoteTransition::Switch { .. } => (0, 0),
        }
    }
}
