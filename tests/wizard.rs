//! Integration tests for the submission wizard driving the full stack.
//!
//! Each experience kind gets a complete walk: WizardSession step by step
//! through its flow, `submission()` at the review step, then
//! `Waypost::submit_experience` and a read-back of the persisted record.
//! Navigation mechanics are unit-tested next to the wizard; these tests
//! check that what the wizard assembles is what the store returns.

use waypost::wizard::WizardSession;
use waypost::{
    Config, EmploymentType, ExperienceData, ExperienceKind, ExperienceLevel, ExperienceStatus,
    InterviewOutcome, InterviewRound, InterviewType, Rating, UserId, Waypost,
};

use tempfile::tempdir;

/// Helper to open a fresh database with default config.
fn open_db() -> (Waypost, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Waypost::open(&path, Config::default()).unwrap();
    (db, dir)
}

/// Walks an interview session to its review step (step 7).
fn interview_session() -> WizardSession {
    let mut session = WizardSession::new();
    session.select_type(ExperienceKind::Interview);

    {
        let d = session.draft_mut().unwrap().as_interview_mut().unwrap();
        d.interview_type = Some(InterviewType::Campus);
        d.role = "SDE".into();
        d.employment_type = Some(EmploymentType::FullTime);
    }
    assert!(session.advance());

    {
        let d = session.draft_mut().unwrap().as_interview_mut().unwrap();
        d.company_name = "Google".into();
        d.interview_month = Some(3);
        d.interview_year = Some(2024);
        d.opportunity_source = "Campus placement".into();
    }
    assert!(session.advance());

    {
        let d = session.draft_mut().unwrap().as_interview_mut().unwrap();
        d.designation = "SDE-1".into();
        d.experience_level = Some(ExperienceLevel::Fresher);
    }
    assert!(session.advance());

    session
        .draft_mut()
        .unwrap()
        .as_interview_mut()
        .unwrap()
        .rounds
        .push(InterviewRound {
            round_number: 1,
            round_type: "Technical Round".into(),
            description: "Two DSA problems on arrays and graphs".into(),
            difficulty: Rating::new(3).unwrap(),
            tips: Some("Think aloud".into()),
        });
    assert!(session.advance());

    {
        let d = session.draft_mut().unwrap().as_interview_mut().unwrap();
        d.overall_difficulty = Some(Rating::new(4).unwrap());
        d.preparation_tips = "Grind graph problems for a month".into();
    }
    assert!(session.advance());

    {
        let d = session.draft_mut().unwrap().as_interview_mut().unwrap();
        d.outcome = Some(InterviewOutcome::Selected);
        d.offer_details = "12 LPA".into();
    }
    assert!(session.advance());

    assert_eq!(session.current_step(), 7);
    session
}

/// Walks a work-review session to its review step (step 5).
fn work_session() -> WizardSession {
    let mut session = WizardSession::new();
    session.select_type(ExperienceKind::Work);

    {
        let d = session.draft_mut().unwrap().as_work_mut().unwrap();
        d.company_name = "Initech".into();
        d.role = "Backend Engineer".into();
        d.duration = "2 years".into();
        d.team_size = Some(8);
    }
    assert!(session.advance());

    {
        let d = session.draft_mut().unwrap().as_work_mut().unwrap();
        d.work_description = "Billing services in a monolith".into();
        d.learnings = "How to untangle legacy code".into();
    }
    assert!(session.advance());

    {
        let d = session.draft_mut().unwrap().as_work_mut().unwrap();
        d.pros.push("Strong mentorship".into());
        d.cons.push("Slow releases".into());
    }
    assert!(session.advance());

    {
        let d = session.draft_mut().unwrap().as_work_mut().unwrap();
        d.rating = Some(Rating::new(4).unwrap());
        d.would_recommend = Some(true);
    }
    assert!(session.advance());

    assert_eq!(session.current_step(), 5);
    session
}

/// Walks a transition session to its review step (step 5).
fn transition_session() -> WizardSession {
    let mut session = WizardSession::new();
    session.select_type(ExperienceKind::Transition);

    {
        let d = session.draft_mut().unwrap().as_transition_mut().unwrap();
        d.from_role = "QA Engineer".into();
        d.to_role = "SDET".into();
        d.to_company = "Initech".into();
    }
    assert!(session.advance());

    session
        .draft_mut()
        .unwrap()
        .as_transition_mut()
        .unwrap()
        .transition_reason = "Wanted to write code daily".into();
    assert!(session.advance());

    {
        let d = session.draft_mut().unwrap().as_transition_mut().unwrap();
        d.challenges_faced = "No professional coding experience".into();
        d.how_overcame = "Automated my own test suite first".into();
    }
    assert!(session.advance());

    {
        let d = session.draft_mut().unwrap().as_transition_mut().unwrap();
        d.timeline_duration = "8 months".into();
        d.advice_for_others = "Start automating before you switch".into();
    }
    assert!(session.advance());

    assert_eq!(session.current_step(), 5);
    session
}

/// Walks a learning session to its review step (step 5).
fn learning_session() -> WizardSession {
    let mut session = WizardSession::new();
    session.select_type(ExperienceKind::Learning);

    {
        let d = session.draft_mut().unwrap().as_learning_mut().unwrap();
        d.skill = "Rust".into();
        d.category = "Systems Programming".into();
        d.duration = "6 months".into();
    }
    assert!(session.advance());

    {
        let d = session.draft_mut().unwrap().as_learning_mut().unwrap();
        d.resources.push("The Rust Book".into());
        d.resources.push("Rustlings".into());
        d.learning_path = "Book first, then exercises".into();
    }
    assert!(session.advance());

    {
        let d = session.draft_mut().unwrap().as_learning_mut().unwrap();
        d.projects_built.push("A toy key-value store".into());
        d.challenges_faced = "The borrow checker, for weeks".into();
    }
    assert!(session.advance());

    {
        let d = session.draft_mut().unwrap().as_learning_mut().unwrap();
        d.outcomes = "Shipped a production service".into();
        d.tips = "Write code every day".into();
    }
    assert!(session.advance());

    assert_eq!(session.current_step(), 5);
    session
}

/// Walks an open-post session to its review step (step 4).
fn open_session() -> WizardSession {
    let mut session = WizardSession::new();
    session.select_type(ExperienceKind::Open);

    {
        let d = session.draft_mut().unwrap().as_open_mut().unwrap();
        d.title = "Negotiating my first offer".into();
        d.category = "Career Advice".into();
    }
    assert!(session.advance());

    session.draft_mut().unwrap().as_open_mut().unwrap().content =
        "I almost accepted the first number they gave me. Here is what changed my \
         mind, what I said on the call, and how the final offer compared."
            .into();
    assert!(session.advance());

    session
        .draft_mut()
        .unwrap()
        .as_open_mut()
        .unwrap()
        .key_takeaways
        .push("Always ask once".into());
    assert!(session.advance());

    assert_eq!(session.current_step(), 4);
    session
}

// ============================================================================
// Full walks, one per kind
// ============================================================================

#[test]
fn test_interview_walk_submits_and_persists() {
    let (db, _dir) = open_db();

    let mut session = interview_session();
    session.set_summary("Campus interview at Google, selected after four rounds");

    let submission = session.submission(UserId::new("user-1"), "priya").unwrap();
    let id = db.submit_experience(submission).unwrap();

    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.status, ExperienceStatus::Pending);
    assert_eq!(exp.username, "priya");
    assert_eq!(exp.company_name.as_deref(), Some("Google"));
    assert_eq!(exp.role.as_deref(), Some("SDE"));
    assert_eq!(
        exp.tags,
        vec!["google", "sde", "campus", "full time", "selected"]
    );
    match &exp.data {
        ExperienceData::Interview(report) => {
            assert_eq!(report.rounds.len(), 1);
            assert_eq!(report.rounds[0].round_type, "Technical Round");
            assert_eq!(report.offer_details.as_deref(), Some("12 LPA"));
            assert_eq!(report.outcome, InterviewOutcome::Selected);
        }
        other => panic!("wrong payload: {:?}", other),
    }

    db.close().unwrap();
}

#[test]
fn test_work_walk_submits_and_persists() {
    let (db, _dir) = open_db();

    let mut session = work_session();
    session.set_summary("Two formative years on Initech's billing team");

    let submission = session.submission(UserId::new("user-2"), "dev").unwrap();
    let id = db.submit_experience(submission).unwrap();

    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.kind(), ExperienceKind::Work);
    assert_eq!(exp.company_name.as_deref(), Some("Initech"));
    assert_eq!(exp.role.as_deref(), Some("Backend Engineer"));
    assert!(exp.tags.is_empty());
    match &exp.data {
        ExperienceData::Work(review) => {
            assert_eq!(review.team_size, Some(8));
            assert_eq!(review.rating.get(), 4);
            assert!(review.would_recommend);
        }
        other => panic!("wrong payload: {:?}", other),
    }

    db.close().unwrap();
}

#[test]
fn test_transition_walk_submits_and_persists() {
    let (db, _dir) = open_db();

    let mut session = transition_session();
    session.set_summary("QA to SDET in eight months");

    let submission = session.submission(UserId::new("user-3"), "sam").unwrap();
    let id = db.submit_experience(submission).unwrap();

    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.kind(), ExperienceKind::Transition);
    // Transitions never populate the denormalized company column
    assert_eq!(exp.company_name, None);
    assert_eq!(exp.role, None);
    match &exp.data {
        ExperienceData::Transition(story) => {
            assert_eq!(story.from_company, None);
            assert_eq!(story.to_company.as_deref(), Some("Initech"));
        }
        other => panic!("wrong payload: {:?}", other),
    }

    db.close().unwrap();
}

#[test]
fn test_learning_walk_submits_and_persists() {
    let (db, _dir) = open_db();

    let mut session = learning_session();
    session.set_summary("Six months from zero to a shipped Rust service");

    let submission = session.submission(UserId::new("user-4"), "lee").unwrap();
    let id = db.submit_experience(submission).unwrap();

    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.kind(), ExperienceKind::Learning);
    match &exp.data {
        ExperienceData::Learning(journey) => {
            assert_eq!(journey.resources.len(), 2);
            assert_eq!(journey.projects_built, vec!["A toy key-value store"]);
        }
        other => panic!("wrong payload: {:?}", other),
    }

    db.close().unwrap();
}

#[test]
fn test_open_walk_submits_and_persists() {
    let (db, _dir) = open_db();

    let mut session = open_session();
    session.set_summary("What negotiating my first offer taught me");

    let submission = session.submission(UserId::new("user-5"), "ana").unwrap();
    let id = db.submit_experience(submission).unwrap();

    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.kind(), ExperienceKind::Open);
    assert_eq!(exp.company_name, None);
    match &exp.data {
        ExperienceData::Open(post) => {
            assert_eq!(post.title, "Negotiating my first offer");
            assert_eq!(post.key_takeaways, vec!["Always ask once"]);
        }
        other => panic!("wrong payload: {:?}", other),
    }

    db.close().unwrap();
}

// ============================================================================
// Review-step edits
// ============================================================================

#[test]
fn test_edit_from_review_step_flows_into_submission() {
    let (db, _dir) = open_db();

    let mut session = work_session();
    session.set_summary("Two years at Initech");

    // The review screen's "edit" link jumps straight to step 1
    assert!(session.go_to(1));
    session.draft_mut().unwrap().as_work_mut().unwrap().role = "Staff Engineer".into();

    // Walking forward again passes every gate with the data intact
    while session.current_step() < session.total_steps() {
        assert!(session.advance());
    }

    let submission = session.submission(UserId::new("user-2"), "dev").unwrap();
    let id = db.submit_experience(submission).unwrap();
    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.role.as_deref(), Some("Staff Engineer"));

    db.close().unwrap();
}

// ============================================================================
// Failed submissions leave the session intact
// ============================================================================

#[test]
fn test_rejected_submission_leaves_session_and_store_untouched() {
    let (db, _dir) = open_db();

    let session = open_session();
    // Summary never set: the pipeline refuses the submission
    let submission = session.submission(UserId::new("user-5"), "ana").unwrap();
    let err = db.submit_experience(submission).unwrap_err();
    assert!(err.is_validation());

    // Nothing was persisted
    assert_eq!(db.moderation_stats().unwrap().total, 0);

    // The session still holds the draft; fixing the summary succeeds
    let mut session = session;
    assert_eq!(session.current_step(), 4);
    session.set_summary("What negotiating my first offer taught me");
    let submission = session.submission(UserId::new("user-5"), "ana").unwrap();
    let id = db.submit_experience(submission).unwrap();
    assert!(db.get_experience(id).unwrap().is_some());

    db.close().unwrap();
}

#[test]
fn test_incomplete_draft_never_reaches_the_store() {
    let (db, _dir) = open_db();

    let mut session = WizardSession::new();
    session.select_type(ExperienceKind::Work);
    session.set_summary("A summary that is fine");

    // Rating select untouched, so the draft cannot finalize
    let err = session.submission(UserId::new("user-2"), "dev").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(db.moderation_stats().unwrap().total, 0);

    db.close().unwrap();
}
