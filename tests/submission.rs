//! Integration tests for the submission pipeline (facade level).
//!
//! Tests the full stack: Waypost facade → validation → tag derivation →
//! StorageEngine → redb. Field-by-field validation rules are unit-tested
//! next to the validator; here we check what a submission persists as and
//! that refused submissions leave no trace in the store.

use waypost::{
    Config, EmploymentType, ExperienceData, ExperienceLevel, ExperienceStatus, InterviewOutcome,
    InterviewReport, InterviewRound, InterviewType, NewExperience, OpenPost, Rating, UserId,
    Waypost, WorkReview,
};

use tempfile::tempdir;

/// Helper to open a fresh database with default config.
fn open_db() -> (Waypost, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Waypost::open(&path, Config::default()).unwrap();
    (db, dir)
}

/// Helper to build a minimal valid interview submission.
fn interview_submission() -> NewExperience {
    NewExperience {
        author: UserId::new("user-1"),
        username: "priya".to_string(),
        data: ExperienceData::Interview(InterviewReport {
            interview_type: InterviewType::Campus,
            role: "SDE".into(),
            employment_type: EmploymentType::FullTime,
            company_name: "Google".into(),
            interview_month: 3,
            interview_year: 2024,
            opportunity_source: "Campus placement".into(),
            designation: "SDE-1".into(),
            experience_level: ExperienceLevel::Fresher,
            rounds: vec![InterviewRound {
                round_number: 1,
                round_type: "Technical Round".into(),
                description: "Two DSA problems".into(),
                difficulty: Rating::new(3).unwrap(),
                tips: None,
            }],
            overall_difficulty: Rating::new(4).unwrap(),
            preparation_tips: "Practice graphs".into(),
            outcome: InterviewOutcome::Selected,
            offer_details: None,
        }),
        summary: "Selected after four rounds on campus".to_string(),
    }
}

/// Helper to build a minimal valid work-review submission.
fn work_submission() -> NewExperience {
    NewExperience {
        data: ExperienceData::Work(WorkReview {
            company_name: "Initech".into(),
            role: "Backend Engineer".into(),
            duration: "2 years".into(),
            team_size: None,
            work_description: "Billing services".into(),
            learnings: "Distributed systems".into(),
            pros: vec!["Good mentorship".into()],
            cons: vec![],
            rating: Rating::new(4).unwrap(),
            would_recommend: true,
        }),
        ..interview_submission()
    }
}

/// Helper to build a minimal valid open-post submission.
fn open_submission() -> NewExperience {
    NewExperience {
        data: ExperienceData::Open(OpenPost {
            title: "Negotiation lessons".into(),
            category: "Career".into(),
            content: "x".repeat(120),
            key_takeaways: vec!["Always ask".into()],
        }),
        ..interview_submission()
    }
}

// ============================================================================
// What a submission persists as
// ============================================================================

#[test]
fn test_submission_lands_pending_with_zeroed_counters() {
    let (db, _dir) = open_db();

    let id = db.submit_experience(interview_submission()).unwrap();
    let exp = db.get_experience(id).unwrap().unwrap();

    assert_eq!(exp.id, id);
    assert_eq!(exp.status, ExperienceStatus::Pending);
    assert_eq!(exp.admin_feedback, None);
    assert_eq!(exp.upvotes, 0);
    assert_eq!(exp.downvotes, 0);
    assert_eq!(exp.comment_count, 0);
    assert_eq!(exp.published_at, None);
    assert_eq!(exp.created_at, exp.updated_at);

    db.close().unwrap();
}

#[test]
fn test_interview_submission_derives_tags() {
    let (db, _dir) = open_db();

    let id = db.submit_experience(interview_submission()).unwrap();
    let exp = db.get_experience(id).unwrap().unwrap();

    assert_eq!(
        exp.tags,
        vec!["google", "sde", "campus", "full time", "selected"]
    );

    db.close().unwrap();
}

#[test]
fn test_non_interview_submission_gets_no_tags() {
    let (db, _dir) = open_db();

    let work_id = db.submit_experience(work_submission()).unwrap();
    let open_id = db.submit_experience(open_submission()).unwrap();

    assert!(db.get_experience(work_id).unwrap().unwrap().tags.is_empty());
    assert!(db.get_experience(open_id).unwrap().unwrap().tags.is_empty());

    db.close().unwrap();
}

#[test]
fn test_denormalized_columns_follow_the_payload() {
    let (db, _dir) = open_db();

    let interview_id = db.submit_experience(interview_submission()).unwrap();
    let work_id = db.submit_experience(work_submission()).unwrap();
    let open_id = db.submit_experience(open_submission()).unwrap();

    let interview = db.get_experience(interview_id).unwrap().unwrap();
    assert_eq!(interview.company_name.as_deref(), Some("Google"));
    assert_eq!(interview.role.as_deref(), Some("SDE"));

    let work = db.get_experience(work_id).unwrap().unwrap();
    assert_eq!(work.company_name.as_deref(), Some("Initech"));
    assert_eq!(work.role.as_deref(), Some("Backend Engineer"));

    let open = db.get_experience(open_id).unwrap().unwrap();
    assert_eq!(open.company_name, None);
    assert_eq!(open.role, None);

    db.close().unwrap();
}

#[test]
fn test_each_submission_gets_a_distinct_id() {
    let (db, _dir) = open_db();

    let a = db.submit_experience(open_submission()).unwrap();
    let b = db.submit_experience(open_submission()).unwrap();
    let c = db.submit_experience(open_submission()).unwrap();

    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);

    db.close().unwrap();
}

#[test]
fn test_payload_round_trips_unchanged() {
    let (db, _dir) = open_db();

    let submission = interview_submission();
    let expected = submission.data.clone();
    let id = db.submit_experience(submission).unwrap();

    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.data, expected);
    assert_eq!(exp.summary, "Selected after four rounds on campus");
    assert_eq!(exp.author.as_str(), "user-1");
    assert_eq!(exp.username, "priya");

    db.close().unwrap();
}

#[test]
fn test_get_unknown_experience_returns_none() {
    let (db, _dir) = open_db();

    db.submit_experience(open_submission()).unwrap();
    assert!(db
        .get_experience(waypost::ExperienceId::new())
        .unwrap()
        .is_none());

    db.close().unwrap();
}

// ============================================================================
// Refused submissions leave no trace
// ============================================================================

#[test]
fn test_blank_summary_refused_without_persisting() {
    let (db, _dir) = open_db();

    let submission = NewExperience {
        summary: "   ".to_string(),
        ..interview_submission()
    };
    let err = db.submit_experience(submission).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(db.moderation_stats().unwrap().total, 0);

    db.close().unwrap();
}

#[test]
fn test_invalid_month_refused_without_persisting() {
    let (db, _dir) = open_db();

    let mut submission = interview_submission();
    if let ExperienceData::Interview(ref mut report) = submission.data {
        report.interview_month = 13;
    }
    let err = db.submit_experience(submission).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("interview_month"));
    assert_eq!(db.moderation_stats().unwrap().total, 0);

    db.close().unwrap();
}

#[test]
fn test_short_open_content_refused_without_persisting() {
    let (db, _dir) = open_db();

    let mut submission = open_submission();
    if let ExperienceData::Open(ref mut post) = submission.data {
        post.content = "too short".to_string();
    }
    let err = db.submit_experience(submission).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(db.moderation_stats().unwrap().total, 0);

    db.close().unwrap();
}

#[test]
fn test_refusal_does_not_poison_later_submissions() {
    let (db, _dir) = open_db();

    let bad = NewExperience {
        username: String::new(),
        ..open_submission()
    };
    assert!(db.submit_experience(bad).unwrap_err().is_validation());

    let id = db.submit_experience(open_submission()).unwrap();
    assert!(db.get_experience(id).unwrap().is_some());
    assert_eq!(db.moderation_stats().unwrap().total, 1);

    db.close().unwrap();
}
