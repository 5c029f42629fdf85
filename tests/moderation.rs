//! Integration tests for moderation (facade level).
//!
//! Tests the full stack: Waypost facade → admin check → StorageEngine →
//! redb status transition. Covers the one-way pending → published/rejected
//! state machine, the review queue, and the status counters.

use waypost::{
    Config, ExperienceData, ExperienceId, ExperienceStatus, NewExperience, OpenPost, Principal,
    UserId, Waypost,
};

use tempfile::tempdir;

/// Helper to open a fresh database with default config.
fn open_db() -> (Waypost, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Waypost::open(&path, Config::default()).unwrap();
    (db, dir)
}

/// Helper to build a minimal valid open-post submission.
fn open_submission() -> NewExperience {
    NewExperience {
        author: UserId::new("user-1"),
        username: "priya".to_string(),
        data: ExperienceData::Open(OpenPost {
            title: "A post".into(),
            category: "Career".into(),
            content: "x".repeat(120),
            key_takeaways: vec!["One thing".into()],
        }),
        summary: "A summary".to_string(),
    }
}

/// Helper: submit one pending experience.
fn submit_one(db: &Waypost) -> ExperienceId {
    db.submit_experience(open_submission()).unwrap()
}

// ============================================================================
// Approve
// ============================================================================

#[test]
fn test_approve_publishes_pending_experience() {
    let (db, _dir) = open_db();

    let id = submit_one(&db);
    let before = db.get_experience(id).unwrap().unwrap();

    let published = db.approve_experience(&Principal::admin("mod-1"), id).unwrap();
    assert_eq!(published.status, ExperienceStatus::Published);
    assert!(published.published_at.is_some());
    assert_eq!(published.admin_feedback, None);
    assert_eq!(published.created_at, before.created_at);

    // Returned record matches the stored one
    let stored = db.get_experience(id).unwrap().unwrap();
    assert_eq!(stored, published);

    db.close().unwrap();
}

#[test]
fn test_approve_requires_admin() {
    let (db, _dir) = open_db();

    let id = submit_one(&db);
    let err = db
        .approve_experience(&Principal::user("user-9"), id)
        .unwrap_err();
    assert!(err.is_permission());
    assert!(err.to_string().contains("user-9"));

    // Still pending
    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.status, ExperienceStatus::Pending);

    db.close().unwrap();
}

#[test]
fn test_approve_unknown_experience_not_found() {
    let (db, _dir) = open_db();

    let err = db
        .approve_experience(&Principal::admin("mod-1"), ExperienceId::new())
        .unwrap_err();
    assert!(err.is_not_found());

    db.close().unwrap();
}

#[test]
fn test_double_approve_is_a_state_conflict() {
    let (db, _dir) = open_db();

    let id = submit_one(&db);
    let admin = Principal::admin("mod-1");
    let first = db.approve_experience(&admin, id).unwrap();

    let err = db.approve_experience(&admin, id).unwrap_err();
    assert!(err.is_state_conflict());

    // The losing call changed nothing
    let stored = db.get_experience(id).unwrap().unwrap();
    assert_eq!(stored, first);

    db.close().unwrap();
}

// ============================================================================
// Reject
// ============================================================================

#[test]
fn test_reject_stores_feedback() {
    let (db, _dir) = open_db();

    let id = submit_one(&db);
    let rejected = db
        .reject_experience(
            &Principal::admin("mod-1"),
            id,
            "Please remove the salary screenshot",
        )
        .unwrap();

    assert_eq!(rejected.status, ExperienceStatus::Rejected);
    assert_eq!(
        rejected.admin_feedback.as_deref(),
        Some("Please remove the salary screenshot")
    );
    assert_eq!(rejected.published_at, None);

    db.close().unwrap();
}

#[test]
fn test_reject_requires_admin() {
    let (db, _dir) = open_db();

    let id = submit_one(&db);
    let err = db
        .reject_experience(&Principal::user("user-9"), id, "Feedback")
        .unwrap_err();
    assert!(err.is_permission());

    db.close().unwrap();
}

#[test]
fn test_reject_requires_feedback() {
    let (db, _dir) = open_db();

    let id = submit_one(&db);
    let admin = Principal::admin("mod-1");

    let err = db.reject_experience(&admin, id, "   ").unwrap_err();
    assert!(err.is_validation());

    let err = db
        .reject_experience(&admin, id, &"x".repeat(2_001))
        .unwrap_err();
    assert!(err.is_validation());

    // Both refusals left the submission pending
    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.status, ExperienceStatus::Pending);
    assert_eq!(exp.admin_feedback, None);

    db.close().unwrap();
}

#[test]
fn test_reject_after_approve_is_a_state_conflict() {
    let (db, _dir) = open_db();

    let id = submit_one(&db);
    let admin = Principal::admin("mod-1");
    db.approve_experience(&admin, id).unwrap();

    let err = db.reject_experience(&admin, id, "Too late").unwrap_err();
    assert!(err.is_state_conflict());

    // Still published, no feedback attached
    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.status, ExperienceStatus::Published);
    assert_eq!(exp.admin_feedback, None);

    db.close().unwrap();
}

#[test]
fn test_approve_after_reject_is_a_state_conflict() {
    let (db, _dir) = open_db();

    let id = submit_one(&db);
    let admin = Principal::admin("mod-1");
    db.reject_experience(&admin, id, "Names real people").unwrap();

    let err = db.approve_experience(&admin, id).unwrap_err();
    assert!(err.is_state_conflict());

    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.status, ExperienceStatus::Rejected);
    assert_eq!(exp.published_at, None);

    db.close().unwrap();
}

#[test]
fn test_rejected_experience_keeps_its_payload() {
    // Rejection hides the item from the feed but the author still sees
    // their submission together with the feedback.
    let (db, _dir) = open_db();

    let id = submit_one(&db);
    db.reject_experience(&Principal::admin("mod-1"), id, "Too vague")
        .unwrap();

    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.summary, "A summary");
    match &exp.data {
        ExperienceData::Open(post) => assert_eq!(post.title, "A post"),
        other => panic!("wrong payload: {:?}", other),
    }

    db.close().unwrap();
}

// ============================================================================
// Review queue
// ============================================================================

#[test]
fn test_pending_queue_is_fifo() {
    let (db, _dir) = open_db();

    let mut ids = Vec::new();
    for i in 0..3 {
        if i > 0 {
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        ids.push(submit_one(&db));
    }

    let queue = db.pending_queue().unwrap();
    let queued: Vec<ExperienceId> = queue.iter().map(|e| e.id).collect();
    assert_eq!(queued, ids, "oldest submission reviews first");

    db.close().unwrap();
}

#[test]
fn test_moderated_items_leave_the_queue() {
    let (db, _dir) = open_db();

    let a = submit_one(&db);
    let b = submit_one(&db);
    let c = submit_one(&db);
    let admin = Principal::admin("mod-1");

    db.approve_experience(&admin, a).unwrap();
    db.reject_experience(&admin, b, "Feedback").unwrap();

    let queue = db.pending_queue().unwrap();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].id, c);

    db.close().unwrap();
}

#[test]
fn test_empty_queue() {
    let (db, _dir) = open_db();
    assert!(db.pending_queue().unwrap().is_empty());
    db.close().unwrap();
}

// ============================================================================
// Status counters
// ============================================================================

#[test]
fn test_stats_track_every_transition() {
    let (db, _dir) = open_db();

    let admin = Principal::admin("mod-1");
    let ids: Vec<ExperienceId> = (0..5).map(|_| submit_one(&db)).collect();

    let stats = db.moderation_stats().unwrap();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.pending, 5);
    assert_eq!(stats.published, 0);
    assert_eq!(stats.rejected, 0);

    db.approve_experience(&admin, ids[0]).unwrap();
    db.approve_experience(&admin, ids[1]).unwrap();
    db.reject_experience(&admin, ids[2], "Feedback").unwrap();

    let stats = db.moderation_stats().unwrap();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.published, 2);
    assert_eq!(stats.rejected, 1);

    db.close().unwrap();
}

#[test]
fn test_stats_on_empty_store_are_zero() {
    let (db, _dir) = open_db();

    let stats = db.moderation_stats().unwrap();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.published, 0);
    assert_eq!(stats.rejected, 0);

    db.close().unwrap();
}
