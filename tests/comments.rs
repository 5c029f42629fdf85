//! Integration tests for the comment ledger (facade level).
//!
//! Tests the full stack: Waypost facade → validation → StorageEngine →
//! redb. Covers single-level nesting, the comment_count counter moving
//! with posts and deletes, chronological listing, and edit semantics.

use waypost::{
    Comment, CommentId, Config, ExperienceData, ExperienceId, NewComment, NewExperience, OpenPost,
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

/// Helper: open DB with one submitted experience.
fn open_db_with_experience() -> (Waypost, ExperienceId, tempfile::TempDir) {
    let (db, dir) = open_db();
    let id = db.submit_experience(open_submission()).unwrap();
    (db, id, dir)
}

/// Helper to build a comment submission.
fn new_comment(experience_id: ExperienceId, parent_id: Option<CommentId>) -> NewComment {
    NewComment {
        experience_id,
        author: UserId::new("user-2"),
        username: "arjun".to_string(),
        content: "Very helpful, thanks for writing this up".to_string(),
        parent_id,
    }
}

/// Helper: post a top-level comment and return it.
fn post_one(db: &Waypost, experience_id: ExperienceId) -> Comment {
    db.post_comment(new_comment(experience_id, None)).unwrap()
}

// ============================================================================
// Posting
// ============================================================================

#[test]
fn test_post_comment_bumps_the_counter() {
    let (db, id, _dir) = open_db_with_experience();

    let comment = post_one(&db, id);
    assert_eq!(comment.experience_id, id);
    assert_eq!(comment.parent_id, None);
    assert!(!comment.is_edited);
    assert_eq!(comment.created_at, comment.updated_at);
    assert!(!comment.is_reply());

    let exp = db.get_experience(id).unwrap().unwrap();
    assert_eq!(exp.comment_count, 1);

    db.close().unwrap();
}

#[test]
fn test_post_on_unknown_experience_not_found() {
    let (db, _dir) = open_db();

    let err = db
        .post_comment(new_comment(ExperienceId::new(), None))
        .unwrap_err();
    assert!(err.is_not_found());

    db.close().unwrap();
}

#[test]
fn test_blank_content_rejected() {
    let (db, id, _dir) = open_db_with_experience();

    let mut comment = new_comment(id, None);
    comment.content = "   \n".to_string();
    let err = db.post_comment(comment).unwrap_err();
    assert!(err.is_validation());

    assert_eq!(db.get_experience(id).unwrap().unwrap().comment_count, 0);

    db.close().unwrap();
}

#[test]
fn test_oversized_content_rejected() {
    let (db, id, _dir) = open_db_with_experience();

    let mut comment = new_comment(id, None);
    comment.content = "x".repeat(10_001);
    let err = db.post_comment(comment).unwrap_err();
    assert!(err.is_validation());

    db.close().unwrap();
}

// ============================================================================
// Single-level nesting
// ============================================================================

#[test]
fn test_reply_to_top_level_comment() {
    let (db, id, _dir) = open_db_with_experience();

    let parent = post_one(&db, id);
    let reply = db.post_comment(new_comment(id, Some(parent.id))).unwrap();

    assert_eq!(reply.parent_id, Some(parent.id));
    assert!(reply.is_reply());
    assert_eq!(db.get_experience(id).unwrap().unwrap().comment_count, 2);

    db.close().unwrap();
}

#[test]
fn test_reply_to_reply_rejected() {
    let (db, id, _dir) = open_db_with_experience();

    let parent = post_one(&db, id);
    let reply = db.post_comment(new_comment(id, Some(parent.id))).unwrap();

    let err = db
        .post_comment(new_comment(id, Some(reply.id)))
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("replies to replies"));

    // The refused reply did not bump the counter
    assert_eq!(db.get_experience(id).unwrap().unwrap().comment_count, 2);

    db.close().unwrap();
}

#[test]
fn test_reply_with_unknown_parent_not_found() {
    let (db, id, _dir) = open_db_with_experience();

    let err = db
        .post_comment(new_comment(id, Some(CommentId::new())))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(db.get_experience(id).unwrap().unwrap().comment_count, 0);

    db.close().unwrap();
}

#[test]
fn test_reply_across_experiences_rejected() {
    let (db, _dir) = open_db();
    let a = db.submit_experience(open_submission()).unwrap();
    let b = db.submit_experience(open_submission()).unwrap();

    let parent_on_a = post_one(&db, a);
    let err = db
        .post_comment(new_comment(b, Some(parent_on_a.id)))
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("different experience"));

    assert_eq!(db.get_experience(b).unwrap().unwrap().comment_count, 0);

    db.close().unwrap();
}

// ============================================================================
// Listing
// ============================================================================

#[test]
fn test_comments_list_oldest_first() {
    let (db, id, _dir) = open_db_with_experience();

    let mut posted = Vec::new();
    for i in 0..3 {
        if i > 0 {
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        posted.push(post_one(&db, id).id);
    }

    let listed: Vec<CommentId> = db.comments(id).unwrap().iter().map(|c| c.id).collect();
    assert_eq!(listed, posted);

    db.close().unwrap();
}

#[test]
fn test_listing_is_flat_and_per_experience() {
    let (db, _dir) = open_db();
    let a = db.submit_experience(open_submission()).unwrap();
    let b = db.submit_experience(open_submission()).unwrap();

    let parent = post_one(&db, a);
    db.post_comment(new_comment(a, Some(parent.id))).unwrap();
    post_one(&db, b);

    // Replies appear in the flat listing of their own experience only
    assert_eq!(db.comments(a).unwrap().len(), 2);
    assert_eq!(db.comments(b).unwrap().len(), 1);

    db.close().unwrap();
}

#[test]
fn test_no_comments_lists_empty() {
    let (db, id, _dir) = open_db_with_experience();
    assert!(db.comments(id).unwrap().is_empty());
    db.close().unwrap();
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_edit_replaces_content_and_marks_edited() {
    let (db, id, _dir) = open_db_with_experience();

    let comment = post_one(&db, id);
    std::thread::sleep(std::time::Duration::from_millis(5));

    let edited = db.edit_comment(comment.id, "Fixed a typo in my reply").unwrap();
    assert_eq!(edited.content, "Fixed a typo in my reply");
    assert!(edited.is_edited);
    assert_eq!(edited.created_at, comment.created_at);
    assert!(edited.updated_at > comment.updated_at);

    // The edit is what the listing returns
    let listed = db.comments(id).unwrap();
    assert_eq!(listed[0].content, "Fixed a typo in my reply");

    // Counter untouched
    assert_eq!(db.get_experience(id).unwrap().unwrap().comment_count, 1);

    db.close().unwrap();
}

#[test]
fn test_edit_validates_content() {
    let (db, id, _dir) = open_db_with_experience();

    let comment = post_one(&db, id);
    assert!(db.edit_comment(comment.id, " ").unwrap_err().is_validation());
    assert!(db
        .edit_comment(comment.id, &"x".repeat(10_001))
        .unwrap_err()
        .is_validation());

    // Refused edits left the original in place
    assert_eq!(db.comments(id).unwrap()[0].content, comment.content);

    db.close().unwrap();
}

#[test]
fn test_edit_unknown_comment_not_found() {
    let (db, _dir) = open_db();

    let err = db.edit_comment(CommentId::new(), "Hello").unwrap_err();
    assert!(err.is_not_found());

    db.close().unwrap();
}

// ============================================================================
// Deleting
// ============================================================================

#[test]
fn test_delete_decrements_the_counter() {
    let (db, id, _dir) = open_db_with_experience();

    let a = post_one(&db, id);
    post_one(&db, id);
    post_one(&db, id);
    assert_eq!(db.get_experience(id).unwrap().unwrap().comment_count, 3);

    db.delete_comment(a.id, id).unwrap();

    assert_eq!(db.get_experience(id).unwrap().unwrap().comment_count, 2);
    assert_eq!(db.comments(id).unwrap().len(), 2);
    assert!(db.comments(id).unwrap().iter().all(|c| c.id != a.id));

    db.close().unwrap();
}

#[test]
fn test_delete_keeps_replies_as_orphans() {
    let (db, id, _dir) = open_db_with_experience();

    let parent = post_one(&db, id);
    let reply = db.post_comment(new_comment(id, Some(parent.id))).unwrap();

    db.delete_comment(parent.id, id).unwrap();

    // The reply survives, still pointing at the deleted parent
    let listed = db.comments(id).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, reply.id);
    assert_eq!(listed[0].parent_id, Some(parent.id));
    assert_eq!(db.get_experience(id).unwrap().unwrap().comment_count, 1);

    db.close().unwrap();
}

#[test]
fn test_delete_with_wrong_experience_not_found() {
    let (db, _dir) = open_db();
    let a = db.submit_experience(open_submission()).unwrap();
    let b = db.submit_experience(open_submission()).unwrap();

    let comment = post_one(&db, a);
    let err = db.delete_comment(comment.id, b).unwrap_err();
    assert!(err.is_not_found());

    // The mismatched delete changed nothing
    assert_eq!(db.comments(a).unwrap().len(), 1);
    assert_eq!(db.get_experience(a).unwrap().unwrap().comment_count, 1);

    db.close().unwrap();
}

#[test]
fn test_delete_unknown_comment_not_found() {
    let (db, id, _dir) = open_db_with_experience();

    let err = db.delete_comment(CommentId::new(), id).unwrap_err();
    assert!(err.is_not_found());

    db.close().unwrap();
}
