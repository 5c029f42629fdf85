//! Core type definitions for Waypost identifiers and timestamps.
//!
//! This module defines the fundamental ID types used throughout Waypost.
//! Record ID types use UUID v7 for time-ordered unique identification;
//! user identity is an opaque string supplied by the host application.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Experience identifier (UUID v7 for time-ordering).
///
/// Experiences are the submitted content items of the platform: interview
/// reports, work reviews, transition stories, learning journeys, and
/// open-form posts.
///
/// # Example
/// ```
/// use waypost::ExperienceId;
///
/// let id = ExperienceId::new();
/// println!("Created experience: {}", id);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExperienceId(pub Uuid);

impl ExperienceId {
    /// Creates a new ExperienceId with a UUID v7 (time-ordered).
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a nil (all zeros) ExperienceId.
    /// Useful for testing or sentinel values.
    #[inline]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns the raw UUID bytes for storage.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Creates an ExperienceId from raw bytes.
    #[inline]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for ExperienceId {
    /// Returns a nil (all zeros) ExperienceId.
    ///
    /// For a new unique ID, use [`ExperienceId::new()`].
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Display for ExperienceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Comment identifier (UUID v7 for time-ordering).
///
/// Comments hang off a single experience and may reply to one top-level
/// comment on the same experience.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(pub Uuid);

impl CommentId {
    /// Creates a new CommentId with a UUID v7 (time-ordered).
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a nil (all zeros) CommentId.
    #[inline]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns the raw UUID bytes for storage.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Creates a CommentId from raw bytes.
    #[inline]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for CommentId {
    /// Returns a nil (all zeros) CommentId.
    ///
    /// For a new unique ID, use [`CommentId::new()`].
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unix timestamp in milliseconds.
///
/// Using i64 allows representing dates far into the future and past.
/// Millisecond precision is sufficient for submission and voting activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    ///
    /// If the system clock is before the Unix epoch (should never happen
    /// in practice), returns a timestamp of 0 (epoch) rather than panicking.
    #[inline]
    pub fn now() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self(duration.as_millis() as i64)
    }

    /// Creates a timestamp from Unix milliseconds.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp as Unix milliseconds.
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Returns big-endian bytes for storage (enables lexicographic ordering).
    #[inline]
    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque user identifier.
///
/// Waypost doesn't handle authentication - the consumer provides user IDs
/// from whatever identity provider it integrates with. The same value is
/// used as author, voter, and commenter identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Creates a new UserId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the user ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role attached to an authenticated principal.
///
/// Only moderation transitions distinguish roles; everything else treats
/// all principals alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Regular community member.
    User,
    /// Administrator, allowed to approve and reject submissions.
    Admin,
}

impl UserRole {
    /// Returns true for [`UserRole::Admin`].
    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// An authenticated caller, as reported by the host's identity provider.
///
/// Waypost never verifies credentials; it trusts the host to hand it a
/// correct principal and only consults the role on moderation operations.
///
/// # Example
/// ```
/// use waypost::{Principal, UserId, UserRole};
///
/// let admin = Principal::new(UserId::new("user-42"), UserRole::Admin);
/// assert!(admin.is_admin());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable identity from the host's auth system.
    pub id: UserId,
    /// Role gating moderation operations.
    pub role: UserRole,
}

impl Principal {
    /// Creates a principal from an ID and role.
    pub fn new(id: UserId, role: UserRole) -> Self {
        Self { id, role }
    }

    /// Convenience constructor for a regular member.
    pub fn user(id: impl Into<String>) -> Self {
        Self::new(UserId::new(id), UserRole::User)
    }

    /// Convenience constructor for an administrator.
    pub fn admin(id: impl Into<String>) -> Self {
        Self::new(UserId::new(id), UserRole::Admin)
    }

    /// Returns true if this principal carries the admin role.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.id, self.role)
    }
}
