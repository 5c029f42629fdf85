//! Filtering for experience listings.
//!
//! [`ExperienceFilter`] provides a composable way to narrow experience
//! listings. Filters are applied as post-filters after the primary
//! retrieval (full scan or status-index walk).

use crate::experience::{Experience, ExperienceKind, ExperienceStatus};
use crate::types::UserId;

/// Filter criteria for experience listings.
///
/// Used by [`Waypost::list_experiences`](crate::Waypost::list_experiences).
/// Fields set to `None` are not filtered on; the default filter matches
/// everything.
///
/// # Example
///
/// ```rust
/// use waypost::{ExperienceFilter, ExperienceKind, ExperienceStatus};
///
/// // Published interview reports for one company
/// let filter = ExperienceFilter {
///     status: Some(ExperienceStatus::Published),
///     kind: Some(ExperienceKind::Interview),
///     company_name: Some("Google".to_string()),
///     ..ExperienceFilter::default()
/// };
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExperienceFilter {
    /// Only include experiences with this moderation status.
    pub status: Option<ExperienceStatus>,

    /// Only include experiences of this kind.
    pub kind: Option<ExperienceKind>,

    /// Only include experiences submitted by this author.
    pub author: Option<UserId>,

    /// Only include experiences mentioning this company.
    ///
    /// Compared case-insensitively against the denormalized company
    /// column, so only interview and work experiences can match.
    pub company_name: Option<String>,
}

impl ExperienceFilter {
    /// Returns `true` if the given experience passes all filter criteria.
    pub fn matches(&self, experience: &Experience) -> bool {
        // Check moderation status
        if let Some(status) = self.status {
            if experience.status != status {
                return false;
            }
        }

        // Check kind (derived from the payload, never stored separately)
        if let Some(kind) = self.kind {
            if experience.kind() != kind {
                return false;
            }
        }

        // Check author
        if let Some(ref author) = self.author {
            if &experience.author != author {
                return false;
            }
        }

        // Check company, case-insensitively
        if let Some(ref company) = self.company_name {
            let Some(stored) = experience.company_name.as_deref() else {
                return false;
            };
            if stored.to_lowercase() != company.to_lowercase() {
                return false;
            }
        }

        true
    }
}
