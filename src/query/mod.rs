//! Listing queries: filter, sort, paginate.
//!
//! Listings run as scan-and-post-filter: storage hands over the candidate
//! records, [`ExperienceFilter`] narrows them, [`SortBy`] orders them, and
//! cursor pagination slices the result. Sorting is always newest-or-biggest
//! first with the experience id as a tiebreak, which makes the order total
//! and cursors stable: re-running a query with the returned cursor never
//! skips or repeats an entry, as long as the underlying data is unchanged.
//!
//! Listing operations are available on [`Waypost`](crate::Waypost):
//!
//! - [`list_experiences(filter, sort, page)`](crate::Waypost::list_experiences)

pub mod filter;

pub use filter::ExperienceFilter;

use serde::{Deserialize, Serialize};

use crate::experience::Experience;
use crate::types::ExperienceId;

/// Sort orders for experience listings. All orders are descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    /// Newest first. The default.
    #[default]
    CreatedAt,
    /// Most upvoted first.
    Upvotes,
    /// Most discussed first.
    CommentCount,
}

impl SortBy {
    /// The sort key of an experience under this order.
    fn key_of(self, experience: &Experience) -> i64 {
        match self {
            SortBy::CreatedAt => experience.created_at.as_millis(),
            SortBy::Upvotes => i64::from(experience.upvotes),
            SortBy::CommentCount => i64::from(experience.comment_count),
        }
    }
}

/// Resume position for a paginated listing.
///
/// A cursor is only meaningful for the filter and sort order that
/// produced it. Treat it as opaque: hold on to it and pass it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    key: i64,
    id: ExperienceId,
}

/// Page size and resume position for a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Entries per page. `None` uses the configured default.
    pub limit: Option<usize>,
    /// Resume after this position. `None` starts from the top.
    pub cursor: Option<Cursor>,
}

impl PageRequest {
    /// The first page with the default size.
    pub fn first() -> Self {
        Self::default()
    }

    /// The next page after `cursor` with the default size.
    pub fn after(cursor: Cursor) -> Self {
        Self {
            limit: None,
            cursor: Some(cursor),
        }
    }
}

/// One page of listing results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperiencePage {
    /// The matching experiences, in sort order.
    pub experiences: Vec<Experience>,
    /// Cursor for the next page, or `None` on the last page.
    pub next_cursor: Option<Cursor>,
}

/// Filters, sorts, and paginates scanned records.
///
/// `default_limit` applies when the request carries no explicit limit.
/// A page is marked last (no cursor) exactly when nothing follows it.
pub(crate) fn run_query(
    mut experiences: Vec<Experience>,
    filter: &ExperienceFilter,
    sort: SortBy,
    page: &PageRequest,
    default_limit: usize,
) -> ExperiencePage {
    experiences.retain(|e| filter.matches(e));

    // Total order: descending (key, id)
    experiences.sort_by(|a, b| {
        sort.key_of(b)
            .cmp(&sort.key_of(a))
            .then_with(|| b.id.0.cmp(&a.id.0))
    });

    // Everything at or before the cursor position has already been served
    if let Some(cursor) = page.cursor {
        experiences.retain(|e| (sort.key_of(e), e.id.0) < (cursor.key, cursor.id.0));
    }

    let limit = page.limit.unwrap_or(default_limit);
    let next_cursor = if experiences.len() > limit {
        experiences.truncate(limit);
        experiences.last().map(|e| Cursor {
            key: sort.key_of(e),
            id: e.id,
        })
    } else {
        None
    };

    ExperiencePage {
        experiences,
        next_cursor,
    }
}
