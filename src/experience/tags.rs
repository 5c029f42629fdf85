//! Tag derivation for submitted experiences.
//!
//! Tags are computed once, at submission time, from the payload. They are
//! never edited afterwards; re-deriving from the stored payload always
//! reproduces the stored tag list.
//!
//! Only interview reports produce tags. The other payload kinds carry no
//! fields with stable, comparable vocabulary, so they get an empty list.

use crate::experience::types::ExperienceData;

/// Derives the searchable tag list for a payload.
///
/// For [`ExperienceData::Interview`] the tags are, in order:
///
/// 1. `company_name`, lowercased
/// 2. `role`, lowercased
/// 3. interview type label (`"campus"` / `"off_campus"`)
/// 4. employment type label (`"internship"` / `"full time"` / ...)
/// 5. outcome label (`"selected"` / `"rejected"` / `"on_hold"` / `"pending"`)
///
/// Empty values are skipped and duplicates collapse to the first
/// occurrence. All other payload kinds return an empty list.
pub(crate) fn derive_tags(data: &ExperienceData) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    if let ExperienceData::Interview(report) = data {
        push_unique(&mut tags, report.company_name.to_lowercase());
        push_unique(&mut tags, report.role.to_lowercase());
        push_unique(&mut tags, report.interview_type.label().to_string());
        push_unique(&mut tags, report.employment_type.label().to_string());
        push_unique(&mut tags, report.outcome.label().to_string());
    }
    tags
}

fn push_unique(tags: &mut Vec<String>, tag: String) {
    if !tag.is_empty() && !tags.contains(&tag) {
        tags.push(tag);
    }
}
