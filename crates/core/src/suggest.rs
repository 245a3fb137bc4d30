//! Live search suggestions

use crate::doctor::DoctorRecord;
use crate::engine::name_matches;

/// Maximum number of suggestions offered for a partial query
pub const SUGGESTION_LIMIT: usize = 3;

/// First [`SUGGESTION_LIMIT`] records whose name contains `partial`
///
/// Matching is a case-insensitive substring test. Matches come back in source
/// order, not alphabetically. A blank query yields no suggestions.
pub fn suggest<'a>(records: &'a [DoctorRecord], partial: &str) -> Vec<&'a DoctorRecord> {
    let needle = partial.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|doctor| name_matches(doctor, &needle))
        .take(SUGGESTION_LIMIT)
        .collect()
}
