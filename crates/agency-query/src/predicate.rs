//! Search and exact-match predicates

use crate::criteria::{FilterCriteria, FilterValue};
use agency_model::Record;

/// Trim and case-fold a search string
#[must_use]
pub fn normalize_search(search: &str) -> String {
    search.trim().to_lowercase()
}

/// Free-text search predicate
///
/// `needle` must already be normalized with [`normalize_search`]. An empty
/// needle matches everything.
pub fn matches_search<T: Record + ?Sized>(item: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    item.searchable_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Exact-match predicate for one field
pub fn matches_filter<T: Record + ?Sized>(item: &T, field: &str, value: &FilterValue) -> bool {
    match value {
        FilterValue::All => true,
        FilterValue::Is(expected) => item.field_values(field).iter().any(|v| v == expected),
    }
}

/// Search AND every filter in the criteria
pub fn matches_all<T: Record + ?Sized>(item: &T, criteria: &FilterCriteria) -> bool {
    matches_search(item, &normalize_search(&criteria.search))
        && criteria
            .filters
            .iter()
            .all(|(field, value)| matches_filter(item, field, value))
}
