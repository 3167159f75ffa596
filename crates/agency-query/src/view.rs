//! Derived view: filter then stable sort

use crate::criteria::FilterCriteria;
use crate::predicate::{matches_filter, matches_search, normalize_search};
use crate::sort::compare;
use agency_model::Record;

/// Indices of the items in the derived view, in display order
///
/// Ties under the sort key keep fetch order.
pub fn derive_indices<T: Record>(items: &[T], criteria: &FilterCriteria) -> Vec<usize> {
    let needle = normalize_search(&criteria.search);
    let mut indices: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            matches_search(*item, &needle)
                && criteria
                    .filters
                    .iter()
                    .all(|(field, value)| matches_filter(*item, field, value))
        })
        .map(|(i, _)| i)
        .collect();
    // sort_by is stable, and indices start in fetch order
    indices.sort_by(|&a, &b| compare(&items[a], &items[b], criteria.sort));
    indices
}

/// Items in the derived view, in display order
pub fn derive_view<'a, T: Record>(items: &'a [T], criteria: &FilterCriteria) -> Vec<&'a T> {
    derive_indices(items, criteria)
        .into_iter()
        .map(|i| &items[i])
        .collect()
}
