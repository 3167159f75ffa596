//! Filter criteria value object

use crate::error::QueryError;
use crate::sort::SortKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sentinel accepted on the wire for "no filter"
const ALL_SENTINEL: &str = "all";

/// Value of one exact-match filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterValue {
    /// Matches every item
    #[default]
    All,
    /// Matches items whose field equals the value
    Is(String),
}

impl FilterValue {
    /// Filter on a concrete value
    #[inline]
    #[must_use]
    pub fn is(value: impl Into<String>) -> Self {
        Self::Is(value.into())
    }

    /// Check if this is the `All` sentinel
    #[inline]
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<&str> for FilterValue {
    /// `"all"` (any case) maps to the sentinel
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case(ALL_SENTINEL) {
            Self::All
        } else {
            Self::Is(value.to_string())
        }
    }
}

/// User-supplied list criteria
///
/// Lives for one screen visit. Filters keep insertion order so a screen can
/// render its filter chips in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text search
    #[serde(default)]
    pub search: String,
    /// Exact-match filters by field name
    #[serde(default)]
    pub filters: IndexMap<String, FilterValue>,
    /// Ordering
    #[serde(default)]
    pub sort: SortKey,
}

impl FilterCriteria {
    /// Empty criteria: no search, no filters, newest first
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With search string
    #[inline]
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// With exact-match filter
    #[inline]
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// With sort key
    #[inline]
    #[must_use]
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Filters that actually constrain the view
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().filter_map(|(field, value)| match value {
            FilterValue::All => None,
            FilterValue::Is(v) => Some((field.as_str(), v.as_str())),
        })
    }

    /// Add a filter parsed from `field=value`
    ///
    /// # Errors
    /// Returns `QueryError::InvalidFilter` if there is no `=` or the field is empty
    pub fn push_filter_expr(&mut self, expr: &str) -> Result<(), QueryError> {
        let (field, value) = expr
            .split_once('=')
            .ok_or_else(|| QueryError::InvalidFilter(expr.to_string()))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(QueryError::InvalidFilter(expr.to_string()));
        }
        self.filters
            .insert(field.to_string(), FilterValue::from(value.trim()));
        Ok(())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::from(value.as_str())
    }
}

impl FromStr for FilterCriteria {
    type Err = QueryError;

    /// Parse `field=value` pairs separated by `&`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut criteria = Self::new();
        for expr in s.split('&').filter(|e| !e.trim().is_empty()) {
            criteria.push_filter_expr(expr)?;
        }
        Ok(criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sentinel_is_case_insensitive() {
        assert_eq!(FilterValue::from("ALL"), FilterValue::All);
        assert_eq!(FilterValue::from("open"), FilterValue::is("open"));
    }

    #[test]
    fn active_filters_skip_all() {
        let criteria = FilterCriteria::new()
            .with_filter("status", "open")
            .with_filter("team", FilterValue::All);
        let active: Vec<_> = criteria.active_filters().collect();
        assert_eq!(active, vec![("status", "open")]);
    }

    #[test]
    fn filter_expr_parsing() {
        let criteria: FilterCriteria = "status=open&team=Eng".parse().unwrap();
        assert_eq!(criteria.filters.len(), 2);
        assert_eq!(criteria.filters["team"], FilterValue::is("Eng"));

        let mut criteria = FilterCriteria::new();
        assert!(criteria.push_filter_expr("status").is_err());
        assert!(criteria.push_filter_expr("=open").is_err());
    }

    #[test]
    fn later_filter_replaces_earlier() {
        let criteria = FilterCriteria::new()
            .with_filter("status", "open")
            .with_filter("status", "closed");
        assert_eq!(criteria.filters.len(), 1);
        assert_eq!(criteria.filters["status"], FilterValue::is("closed"));
    }
}
