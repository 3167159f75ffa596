//! Sort keys and comparators

use crate::error::QueryError;
use agency_model::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Fixed enumeration of list orderings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recent first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
    /// Alphabetical by title
    Title,
}

impl SortKey {
    /// Every key, in menu order
    pub const ALL: [SortKey; 3] = [Self::Newest, Self::Oldest, Self::Title];

    /// Wire form
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" | "latest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "title" | "name" | "alphabetical" => Ok(Self::Title),
            _ => Err(QueryError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Compare two titles the way a reader expects
///
/// Primary comparison ignores case on the Unicode lowercase form, so
/// `"apple" < "Banana" < "cherry"`. Titles equal up to case fall back to the
/// raw strings to keep the order total.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary.then_with(|| a.cmp(b))
}

/// Compare two items under a sort key
///
/// Missing timestamps sort as the oldest possible value.
pub fn compare<T: Record + ?Sized>(a: &T, b: &T, key: SortKey) -> Ordering {
    match key {
        // None < Some, so a missing timestamp is always the oldest
        SortKey::Newest => b.created_at().cmp(&a.created_at()),
        SortKey::Oldest => a.created_at().cmp(&b.created_at()),
        SortKey::Title => collate(a.title(), b.title()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collation_ignores_case_first() {
        let mut titles = vec!["cherry", "Banana", "apple", "banana"];
        titles.sort_by(|a, b| collate(a, b));
        assert_eq!(titles, vec!["apple", "Banana", "banana", "cherry"]);
    }

    #[test]
    fn collation_handles_non_ascii() {
        assert_eq!(collate("Éclair", "éclair"), Ordering::Less);
        assert_eq!(collate("Über", "über"), Ordering::Less);
    }

    #[test]
    fn sort_key_parsing() {
        assert_eq!("Newest".parse::<SortKey>().unwrap(), SortKey::Newest);
        assert_eq!("name".parse::<SortKey>().unwrap(), SortKey::Title);
        assert!(matches!(
            "popular".parse::<SortKey>(),
            Err(QueryError::UnknownSortKey(_))
        ));
    }
}
