//! URL slugs for posts, services and projects

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NON_SLUG: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new("[^a-z0-9]+").unwrap()
});

const FALLBACK_SLUG: &str = "untitled";

/// Derive a slug from a title
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single dash and trims dashes at both ends. A title with nothing
/// sluggable becomes `untitled`.
#[must_use]
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let dashed = NON_SLUG.replace_all(&lowered, "-");
    let slug = dashed.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Derive a slug not already taken
///
/// Tries the plain slug first, then `slug-2`, `slug-3`, and so on.
#[must_use]
pub fn unique_slug<I, S>(title: &str, existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let taken: HashSet<String> = existing
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    let base = slugify(title);
    if !taken.contains(&base) {
        return base;
    }
    (2u32..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("  Hello, World!  "), "hello-world");
        assert_eq!(slugify("SEO & Content -- 2024"), "seo-content-2024");
    }

    #[test]
    fn slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café Münster"), "caf-m-nster");
    }

    #[test]
    fn slugify_empty_title() {
        assert_eq!(slugify("!!!"), "untitled");
        assert_eq!(slugify(""), "untitled");
    }

    #[test]
    fn unique_slug_appends_counter() {
        let existing = ["brand-refresh", "brand-refresh-2"];
        assert_eq!(unique_slug("Brand Refresh", existing), "brand-refresh-3");
        assert_eq!(unique_slug("New Post", existing), "new-post");
    }
}
