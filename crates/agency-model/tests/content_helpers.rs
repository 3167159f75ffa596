use agency_model::{reading_time, slugify, unique_slug, word_count};
use proptest::prelude::*;

fn is_well_formed(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[test]
fn slug_of_slug_is_stable() {
    let once = slugify("Designing for Humans: Part 2");
    assert_eq!(once, "designing-for-humans-part-2");
    assert_eq!(slugify(&once), once);
}

#[test]
fn reading_time_matches_word_count() {
    let body = format!("# Heading\n\n{}", "lorem ipsum ".repeat(150));
    assert_eq!(word_count(&body), 301);
    assert_eq!(reading_time(&body), 2);
}

proptest! {
    #[test]
    fn prop_slugs_are_well_formed(title in ".{0,64}") {
        let slug = slugify(&title);
        prop_assert!(is_well_formed(&slug), "bad slug {:?} from {:?}", slug, title);
    }

    #[test]
    fn prop_unique_slug_avoids_existing(
        title in "[A-Za-z ]{1,20}",
        taken in proptest::collection::vec(0u32..6, 0..6)
    ) {
        let base = slugify(&title);
        let existing: Vec<String> = taken
            .iter()
            .map(|n| if *n < 2 { base.clone() } else { format!("{base}-{n}") })
            .collect();
        let slug = unique_slug(&title, &existing);
        prop_assert!(!existing.contains(&slug));
        prop_assert!(slug.starts_with(&base));
    }
}
