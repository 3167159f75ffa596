use agency_model::{Job, Record};
use agency_query::{compare, derive_view, FilterCriteria, FilterValue, SortKey};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use std::collections::BTreeSet;
use uuid::Uuid;

fn arb_job() -> impl Strategy<Value = Job> {
    (
        "[A-Za-z ]{1,12}",
        prop_oneof![Just("Eng"), Just("Design"), Just("Sales")],
        any::<bool>(),
        proptest::option::of(0i64..2_000_000_000),
    )
        .prop_map(|(title, team, open, ts)| {
            serde_json::from_value(serde_json::json!({
                "id": Uuid::new_v4(),
                "title": title,
                "team": team,
                "status": if open { "open" } else { "closed" },
                "created_at": ts.map(|s| Utc.timestamp_opt(s, 0).unwrap().to_rfc3339()),
            }))
            .unwrap()
        })
}

fn arb_sort() -> impl Strategy<Value = SortKey> {
    prop_oneof![Just(SortKey::Newest), Just(SortKey::Oldest), Just(SortKey::Title)]
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop_oneof![Just(""), Just("e"), Just("DES"), Just("zz")],
        prop_oneof![Just("all"), Just("open"), Just("closed")],
        prop_oneof![Just("all"), Just("Eng"), Just("Design")],
        arb_sort(),
    )
        .prop_map(|(search, status, team, sort)| {
            FilterCriteria::new()
                .with_search(search)
                .with_filter("status", status)
                .with_filter("team", team)
                .with_sort(sort)
        })
}

fn ids(view: &[&Job]) -> Vec<Uuid> {
    view.iter().map(|j| j.id()).collect()
}

proptest! {
    #[test]
    fn prop_unconstrained_view_is_full_sorted_set(
        items in proptest::collection::vec(arb_job(), 0..20),
        sort in arb_sort()
    ) {
        let criteria = FilterCriteria::new()
            .with_filter("status", FilterValue::All)
            .with_filter("team", FilterValue::All)
            .with_sort(sort);
        let view = derive_view(&items, &criteria);

        let mut expected: Vec<&Job> = items.iter().collect();
        expected.sort_by(|a, b| compare(*a, *b, sort));
        prop_assert_eq!(ids(&view), ids(&expected));
    }

    #[test]
    fn prop_sort_key_never_changes_membership(
        items in proptest::collection::vec(arb_job(), 0..20),
        criteria in arb_criteria(),
        other in arb_sort()
    ) {
        let a: BTreeSet<Uuid> = ids(&derive_view(&items, &criteria)).into_iter().collect();
        let b: BTreeSet<Uuid> =
            ids(&derive_view(&items, &criteria.clone().with_sort(other))).into_iter().collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_view_is_sorted(
        items in proptest::collection::vec(arb_job(), 0..20),
        criteria in arb_criteria()
    ) {
        let view = derive_view(&items, &criteria);
        for pair in view.windows(2) {
            prop_assert_ne!(compare(pair[0], pair[1], criteria.sort), std::cmp::Ordering::Greater);
        }
    }
}
