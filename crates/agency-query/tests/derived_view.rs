use agency_model::{Job, Record, Resource};
use agency_query::{derive_view, FilterCriteria, FilterValue, Pagination, SortKey};
use pretty_assertions::assert_eq;
use serde_json::json;

fn jobs() -> Vec<Job> {
    vec![
        Job::from_row(json!({
            "id": "7f1d8a52-0c4b-4f7e-9a11-2f3b4c5d6e01",
            "title": "Backend Engineer",
            "status": "open",
            "team": "Eng",
            "created_at": "2024-01-01"
        }))
        .unwrap(),
        Job::from_row(json!({
            "id": "7f1d8a52-0c4b-4f7e-9a11-2f3b4c5d6e02",
            "title": "Designer",
            "status": "closed",
            "team": "Design",
            "created_at": "2024-02-01"
        }))
        .unwrap(),
    ]
}

fn titles(view: &[&Job]) -> Vec<String> {
    view.iter().map(|j| j.title().to_string()).collect()
}

#[test]
fn status_filter_selects_open_jobs() {
    let items = jobs();
    let criteria = FilterCriteria::new().with_search("").with_filter("status", "open");
    assert_eq!(titles(&derive_view(&items, &criteria)), vec!["Backend Engineer"]);
}

#[test]
fn newest_first() {
    let items = jobs();
    let criteria = FilterCriteria::new().with_sort(SortKey::Newest);
    assert_eq!(
        titles(&derive_view(&items, &criteria)),
        vec!["Designer", "Backend Engineer"]
    );
}

#[test]
fn oldest_first() {
    let items = jobs();
    let criteria = FilterCriteria::new().with_sort(SortKey::Oldest);
    assert_eq!(
        titles(&derive_view(&items, &criteria)),
        vec!["Backend Engineer", "Designer"]
    );
}

#[test]
fn search_is_case_insensitive_and_trimmed() {
    let items = jobs();
    let criteria = FilterCriteria::new().with_search("  ENGINEER ");
    assert_eq!(titles(&derive_view(&items, &criteria)), vec!["Backend Engineer"]);

    // team is a searchable field too
    let criteria = FilterCriteria::new().with_search("design");
    assert_eq!(titles(&derive_view(&items, &criteria)), vec!["Designer"]);
}

#[test]
fn filters_combine_with_and() {
    let items = jobs();
    let criteria = FilterCriteria::new()
        .with_filter("status", "open")
        .with_filter("team", "Design");
    assert!(derive_view(&items, &criteria).is_empty());

    let criteria = FilterCriteria::new()
        .with_filter("status", FilterValue::All)
        .with_filter("team", "Design");
    assert_eq!(titles(&derive_view(&items, &criteria)), vec!["Designer"]);
}

#[test]
fn missing_timestamp_sorts_as_oldest() {
    let mut items = jobs();
    items.push(
        Job::from_row(json!({
            "id": "7f1d8a52-0c4b-4f7e-9a11-2f3b4c5d6e03",
            "title": "Intern",
            "status": "open"
        }))
        .unwrap(),
    );

    let newest = derive_view(&items, &FilterCriteria::new().with_sort(SortKey::Newest));
    assert_eq!(titles(&newest), vec!["Designer", "Backend Engineer", "Intern"]);

    let oldest = derive_view(&items, &FilterCriteria::new().with_sort(SortKey::Oldest));
    assert_eq!(titles(&oldest), vec!["Intern", "Backend Engineer", "Designer"]);
}

#[test]
fn ties_keep_fetch_order() {
    let items: Vec<Job> = ["c", "a", "b"]
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Job::from_row(json!({
                "id": format!("7f1d8a52-0c4b-4f7e-9a11-2f3b4c5d6f0{i}"),
                "title": t,
                "created_at": "2024-05-05"
            }))
            .unwrap()
        })
        .collect();

    let view = derive_view(&items, &FilterCriteria::new().with_sort(SortKey::Newest));
    assert_eq!(titles(&view), vec!["c", "a", "b"]);
}

#[test]
fn pagination_slices_after_sorting() {
    let items: Vec<Job> = (1..=7)
        .map(|i| {
            Job::from_row(json!({
                "id": format!("7f1d8a52-0c4b-4f7e-9a11-2f3b4c5d6a{i:02}"),
                "title": format!("Role {i}"),
                "created_at": format!("2024-03-{i:02}")
            }))
            .unwrap()
        })
        .collect();

    let view = derive_view(&items, &FilterCriteria::new().with_sort(SortKey::Oldest));
    let page = Pagination::new(3, 3).unwrap();
    assert_eq!(titles(page.slice(&view)), vec!["Role 7"]);
    assert_eq!(page.bounds(view.len()).page_count, 3);
}
