//! Extraction algorithm behavior shared by both strategies

use adaptive_scrape::{ScrapeError, SelectorMap, extract, validate_selectors};
use proptest::prelude::*;

mod common;

use common::{create_listing_html, create_test_html};

#[test]
fn test_container_scopes_produce_one_record_each() {
    let selectors =
        validate_selectors(r#"{"container": ".item", "title": "h2", "price": ".price"}"#).unwrap();
    let records = extract(&create_listing_html(3), &selectors).unwrap();

    assert_eq!(records.len(), 3);
    for (i, record) in records.iter().enumerate() {
        let n = i + 1;
        assert_eq!(record.value("title"), Some(format!("Product {n}").as_str()));
        assert_eq!(record.value("price"), Some(format!("${n}.99").as_str()));
    }
}

#[test]
fn test_no_container_extracts_whole_document_once() {
    let selectors = validate_selectors(r#"{"title": "h1"}"#).unwrap();
    let html = create_test_html("Doc", "<h1>Hello World</h1><p>body</p>");

    let records = extract(&html, &selectors).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value("title"), Some("Hello World"));
}

#[test]
fn test_container_without_fields_yields_nothing() {
    let selectors = validate_selectors(r#"{"container": ".missing"}"#).unwrap();
    let records = extract(&create_listing_html(5), &selectors).unwrap();
    assert!(records.is_empty());

    let selectors = validate_selectors(r#"{"container": ".item"}"#).unwrap();
    assert!(extract(&create_listing_html(5), &selectors).unwrap().is_empty());
}

#[test]
fn test_unmatched_container_falls_back_to_document() {
    let selectors = validate_selectors(r#"{"container": ".card", "title": "h2"}"#).unwrap();
    let records = extract(&create_listing_html(2), &selectors).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value("title"), Some("Product 1"));
}

#[test]
fn test_trimmed_text_and_null_for_absence() {
    let selectors = validate_selectors(r#"{"title": "h1", "subtitle": "h3", "empty": "i"}"#).unwrap();
    let html = create_test_html("T", "<h1>\n   Spaced Out   \n</h1><i>   </i>");

    let records = extract(&html, &selectors).unwrap();
    let record = &records[0];
    assert_eq!(record.get("title"), Some(Some("Spaced Out")));
    assert_eq!(record.get("subtitle"), Some(None));
    assert_eq!(record.get("empty"), Some(Some("")));
    assert_eq!(record.get("not-a-field"), None);
}

#[test]
fn test_first_match_wins_and_nested_text_is_joined() {
    let selectors = validate_selectors(r#"{"title": "h2"}"#).unwrap();
    let html = create_test_html("T", "<h2>First <b>bold</b> part</h2><h2>Second</h2>");

    let records = extract(&html, &selectors).unwrap();
    assert_eq!(records[0].value("title"), Some("First bold part"));
}

#[test]
fn test_all_null_record_is_still_emitted() {
    let selectors = validate_selectors(r#"{"container": ".item", "missing": ".nope"}"#).unwrap();
    let records = extract(&create_listing_html(2), &selectors).unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.is_all_null()));
}

#[test]
fn test_record_field_order_follows_selectors() {
    let selectors =
        validate_selectors(r#"{"price": ".price", "container": ".item", "title": "h2"}"#).unwrap();
    let records = extract(&create_listing_html(1), &selectors).unwrap();

    assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["price", "title"]);
    assert_eq!(
        serde_json::to_string(&records[0]).unwrap(),
        r#"{"price":"$1.99","title":"Product 1"}"#
    );
}

#[test]
fn test_null_serializes_as_json_null() {
    let selectors = validate_selectors(r#"{"title": "h9"}"#).unwrap();
    let records = extract("<p>nothing</p>", &selectors).unwrap();
    assert_eq!(serde_json::to_string(&records).unwrap(), r#"[{"title":null}]"#);
}

#[test]
fn test_invalid_container_selector_is_extraction_error() {
    let selectors = SelectorMap::from_pairs([("container", "div[[["), ("title", "h2")]);
    let err = extract("<div></div>", &selectors).unwrap_err();
    assert!(matches!(err, ScrapeError::Extraction(_)), "got {err:?}");
    assert!(err.to_string().contains("div[[["));
}

#[test]
fn test_malformed_markup_is_tolerated() {
    let selectors = validate_selectors(r#"{"container": "li", "text": "span"}"#).unwrap();
    let html = "<ul><li><span>one<li><span>two</ul>";

    let records = extract(html, &selectors).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].value("text"), Some("one"));
    assert_eq!(records[1].value("text"), Some("two"));
}

fn field_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_filter("reserved key", |name| name != "container")
}

proptest! {
    #[test]
    fn prop_records_have_exactly_the_data_fields(
        names in proptest::collection::vec(field_name(), 1..6),
        items in 0usize..8,
    ) {
        let mut pairs = vec![("container".to_string(), ".item".to_string())];
        pairs.extend(names.iter().map(|n| (n.clone(), "h2".to_string())));
        let selectors = SelectorMap::from_pairs(pairs);

        let records = extract(&create_listing_html(items), &selectors).unwrap();
        let expected: Vec<&str> = selectors.field_names().collect();

        for record in &records {
            prop_assert_eq!(record.keys().collect::<Vec<_>>(), expected.clone());
        }
    }

    #[test]
    fn prop_record_count_matches_container_count(items in 1usize..20) {
        let selectors = validate_selectors(r#"{"container": ".item", "title": "h2"}"#).unwrap();
        let records = extract(&create_listing_html(items), &selectors).unwrap();
        prop_assert_eq!(records.len(), items);
    }

    #[test]
    fn prop_zero_container_matches_gives_one_record(items in 0usize..5) {
        let selectors = validate_selectors(r#"{"container": ".absent", "title": "h2"}"#).unwrap();
        let records = extract(&create_listing_html(items), &selectors).unwrap();
        prop_assert_eq!(records.len(), 1);
    }
}
