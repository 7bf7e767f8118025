//! Top-N rankings

mod common;

use blogmetrics::{top_n, Analytics, AnalyticsConfig, TopDimension, TopRequest, TOP_LIMIT};
use common::{blog_dataset, fixture_now, row, triples};
use serde_json::json;

fn request(top: &str, range: Option<&str>) -> TopRequest {
    TopRequest {
        top: Some(top.to_string()),
        range: range.map(str::to_string),
        filters: None,
    }
}

#[test]
fn test_top_users_all_time() {
    let ds = blog_dataset();
    let rows = top_n(&ds, TopDimension::User, None, None).unwrap();
    assert_eq!(
        triples(&rows),
        vec![
            row("bob", "Canada", 4),
            row("alice", "United States", 2),
            row("carol", "Germany", 2),
            row("dave", "United States", 2),
            row("erin", "Unknown", 1),
        ]
    );
}

#[test]
fn test_top_countries_all_time() {
    let ds = blog_dataset();
    let rows = top_n(&ds, TopDimension::Country, None, None).unwrap();
    assert_eq!(
        triples(&rows),
        vec![
            row("United States", 2, 5),
            row("Canada", 4, 4),
            row("Germany", 3, 3),
        ]
    );
}

#[test]
fn test_top_blogs_all_time() {
    let ds = blog_dataset();
    let rows = top_n(&ds, TopDimension::Blog, None, None).unwrap();
    assert_eq!(
        triples(&rows),
        vec![
            row("Rust Ownership Explained", "alice", 5),
            row("Async Rust in Practice", "bob", 3),
            row("Ownership in Practice", "alice", 3),
            row("Cooking with Cast Iron", "carol", 2),
            row("Winter Hiking Guide", "dave", 1),
        ]
    );
    assert!(rows.len() <= TOP_LIMIT);
}

#[test]
fn test_top_with_range_and_filter() {
    let ds = blog_dataset();
    let analytics = Analytics::new(&ds, AnalyticsConfig::default()).at(fixture_now());

    let rows = analytics.top(&request("blog", Some("week"))).unwrap();
    assert_eq!(
        triples(&rows),
        vec![
            row("Async Rust in Practice", "bob", 1),
            row("Cooking with Cast Iron", "carol", 1),
            row("Rust Ownership Explained", "alice", 1),
            row("Winter Hiking Guide", "dave", 1),
        ]
    );

    // Views of the two Rust posts; anonymous view 3 is not ranked
    let tree = json!({"field": "blog.title", "op": "contains", "value": "rust"});
    let rows = top_n(&ds, TopDimension::User, None, Some(&tree)).unwrap();
    assert_eq!(
        triples(&rows),
        vec![
            row("alice", "United States", 2),
            row("bob", "Canada", 2),
            row("dave", "United States", 2),
            row("carol", "Germany", 1),
        ]
    );
}

#[test]
fn test_top_parameter_errors() {
    let ds = blog_dataset();
    let analytics = Analytics::new(&ds, AnalyticsConfig::default()).at(fixture_now());

    let err = analytics.top(&TopRequest::default()).unwrap_err();
    assert_eq!(err.public_message(), "top parameter is required");

    let err = analytics.top(&request("post", None)).unwrap_err();
    assert_eq!(err.public_message(), r#"top must be "user", "country", or "blog""#);

    let err = analytics.top(&request("user", Some("day"))).unwrap_err();
    assert!(err.is_client_error());
}
