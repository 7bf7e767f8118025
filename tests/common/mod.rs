//! Shared test utilities for integration tests

#![allow(dead_code)]

use blogmetrics::{parser, AggregationRow, AnalyticsConfig, Dataset};
use chrono::{DateTime, TimeZone, Utc};

/// Load a dataset fixture from the tests/test_data directory
pub fn load_fixture(name: &str) -> Dataset {
    let path = format!("tests/test_data/{}", name);
    parser::parse_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// The blog platform fixture shared by most tests
pub fn blog_dataset() -> Dataset {
    load_fixture("blog.yaml")
}

pub fn load_config(name: &str) -> AnalyticsConfig {
    let path = format!("tests/test_data/{}", name);
    AnalyticsConfig::from_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load config {}: {}", name, e))
}

/// The instant the fixture's range windows are measured from
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
}

/// Rows as `(x, y, z)` strings for compact assertions
pub fn triples(rows: &[AggregationRow]) -> Vec<(String, String, String)> {
    rows.iter()
        .map(|r| (r.x.clone(), r.y.to_string(), r.z.to_string()))
        .collect()
}

pub fn row(x: &str, y: impl ToString, z: impl ToString) -> (String, String, String) {
    (x.to_string(), y.to_string(), z.to_string())
}
