//! Time-bucketed performance series

use std::collections::{BTreeMap, BTreeSet};
use chrono::NaiveDate;
use tracing::debug;
use crate::dataset::{Blog, ViewQuery};
use crate::query::Granularity;
use super::error::AggregateError;
use super::growth::{calculate_growth_percentage, GrowthBaseline};
use super::period::{format_period_label, previous_period, truncate};
use super::row::AggregationRow;

/// Views and blog creations per period, with growth of views.
///
/// Views are bucketed by `viewed_at`, blogs by their own `created_at`.
/// The series covers every period that has either, in ascending order.
pub fn performance_series<'b>(
    views: &ViewQuery<'_>,
    blogs: impl IntoIterator<Item = &'b Blog>,
    granularity: Granularity,
    baseline: GrowthBaseline,
) -> Result<Vec<AggregationRow>, AggregateError> {
    let mut view_counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for view in views.rows() {
        *view_counts.entry(truncate(view.viewed_at, granularity)?).or_insert(0) += 1;
    }

    let mut blog_counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for blog in blogs {
        *blog_counts.entry(truncate(blog.created_at, granularity)?).or_insert(0) += 1;
    }

    let periods: BTreeSet<NaiveDate> = view_counts
        .keys()
        .chain(blog_counts.keys())
        .copied()
        .collect();

    let mut rows = Vec::with_capacity(periods.len());
    let mut previous_views = 0;

    for period in periods {
        let current = view_counts.get(&period).copied().unwrap_or(0);
        let created = blog_counts.get(&period).copied().unwrap_or(0);

        let reference = match baseline {
            GrowthBaseline::Sequential => previous_views,
            GrowthBaseline::Calendar => view_counts
                .get(&previous_period(period, granularity)?)
                .copied()
                .unwrap_or(0),
        };

        rows.push(AggregationRow::new(
            format_period_label(period, granularity, created),
            i64::try_from(current).unwrap_or(i64::MAX),
            calculate_growth_percentage(current, reference),
        ));
        previous_views = current;
    }

    debug!(%granularity, ?baseline, periods = rows.len(), "built performance series");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Cell;
    use crate::dataset::{Entity, Lookup, RowFilter, Value};
    use crate::parser::parse_str;

    // January: 2 views, 1 blog. February: nothing. March: 4 views, 2 blogs.
    const DATA: &str = r#"
users:
  - { id: 1, username: mo, created_at: "2023-12-01T00:00:00Z" }
blogs:
  - { id: 1, title: One, author: 1, created_at: "2024-01-05T00:00:00Z" }
  - { id: 2, title: Two, author: 1, created_at: "2024-03-02T00:00:00Z" }
  - { id: 3, title: Three, author: 1, created_at: "2024-03-20T00:00:00Z" }
views:
  - { id: 1, blog: 1, viewed_at: "2024-01-06T00:00:00Z" }
  - { id: 2, blog: 1, viewed_at: "2024-01-31T23:59:59Z" }
  - { id: 3, blog: 1, viewed_at: "2024-03-01T00:00:00Z" }
  - { id: 4, blog: 2, viewed_at: "2024-03-03T00:00:00Z" }
  - { id: 5, blog: 2, viewed_at: "2024-03-04T00:00:00Z" }
  - { id: 6, blog: 3, viewed_at: "2024-03-21T00:00:00Z" }
"#;

    #[test]
    fn test_monthly_sequential_growth() {
        let ds = parse_str(DATA).unwrap();
        let rows = performance_series(&ds.views(), ds.blogs(), Granularity::Month, GrowthBaseline::Sequential)
            .unwrap();
        assert_eq!(
            rows,
            vec![
                AggregationRow::new("2024-01 (1 blog)", 2i64, "+100.0%"),
                AggregationRow::new("2024-03 (2 blogs)", 4i64, "+100.0%"),
            ]
        );
    }

    #[test]
    fn test_calendar_baseline_ignores_gap_row() {
        let ds = parse_str(DATA).unwrap();
        let rows = performance_series(&ds.views(), ds.blogs(), Granularity::Month, GrowthBaseline::Calendar)
            .unwrap();
        // February had no views, so March compares against zero
        assert_eq!(rows[1].z, Cell::Text("+100.0%".into()));

        let rows = performance_series(&ds.views(), ds.blogs(), Granularity::Year, GrowthBaseline::Calendar)
            .unwrap();
        assert_eq!(rows, vec![AggregationRow::new("2024 (3 blogs)", 6i64, "+100.0%")]);
    }

    #[test]
    fn test_period_with_blogs_but_no_views() {
        let ds = parse_str(DATA).unwrap();
        let only_march = ds.views().filter(RowFilter::Match {
            field: Entity::View.resolve_path("blog.id").unwrap(),
            lookup: Lookup::In(vec![Value::Int(2)]),
        });
        let rows = performance_series(&only_march, ds.blogs(), Granularity::Month, GrowthBaseline::Sequential)
            .unwrap();
        assert_eq!(
            rows,
            vec![
                AggregationRow::new("2024-01 (1 blog)", 0i64, "0.0%"),
                AggregationRow::new("2024-03 (2 blogs)", 2i64, "+100.0%"),
            ]
        );
    }

    #[test]
    fn test_weekly_series() {
        let ds = parse_str(DATA).unwrap();
        let rows = performance_series(&ds.views(), Vec::new(), Granularity::Week, GrowthBaseline::Sequential)
            .unwrap();
        let labels: Vec<&str> = rows.iter().map(|r| r.x.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "2024-W01 (0 blogs)",
                "2024-W05 (0 blogs)",
                "2024-W09 (0 blogs)",
                "2024-W10 (0 blogs)",
                "2024-W12 (0 blogs)",
            ]
        );
        let growth: Vec<String> = rows.iter().map(|r| r.z.to_string()).collect();
        assert_eq!(growth, vec!["+100.0%", "+0.0%", "+100.0%", "-50.0%", "+0.0%"]);
    }
}
