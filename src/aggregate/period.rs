//! Period truncation and labelling

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use crate::query::Granularity;
use super::error::AggregateError;

/// Round a timestamp down to the first day of its period.
///
/// Weeks start on Monday.
pub fn truncate(ts: DateTime<Utc>, granularity: Granularity) -> Result<NaiveDate, AggregateError> {
    let date = ts.date_naive();
    let start = match granularity {
        Granularity::Day => Some(date),
        Granularity::Week => {
            date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
        }
        Granularity::Month => date.with_day(1),
        Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
    };
    start.ok_or(AggregateError::Period { date, granularity })
}

/// Start of the calendar period immediately before `period`
pub fn previous_period(period: NaiveDate, granularity: Granularity) -> Result<NaiveDate, AggregateError> {
    let previous = match granularity {
        Granularity::Day => period.checked_sub_days(Days::new(1)),
        Granularity::Week => period.checked_sub_days(Days::new(7)),
        Granularity::Month => period.checked_sub_months(Months::new(1)),
        Granularity::Year => period.checked_sub_months(Months::new(12)),
    };
    previous.ok_or(AggregateError::Period { date: period, granularity })
}

/// Render a period start: `YYYY-MM-DD`, `YYYY-WNN` (ISO week), `YYYY-MM` or `YYYY`
pub fn format_period(period: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => period.format("%Y-%m-%d").to_string(),
        Granularity::Week => period.format("%G-W%V").to_string(),
        Granularity::Month => period.format("%Y-%m").to_string(),
        Granularity::Year => period.format("%Y").to_string(),
    }
}

/// Label for a performance row, e.g. `2024-01 (15 blogs)`
pub fn format_period_label(period: NaiveDate, granularity: Granularity, blog_count: u64) -> String {
    let noun = if blog_count == 1 { "blog" } else { "blogs" };
    format!("{} ({} {})", format_period(period, granularity), blog_count, noun)
}
