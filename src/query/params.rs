//! Enumerated request parameters

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grouping dimension of the blog-views endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupDimension {
    Country,
    User,
}

impl FromStr for GroupDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "country" => Ok(GroupDimension::Country),
            "user" => Ok(GroupDimension::User),
            _ => Err(r#"object_type must be "country" or "user""#.to_string()),
        }
    }
}

/// Ranking dimension of the top endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopDimension {
    User,
    Country,
    Blog,
}

impl FromStr for TopDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(TopDimension::User),
            "country" => Ok(TopDimension::Country),
            "blog" => Ok(TopDimension::Blog),
            _ => Err(r#"top must be "user", "country", or "blog""#.to_string()),
        }
    }
}

/// Bucket size of the performance series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            "year" => Ok(Granularity::Year),
            _ => Err("Invalid compare type".to_string()),
        }
    }
}

/// Trailing time window ending now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeWindow {
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// Last 365 days
    Year,
}

impl RangeWindow {
    pub fn days(&self) -> i64 {
        match self {
            RangeWindow::Week => 7,
            RangeWindow::Month => 30,
            RangeWindow::Year => 365,
        }
    }

    /// Inclusive `(start, end)` bounds of the window ending at `now`
    pub fn bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::days(self.days()), now)
    }
}

impl FromStr for RangeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(RangeWindow::Week),
            "month" => Ok(RangeWindow::Month),
            "year" => Ok(RangeWindow::Year),
            _ => Err(r#"range must be one of "month", "week", or "year"."#.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!("user".parse::<GroupDimension>(), Ok(GroupDimension::User));
        assert!("blog".parse::<GroupDimension>().is_err());
        assert_eq!("blog".parse::<TopDimension>(), Ok(TopDimension::Blog));
        assert_eq!(
            "Blog".parse::<TopDimension>().unwrap_err(),
            r#"top must be "user", "country", or "blog""#
        );
    }

    #[test]
    fn test_parse_granularity() {
        assert_eq!("week".parse::<Granularity>(), Ok(Granularity::Week));
        assert_eq!("hour".parse::<Granularity>().unwrap_err(), "Invalid compare type");
    }

    #[test]
    fn test_range_bounds() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let (start, end) = RangeWindow::Month.bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        assert_eq!(end, now);
        assert_eq!(RangeWindow::Year.days(), 365);
        assert!("day".parse::<RangeWindow>().is_err());
    }
}
