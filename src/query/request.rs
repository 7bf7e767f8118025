use serde::Deserialize;
use serde_json::Value;
use crate::error::{AnalyticsError, AnalyticsResult};
use super::params::{Granularity, GroupDimension, RangeWindow, TopDimension};

/// Decode the `filters` parameter.
///
/// A missing or blank string means no filter.
pub fn load_filters(raw: Option<&str>) -> AnalyticsResult<Option<Value>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => serde_json::from_str(text)
            .map(Some)
            .map_err(|_| AnalyticsError::invalid_parameter("Invalid JSON in filters parameter")),
    }
}

fn required<'a>(value: &'a Option<String>, message: &str) -> AnalyticsResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AnalyticsError::invalid_parameter(message)),
    }
}

fn parse_param<T>(value: &str) -> AnalyticsResult<T>
where
    T: std::str::FromStr<Err = String>,
{
    value.parse().map_err(AnalyticsError::InvalidParameter)
}

/// Views grouped by country or user over a trailing window
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogViewsRequest {
    pub object_type: Option<String>,
    pub range: Option<String>,
    /// JSON-encoded filter tree
    pub filters: Option<String>,
}

impl BlogViewsRequest {
    pub fn dimension(&self) -> AnalyticsResult<GroupDimension> {
        parse_param(required(&self.object_type, "object_type is required")?)
    }

    pub fn window(&self) -> AnalyticsResult<RangeWindow> {
        parse_param(required(&self.range, "range parameter is required")?)
    }

    pub fn filters(&self) -> AnalyticsResult<Option<Value>> {
        load_filters(self.filters.as_deref())
    }
}

/// Top ten users, countries or blogs, optionally within a window
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopRequest {
    pub top: Option<String>,
    pub range: Option<String>,
    pub filters: Option<String>,
}

impl TopRequest {
    pub fn dimension(&self) -> AnalyticsResult<TopDimension> {
        parse_param(required(&self.top, "top parameter is required")?)
    }

    /// `None` when no range was given; all time is counted
    pub fn window(&self) -> AnalyticsResult<Option<RangeWindow>> {
        match self.range.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(range) => parse_param(range).map(Some),
        }
    }

    pub fn filters(&self) -> AnalyticsResult<Option<Value>> {
        load_filters(self.filters.as_deref())
    }
}

/// Views per period, optionally for one author's blogs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PerformanceRequest {
    pub compare: Option<String>,
    pub user_id: Option<String>,
    pub filters: Option<String>,
}

impl PerformanceRequest {
    pub fn granularity(&self) -> AnalyticsResult<Granularity> {
        parse_param(required(&self.compare, "compare is required")?)
    }

    pub fn author_id(&self) -> AnalyticsResult<Option<i64>> {
        match self.user_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(id) => id
                .parse()
                .map(Some)
                .map_err(|_| AnalyticsError::invalid_parameter("user_id must be an integer")),
        }
    }

    pub fn filters(&self) -> AnalyticsResult<Option<Value>> {
        load_filters(self.filters.as_deref())
    }
}
