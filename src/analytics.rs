//! Request-level entry points
//!
//! Each call builds its own [`ViewQuery`], pushes the dynamic filter onto it
//! and hands the result to the aggregation layer.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};
use crate::aggregate::{self, AggregationRow, GrowthBaseline};
use crate::config::AnalyticsConfig;
use crate::dataset::{Dataset, ViewQuery};
use crate::error::AnalyticsResult;
use crate::filter::apply_filters;
use crate::query::{
    BlogViewsRequest, Granularity, GroupDimension, PerformanceRequest, TopDimension, TopRequest,
};

/// Views grouped by country or viewer within `[start, end]`
pub fn grouped_counts(
    dataset: &Dataset,
    dimension: GroupDimension,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    filters: Option<&Value>,
) -> AnalyticsResult<Vec<AggregationRow>> {
    let query = apply_filters(dataset.views().viewed_between(start, end), filters)?;
    let rows = aggregate::grouped_counts(&query, dimension)?;
    info!(?dimension, %start, %end, rows = rows.len(), "grouped counts");
    Ok(rows)
}

/// Up to ten users, countries or blogs ranked by views
pub fn top_n(
    dataset: &Dataset,
    dimension: TopDimension,
    window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    filters: Option<&Value>,
) -> AnalyticsResult<Vec<AggregationRow>> {
    let mut query = dataset.views();
    if let Some((start, end)) = window {
        query = query.viewed_between(start, end);
    }
    let query = apply_filters(query, filters)?;
    let rows = aggregate::top_n(&query, dimension)?;
    info!(?dimension, windowed = window.is_some(), rows = rows.len(), "top ranking");
    Ok(rows)
}

/// Views and blog creations per period.
///
/// `author_id` narrows both views and blogs; the filter applies to views only.
pub fn performance_series(
    dataset: &Dataset,
    granularity: Granularity,
    author_id: Option<i64>,
    filters: Option<&Value>,
    baseline: GrowthBaseline,
) -> AnalyticsResult<Vec<AggregationRow>> {
    let mut query: ViewQuery<'_> = dataset.views();
    if let Some(author) = author_id {
        query = query.authored_by(author);
    }
    let query = apply_filters(query, filters)?;

    let blogs = dataset
        .blogs()
        .iter()
        .filter(|blog| author_id.map_or(true, |author| blog.author == author));

    let rows = aggregate::performance_series(&query, blogs, granularity, baseline)?;
    info!(%granularity, ?author_id, rows = rows.len(), "performance series");
    Ok(rows)
}

/// Validates raw requests and runs them against one dataset
#[derive(Debug)]
pub struct Analytics<'a> {
    dataset: &'a Dataset,
    config: AnalyticsConfig,
    now: DateTime<Utc>,
}

impl<'a> Analytics<'a> {
    pub fn new(dataset: &'a Dataset, config: AnalyticsConfig) -> Self {
        Self {
            dataset,
            config,
            now: Utc::now(),
        }
    }

    /// Pin the clock that range windows are measured from
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn blog_views(&self, request: &BlogViewsRequest) -> AnalyticsResult<Vec<AggregationRow>> {
        let dimension = request.dimension()?;
        let (start, end) = request.window()?.bounds(self.now);
        let filters = request.filters()?;
        debug!(?request, "blog views request");
        grouped_counts(self.dataset, dimension, start, end, filters.as_ref())
    }

    pub fn top(&self, request: &TopRequest) -> AnalyticsResult<Vec<AggregationRow>> {
        let dimension = request.dimension()?;
        let window = request.window()?.map(|range| range.bounds(self.now));
        let filters = request.filters()?;
        debug!(?request, "top request");
        top_n(self.dataset, dimension, window, filters.as_ref())
    }

    pub fn performance(&self, request: &PerformanceRequest) -> AnalyticsResult<Vec<AggregationRow>> {
        let granularity = request.granularity()?;
        let author_id = request.author_id()?;
        let filters = request.filters()?;
        debug!(?request, "performance request");
        performance_series(
            self.dataset,
            granularity,
            author_id,
            filters.as_ref(),
            self.config.growth_baseline,
        )
    }
}
