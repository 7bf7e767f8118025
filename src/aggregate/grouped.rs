//! Views grouped by country or viewer

use std::collections::{HashMap, HashSet};
use tracing::debug;
use crate::dataset::{BlogView, Dataset, ViewQuery};
use crate::query::GroupDimension;
use super::error::AggregateError;
use super::row::AggregationRow;

#[derive(Debug, Default)]
struct GroupStats {
    blogs: HashSet<i64>,
    views: usize,
}

/// Count distinct blogs and views per group.
///
/// Views whose group key is null (no country, anonymous viewer) are
/// skipped. Rows are ordered by views descending, then key ascending.
pub fn grouped_counts(
    query: &ViewQuery<'_>,
    dimension: GroupDimension,
) -> Result<Vec<AggregationRow>, AggregateError> {
    let dataset = query.dataset();
    let mut groups: HashMap<String, GroupStats> = HashMap::new();

    for view in query.rows() {
        let Some(key) = group_key(dataset, view, dimension)? else {
            continue;
        };
        let stats = groups.entry(key).or_default();
        stats.blogs.insert(view.blog);
        stats.views += 1;
    }

    let mut ranked: Vec<(String, GroupStats)> = groups.into_iter().collect();
    ranked.sort_by(|(key_a, a), (key_b, b)| b.views.cmp(&a.views).then_with(|| key_a.cmp(key_b)));

    debug!(?dimension, groups = ranked.len(), "grouped view counts");
    Ok(ranked
        .into_iter()
        .map(|(key, stats)| AggregationRow::new(key, stats.blogs.len(), stats.views))
        .collect())
}

fn group_key(
    dataset: &Dataset,
    view: &BlogView,
    dimension: GroupDimension,
) -> Result<Option<String>, AggregateError> {
    match dimension {
        GroupDimension::Country => view
            .country
            .map(|id| country_name(dataset, id))
            .transpose(),
        GroupDimension::User => view
            .viewer
            .map(|id| {
                dataset
                    .user(id)
                    .map(|u| u.username.clone())
                    .ok_or(AggregateError::MissingRow { table: "users", id })
            })
            .transpose(),
    }
}

pub(crate) fn country_name(dataset: &Dataset, id: i64) -> Result<String, AggregateError> {
    dataset
        .country(id)
        .map(|c| c.name.clone())
        .ok_or(AggregateError::MissingRow { table: "countries", id })
}
