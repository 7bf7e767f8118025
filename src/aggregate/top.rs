//! Top-N rankings

use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::debug;
use crate::dataset::{BlogView, ViewQuery};
use crate::query::{GroupDimension, TopDimension};
use super::error::AggregateError;
use super::grouped::{country_name, grouped_counts};
use super::row::AggregationRow;

/// Maximum number of rows a ranking returns
pub const TOP_LIMIT: usize = 10;

/// Rank users, countries or blogs by view count.
///
/// - `user`: username, viewer's country name (`"Unknown"` if unset), views
/// - `country`: country name, distinct blogs, views
/// - `blog`: blog title, author username, views
pub fn top_n(query: &ViewQuery<'_>, dimension: TopDimension) -> Result<Vec<AggregationRow>, AggregateError> {
    let mut rows = match dimension {
        TopDimension::Country => grouped_counts(query, GroupDimension::Country)?,
        TopDimension::User => rank_users(query)?,
        TopDimension::Blog => rank_blogs(query)?,
    };
    rows.truncate(TOP_LIMIT);
    debug!(?dimension, rows = rows.len(), "ranked top performers");
    Ok(rows)
}

fn count_by<F>(query: &ViewQuery<'_>, key: F) -> HashMap<i64, usize>
where
    F: Fn(&BlogView) -> Option<i64>,
{
    let mut counts = HashMap::new();
    for view in query.rows() {
        if let Some(k) = key(view) {
            *counts.entry(k).or_insert(0) += 1;
        }
    }
    counts
}

fn rank_users(query: &ViewQuery<'_>) -> Result<Vec<AggregationRow>, AggregateError> {
    let dataset = query.dataset();
    let mut ranked = Vec::new();

    for (id, views) in count_by(query, |v| v.viewer) {
        let user = dataset
            .user(id)
            .ok_or(AggregateError::MissingRow { table: "users", id })?;
        let country = match user.country {
            Some(country_id) => country_name(dataset, country_id)?,
            None => "Unknown".to_string(),
        };
        ranked.push((views, user.username.clone(), country));
    }

    ranked.sort_by(|a, b| (Reverse(a.0), &a.1).cmp(&(Reverse(b.0), &b.1)));
    Ok(ranked
        .into_iter()
        .map(|(views, username, country)| AggregationRow::new(username, country, views))
        .collect())
}

fn rank_blogs(query: &ViewQuery<'_>) -> Result<Vec<AggregationRow>, AggregateError> {
    let dataset = query.dataset();
    let mut ranked = Vec::new();

    for (id, views) in count_by(query, |v| Some(v.blog)) {
        let blog = dataset
            .blog(id)
            .ok_or(AggregateError::MissingRow { table: "blogs", id })?;
        let author = dataset.user(blog.author).ok_or(AggregateError::MissingRow {
            table: "users",
            id: blog.author,
        })?;
        ranked.push((views, blog.title.clone(), id, author.username.clone()));
    }

    // Titles are not unique; the blog id keeps the order total
    ranked.sort_by(|a, b| (Reverse(a.0), &a.1, a.2).cmp(&(Reverse(b.0), &b.1, b.2)));
    Ok(ranked
        .into_iter()
        .map(|(views, title, _, author)| AggregationRow::new(title, author, views))
        .collect())
}
