//! Lazy view queries and the native row-filter algebra
//!
//! A [`ViewQuery`] only records filters; rows are produced when an
//! aggregation calls [`ViewQuery::rows`].

use std::collections::HashSet;
use chrono::{DateTime, Utc};
use tracing::debug;
use super::records::BlogView;
use super::schema::{Entity, FieldRef};
use super::store::{Dataset, RowRef};
use super::value::Value;

/// A comparison applied to the values of a resolved field
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Exact(Value),
    IsNull,
    In(Vec<Value>),
    /// Case-insensitive substring; the needle is stored lowercased
    IContains(String),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
}

impl Lookup {
    pub fn icontains(needle: &str) -> Self {
        Lookup::IContains(needle.to_lowercase())
    }

    /// Test a single non-null value
    fn test(&self, value: &Value) -> bool {
        match self {
            Lookup::Exact(expected) => value.compare(expected).is_some_and(|o| o.is_eq()),
            Lookup::IsNull => value.is_null(),
            Lookup::In(candidates) => candidates
                .iter()
                .any(|c| value.compare(c).is_some_and(|o| o.is_eq())),
            Lookup::IContains(needle) => value
                .as_text()
                .is_some_and(|s| s.to_lowercase().contains(needle.as_str())),
            Lookup::Gt(bound) => value.compare(bound).is_some_and(|o| o.is_gt()),
            Lookup::Gte(bound) => value.compare(bound).is_some_and(|o| o.is_ge()),
            Lookup::Lt(bound) => value.compare(bound).is_some_and(|o| o.is_lt()),
            Lookup::Lte(bound) => value.compare(bound).is_some_and(|o| o.is_le()),
        }
    }
}

/// Boolean filter over view rows, evaluated by the store
#[derive(Debug, Clone, PartialEq)]
pub enum RowFilter {
    /// Matches every row
    Always,
    /// Field comparison; matches when any value reached by the path matches
    Match { field: FieldRef, lookup: Lookup },
    And(Vec<RowFilter>),
    Or(Vec<RowFilter>),
    Not(Box<RowFilter>),
}

impl RowFilter {
    pub fn matches(&self, dataset: &Dataset, row: RowRef) -> bool {
        match self {
            RowFilter::Always => true,
            RowFilter::Match { field, lookup } => {
                let values = dataset.values(row, field);
                match lookup {
                    // A null hop counts as a null value
                    Lookup::IsNull => values.is_empty() || values.iter().any(Value::is_null),
                    _ => values.iter().any(|v| lookup.test(v)),
                }
            }
            RowFilter::And(filters) => filters.iter().all(|f| f.matches(dataset, row)),
            RowFilter::Or(filters) => filters.iter().any(|f| f.matches(dataset, row)),
            RowFilter::Not(inner) => !inner.matches(dataset, row),
        }
    }

    /// Shorthand for a comparison on a root-level view attribute
    fn view_attribute(name: &str, lookup: Lookup) -> Self {
        // Root attribute names are fixed and always resolve
        match Entity::View.resolve_path(name) {
            Ok(field) => RowFilter::Match { field, lookup },
            Err(_) => RowFilter::Not(Box::new(RowFilter::Always)),
        }
    }
}

/// A lazily evaluated selection of view events
#[derive(Debug, Clone)]
pub struct ViewQuery<'a> {
    dataset: &'a Dataset,
    filters: Vec<RowFilter>,
}

impl Dataset {
    /// Start a query over all view events
    pub fn views(&self) -> ViewQuery<'_> {
        ViewQuery {
            dataset: self,
            filters: Vec::new(),
        }
    }
}

impl<'a> ViewQuery<'a> {
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Narrow the query; filters are combined by conjunction
    pub fn filter(mut self, filter: RowFilter) -> Self {
        if filter != RowFilter::Always {
            self.filters.push(filter);
        }
        self
    }

    /// Keep views with `start <= viewed_at <= end`
    pub fn viewed_between(self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.filter(RowFilter::view_attribute("viewed_at", Lookup::Gte(Value::Timestamp(start))))
            .filter(RowFilter::view_attribute("viewed_at", Lookup::Lte(Value::Timestamp(end))))
    }

    /// Keep views of blogs written by the given user
    pub fn authored_by(self, author_id: i64) -> Self {
        self.filter(RowFilter::view_attribute("blog.author_id", Lookup::Exact(Value::Int(author_id))))
    }

    /// Number of filters attached so far
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Execute the query.
    ///
    /// Each view id appears at most once, in storage order.
    pub fn rows(&self) -> Vec<&'a BlogView> {
        let mut seen = HashSet::new();
        let rows: Vec<&'a BlogView> = self
            .dataset
            .view_rows()
            .iter()
            .enumerate()
            .filter(|(pos, _)| {
                self.filters
                    .iter()
                    .all(|f| f.matches(self.dataset, RowRef::View(*pos)))
            })
            .map(|(_, view)| view)
            .filter(|view| seen.insert(view.id))
            .collect();
        debug!(filters = self.filters.len(), rows = rows.len(), "executed view query");
        rows
    }

    /// Ids of the matching views
    pub fn ids(&self) -> Vec<i64> {
        self.rows().iter().map(|v| v.id).collect()
    }

    pub fn count(&self) -> usize {
        self.rows().len()
    }
}
