//! Aggregation errors

use chrono::NaiveDate;
use crate::query::Granularity;

/// Unexpected failures while aggregating an already validated query
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    /// A foreign key pointed at a row the dataset does not hold
    #[error("{table} row {id} not found")]
    MissingRow { table: &'static str, id: i64 },
    /// Date arithmetic left chrono's supported range
    #[error("cannot compute {granularity} period for {date}")]
    Period {
        date: NaiveDate,
        granularity: Granularity,
    },
}
