//! The `(x, y, z)` output row shared by every endpoint

use serde::Serialize;
use std::fmt;

/// A `y` or `z` cell: a count or a label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Text(String),
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// One aggregation result row.
///
/// - grouped counts: group key, distinct blogs, views
/// - top: identifier, secondary label or blog count, views
/// - performance: period label, views, growth percentage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationRow {
    pub x: String,
    pub y: Cell,
    pub z: Cell,
}

impl AggregationRow {
    pub fn new(x: impl Into<String>, y: impl Into<Cell>, z: impl Into<Cell>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            z: z.into(),
        }
    }

    /// The view count column, when it is numeric
    pub fn views(&self) -> Option<i64> {
        match (&self.y, &self.z) {
            (_, Cell::Int(z)) => Some(*z),
            (Cell::Int(y), Cell::Text(_)) => Some(*y),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_flat() {
        let row = AggregationRow::new("Canada", 2usize, 5usize);
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!({"x": "Canada", "y": 2, "z": 5})
        );
        let row = AggregationRow::new("2024-01 (1 blog)", 3usize, "+50.0%");
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            serde_json::json!({"x": "2024-01 (1 blog)", "y": 3, "z": "+50.0%"})
        );
    }

    #[test]
    fn test_views_column() {
        assert_eq!(AggregationRow::new("a", "b", 4usize).views(), Some(4));
        assert_eq!(AggregationRow::new("a", 4usize, "+1.0%").views(), Some(4));
    }
}
