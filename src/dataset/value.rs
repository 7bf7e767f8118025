//! Scalar values and field types

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// Storage types of dataset attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// 64-bit signed integer (ids and foreign keys)
    Int,
    /// Variable-length string
    Text,
    /// Boolean
    Bool,
    /// UTC timestamp
    Timestamp,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Int => write!(f, "integer"),
            FieldType::Text => write!(f, "text"),
            FieldType::Bool => write!(f, "boolean"),
            FieldType::Timestamp => write!(f, "timestamp"),
        }
    }
}

impl FieldType {
    /// Whether `<`, `<=`, `>`, `>=` are meaningful for this type
    pub fn is_ordered(&self) -> bool {
        !matches!(self, FieldType::Bool)
    }
}

/// A single attribute value read from a row, or a typed filter operand
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Order two values of the same type.
    ///
    /// Returns `None` when either side is null or the types differ, so any
    /// comparison involving a null evaluates to false.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Get the string payload (None for non-text values)
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Option<i64>> for Value {
    fn from(value: Option<i64>) -> Self {
        value.map(Value::Int).unwrap_or(Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Text(s) => write!(f, "'{}'", s),
            Value::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_same_type() {
        assert_eq!(Value::Int(1).compare(&Value::Int(2)), Some(Ordering::Less));
        assert_eq!(
            Value::Text("b".into()).compare(&Value::Text("a".into())),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_compare_null_or_mixed_is_none() {
        assert_eq!(Value::Null.compare(&Value::Int(1)), None);
        assert_eq!(Value::Int(1).compare(&Value::Text("1".into())), None);
    }

    #[test]
    fn test_bool_not_ordered() {
        assert!(!FieldType::Bool.is_ordered());
        assert!(FieldType::Timestamp.is_ordered());
    }
}
