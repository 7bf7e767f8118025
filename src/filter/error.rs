//! Filter engine errors

use crate::dataset::{FieldType, PathError};
use crate::predicate::Operator;

/// The filter tree itself is malformed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StructureError {
    #[error("Filter node must be an object, got {0}")]
    NotAnObject(&'static str),
    #[error("No valid operation found in node: {0}")]
    NoOperation(String),
    #[error("Multiple operations in single node: [{}]", .0.join(", "))]
    MultipleOperations(Vec<String>),
    #[error("{} operation requires a list of conditions", .0.to_uppercase())]
    ExpectedList(&'static str),
    #[error("NOT operation requires an object condition, got {0}")]
    ExpectedObject(&'static str),
    #[error("Condition '{0}' must be a string")]
    NonStringKey(&'static str),
    #[error("Condition field must not be empty")]
    EmptyField,
    #[error("Unsupported operator '{0}'; expected one of eq, in, contains, gt, gte, lt, lte")]
    UnsupportedOperator(String),
    #[error("Condition on '{0}' is missing a value")]
    MissingValue(String),
}

/// A well-formed predicate could not be applied to the dataset
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranslateError {
    #[error(transparent)]
    Field(#[from] PathError),
    #[error("'{field}' expects a {expected} value, got {found}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        found: String,
    },
    #[error("operator '{op}' on '{field}' requires {expected}")]
    OperandShape {
        field: String,
        op: Operator,
        expected: &'static str,
    },
    #[error("operator '{op}' is not supported on {data_type} field '{field}'")]
    UnsupportedComparison {
        field: String,
        op: Operator,
        data_type: FieldType,
    },
    #[error("operator '{op}' on '{field}' does not accept null")]
    NullOperand { field: String, op: Operator },
}

/// Uniform error returned when a filter cannot be used, whatever the cause
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid filter: {0}")]
    Structure(#[from] StructureError),
    #[error("Invalid filter: {0}")]
    Translate(#[from] TranslateError),
}

/// JSON type name for error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
