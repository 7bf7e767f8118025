//! Predicate -> native row filter translation
//!
//! Resolves field paths against the dataset schema and types each operand
//! for the field it is compared with.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value as Json;
use crate::dataset::{Entity, FieldRef, FieldType, Lookup, RowFilter, Value};
use crate::predicate::{Condition, Operator, Predicate};
use super::error::TranslateError;

/// Translate a predicate into a filter over view rows
pub fn translate(predicate: &Predicate) -> Result<RowFilter, TranslateError> {
    match predicate {
        Predicate::True => Ok(RowFilter::Always),
        Predicate::Condition(condition) => translate_condition(condition),
        Predicate::And(children) => Ok(RowFilter::And(
            children.iter().map(translate).collect::<Result<_, _>>()?,
        )),
        Predicate::Or(children) => Ok(RowFilter::Or(
            children.iter().map(translate).collect::<Result<_, _>>()?,
        )),
        Predicate::Not(inner) => Ok(RowFilter::Not(Box::new(translate(inner)?))),
    }
}

fn translate_condition(condition: &Condition) -> Result<RowFilter, TranslateError> {
    let field = Entity::View.resolve_path(&condition.field)?;
    let op = condition.op;
    let data_type = field.data_type();

    let lookup = match op {
        Operator::Eq if condition.value.is_null() => Lookup::IsNull,
        Operator::Eq => Lookup::Exact(coerce(&field, op, &condition.value)?),
        Operator::In => {
            let Json::Array(items) = &condition.value else {
                return Err(TranslateError::OperandShape {
                    field: field.path,
                    op,
                    expected: "an array of values",
                });
            };
            Lookup::In(
                items
                    .iter()
                    .map(|item| coerce(&field, op, item))
                    .collect::<Result<_, _>>()?,
            )
        }
        Operator::Contains => {
            if data_type != FieldType::Text {
                return Err(unsupported(&field, op));
            }
            match &condition.value {
                Json::String(needle) => Lookup::icontains(needle),
                Json::Null => return Err(null_operand(&field, op)),
                other => return Err(mismatch(&field, other)),
            }
        }
        Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => {
            if !data_type.is_ordered() {
                return Err(unsupported(&field, op));
            }
            let bound = coerce(&field, op, &condition.value)?;
            match op {
                Operator::Gt => Lookup::Gt(bound),
                Operator::Gte => Lookup::Gte(bound),
                Operator::Lt => Lookup::Lt(bound),
                _ => Lookup::Lte(bound),
            }
        }
    };

    Ok(RowFilter::Match { field, lookup })
}

/// Convert a JSON operand into a value of the field's type
fn coerce(field: &FieldRef, op: Operator, value: &Json) -> Result<Value, TranslateError> {
    let coerced = match (field.data_type(), value) {
        (_, Json::Null) => return Err(null_operand(field, op)),
        (FieldType::Int, Json::Number(n)) => n.as_i64().map(Value::Int),
        (FieldType::Int, Json::String(s)) => s.trim().parse().ok().map(Value::Int),
        (FieldType::Text, Json::String(s)) => Some(Value::Text(s.clone())),
        (FieldType::Bool, Json::Bool(b)) => Some(Value::Bool(*b)),
        (FieldType::Timestamp, Json::String(s)) => parse_timestamp(s).map(Value::Timestamp),
        _ => None,
    };
    coerced.ok_or_else(|| mismatch(field, value))
}

/// Accept RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC)
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn mismatch(field: &FieldRef, value: &Json) -> TranslateError {
    TranslateError::TypeMismatch {
        field: field.path.clone(),
        expected: field.data_type(),
        found: value.to_string(),
    }
}

fn unsupported(field: &FieldRef, op: Operator) -> TranslateError {
    TranslateError::UnsupportedComparison {
        field: field.path.clone(),
        op,
        data_type: field.data_type(),
    }
}

fn null_operand(field: &FieldRef, op: Operator) -> TranslateError {
    TranslateError::NullOperand {
        field: field.path.clone(),
        op,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::PathError;
    use chrono::TimeZone;
    use serde_json::json;

    fn leaf(field: &str, op: Operator, value: Json) -> Result<RowFilter, TranslateError> {
        translate(&Predicate::condition(field, op, value))
    }

    fn lookup_of(filter: RowFilter) -> Lookup {
        match filter {
            RowFilter::Match { lookup, .. } => lookup,
            other => panic!("expected a field match, got {:?}", other),
        }
    }

    #[test]
    fn test_true_becomes_always() {
        assert_eq!(translate(&Predicate::True).unwrap(), RowFilter::Always);
    }

    #[test]
    fn test_eq_null_becomes_is_null() {
        let lookup = lookup_of(leaf("viewer", Operator::Eq, Json::Null).unwrap());
        assert_eq!(lookup, Lookup::IsNull);
    }

    #[test]
    fn test_integer_from_string() {
        let lookup = lookup_of(leaf("blog.id", Operator::Eq, json!("7")).unwrap());
        assert_eq!(lookup, Lookup::Exact(Value::Int(7)));
    }

    #[test]
    fn test_timestamp_operands() {
        let lookup = lookup_of(leaf("viewed_at", Operator::Gte, json!("2024-03-01")).unwrap());
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(lookup, Lookup::Gte(Value::Timestamp(expected)));

        let lookup = lookup_of(
            leaf("viewed_at", Operator::Lt, json!("2024-03-01T12:00:00+02:00")).unwrap(),
        );
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(lookup, Lookup::Lt(Value::Timestamp(expected)));
    }

    #[test]
    fn test_contains_lowercases_needle() {
        let lookup = lookup_of(leaf("blog.title", Operator::Contains, json!("RuSt")).unwrap());
        assert_eq!(lookup, Lookup::IContains("rust".into()));
    }

    #[test]
    fn test_unknown_field() {
        let err = leaf("blog.rating", Operator::Gt, json!(3)).unwrap_err();
        assert!(matches!(err, TranslateError::Field(PathError::UnknownField { .. })));
    }

    #[test]
    fn test_type_mismatch() {
        let err = leaf("blog.id", Operator::Eq, json!("seven")).unwrap_err();
        assert_eq!(
            err,
            TranslateError::TypeMismatch {
                field: "blog.id".into(),
                expected: FieldType::Int,
                found: "\"seven\"".into(),
            }
        );
        assert!(leaf("viewed_at", Operator::Gt, json!(12)).is_err());
        assert!(leaf("country.code", Operator::Eq, json!({"a": 1})).is_err());
    }

    #[test]
    fn test_in_requires_array() {
        let err = leaf("country.code", Operator::In, json!("US")).unwrap_err();
        assert!(matches!(err, TranslateError::OperandShape { op: Operator::In, .. }));
        let lookup = lookup_of(leaf("country.code", Operator::In, json!(["US", "CA"])).unwrap());
        assert_eq!(
            lookup,
            Lookup::In(vec![Value::Text("US".into()), Value::Text("CA".into())])
        );
    }

    #[test]
    fn test_contains_requires_text_field() {
        let err = leaf("blog.id", Operator::Contains, json!("1")).unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedComparison { data_type: FieldType::Int, .. }));
    }

    #[test]
    fn test_ordering_on_bool_rejected() {
        let err = leaf("blog.is_published", Operator::Gt, json!(false)).unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedComparison { .. }));
    }

    #[test]
    fn test_null_only_for_eq() {
        let err = leaf("blog.id", Operator::Gt, Json::Null).unwrap_err();
        assert!(matches!(err, TranslateError::NullOperand { op: Operator::Gt, .. }));
    }

    #[test]
    fn test_error_inside_composite_propagates() {
        let predicate = Predicate::Or(vec![
            Predicate::condition("id", Operator::Eq, json!(1)),
            Predicate::condition("bogus", Operator::Eq, json!(1)).negate(),
        ]);
        assert!(translate(&predicate).is_err());
    }
}
