//! Recursive-descent parser: filter JSON -> Predicate

use serde_json::{Map, Value};
use crate::predicate::{LogicalOp, Operator, Predicate};
use super::error::{json_kind, StructureError};

/// A filter tree supplied by a caller.
///
/// Holds no state beyond the borrowed tree; parsing is a pure function of it.
#[derive(Debug, Clone, Copy)]
pub struct DynamicFilter<'a> {
    tree: &'a Value,
}

impl<'a> DynamicFilter<'a> {
    pub fn new(tree: &'a Value) -> Self {
        Self { tree }
    }

    /// Parse the whole tree.
    ///
    /// A top-level `null` or `{}` means "no filter" and yields
    /// [`Predicate::True`]; nested empty objects are errors.
    pub fn parse(&self) -> Result<Predicate, StructureError> {
        match self.tree {
            Value::Null => Ok(Predicate::True),
            Value::Object(map) if map.is_empty() => Ok(Predicate::True),
            node => parse_node(node),
        }
    }
}

/// Parse one node of the filter tree
pub fn parse_node(node: &Value) -> Result<Predicate, StructureError> {
    let Value::Object(map) = node else {
        return Err(StructureError::NotAnObject(json_kind(node)));
    };

    if map.contains_key("field") && map.contains_key("op") {
        return parse_condition(map);
    }

    let ops: Vec<LogicalOp> = map.keys().filter_map(|k| LogicalOp::from_key(k)).collect();
    let op = match ops.as_slice() {
        [] => return Err(StructureError::NoOperation(node.to_string())),
        [op] => *op,
        many => {
            return Err(StructureError::MultipleOperations(
                many.iter().map(|op| op.key().to_string()).collect(),
            ))
        }
    };

    let operand = &map[op.key()];
    let predicate = match op {
        LogicalOp::And => Predicate::And(parse_list(operand, "and")?),
        LogicalOp::Or => Predicate::Or(parse_list(operand, "or")?),
        LogicalOp::Not => match operand {
            Value::Object(_) => parse_node(operand)?.negate(),
            other => return Err(StructureError::ExpectedObject(json_kind(other))),
        },
    };

    // Empty `and` and empty `or` both match everything
    Ok(match predicate {
        Predicate::And(children) | Predicate::Or(children) if children.is_empty() => Predicate::True,
        other => other,
    })
}

fn parse_list(operand: &Value, key: &'static str) -> Result<Vec<Predicate>, StructureError> {
    let Value::Array(items) = operand else {
        return Err(StructureError::ExpectedList(key));
    };
    items.iter().map(parse_node).collect()
}

fn parse_condition(map: &Map<String, Value>) -> Result<Predicate, StructureError> {
    let field = map["field"]
        .as_str()
        .ok_or(StructureError::NonStringKey("field"))?;
    if field.trim().is_empty() {
        return Err(StructureError::EmptyField);
    }

    let op_name = map["op"].as_str().ok_or(StructureError::NonStringKey("op"))?;
    let op: Operator = op_name
        .parse()
        .map_err(|_| StructureError::UnsupportedOperator(op_name.to_string()))?;

    let value = map
        .get("value")
        .ok_or_else(|| StructureError::MissingValue(field.to_string()))?;

    Ok(Predicate::condition(field, op, value.clone()))
}
