//! Predicate algebra produced by the filter parser

use std::fmt;
use std::str::FromStr;

/// Comparison operators accepted in a leaf condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Exact equality (`null` operand tests for null)
    Eq,
    /// Membership in a list
    In,
    /// Case-insensitive substring match
    Contains,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Operator {
    pub const ALL: [Operator; 7] = [
        Operator::Eq,
        Operator::In,
        Operator::Contains,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::In => "in",
            Operator::Contains => "contains",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
        }
    }

    /// Whether the operator needs an ordering on the field type
    pub fn is_ordering(&self) -> bool {
        matches!(self, Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when an operator string is not supported
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

/// Boolean operation keys of a non-leaf filter node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

impl LogicalOp {
    pub const ALL: [LogicalOp; 3] = [LogicalOp::And, LogicalOp::Or, LogicalOp::Not];

    pub fn key(&self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
            LogicalOp::Not => "not",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.key() == key)
    }
}

/// A leaf comparison: `field op value`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Field path, e.g. `blog.author.username`
    pub field: String,
    pub op: Operator,
    /// Operand exactly as supplied; typed when the predicate is applied
    pub value: serde_json::Value,
}

/// A boolean predicate over view rows
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every row
    True,
    Condition(Condition),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn condition(field: impl Into<String>, op: Operator, value: serde_json::Value) -> Self {
        Predicate::Condition(Condition {
            field: field.into(),
            op,
            value,
        })
    }

    pub fn negate(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Predicate::True)
    }

    /// All leaf conditions, depth first
    pub fn conditions(&self) -> Vec<&Condition> {
        let mut out = Vec::new();
        collect_conditions(self, &mut out);
        out
    }
}

fn collect_conditions<'a>(predicate: &'a Predicate, out: &mut Vec<&'a Condition>) {
    match predicate {
        Predicate::True => {}
        Predicate::Condition(c) => out.push(c),
        Predicate::And(children) | Predicate::Or(children) => {
            for child in children {
                collect_conditions(child, out);
            }
        }
        Predicate::Not(inner) => collect_conditions(inner, out),
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::True => write!(f, "TRUE"),
            Predicate::Condition(c) => write!(f, "{} {} {}", c.field, c.op, c.value),
            Predicate::And(children) | Predicate::Or(children) => {
                let sep = if matches!(self, Predicate::And(_)) { " AND " } else { " OR " };
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(sep)?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
            Predicate::Not(inner) => write!(f, "NOT {}", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_round_trip_names() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>(), Ok(op));
        }
        assert_eq!("like".parse::<Operator>(), Err(UnknownOperator("like".into())));
    }

    #[test]
    fn test_logical_keys() {
        assert_eq!(LogicalOp::from_key("or"), Some(LogicalOp::Or));
        assert_eq!(LogicalOp::from_key("eq"), None);
    }

    #[test]
    fn test_display() {
        let p = Predicate::And(vec![
            Predicate::condition("country.code", Operator::Eq, json!("US")),
            Predicate::condition("blog.id", Operator::In, json!([1, 2])).negate(),
        ]);
        assert_eq!(p.to_string(), r#"(country.code eq "US" AND NOT blog.id in [1,2])"#);
        assert_eq!(p.conditions().len(), 2);
    }
}
