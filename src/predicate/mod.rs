//! Predicate types (noun module)
//!
//! The intermediate boolean algebra between filter JSON and the dataset's
//! native row filters.

mod expr;

pub use expr::{Condition, LogicalOp, Operator, Predicate, UnknownOperator};
