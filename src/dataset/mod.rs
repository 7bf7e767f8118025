//! Dataset types (noun module)
//!
//! The relational store the analytics run against: countries, users,
//! blogs and view events, plus the row-filter capability queries use.

mod query;
mod records;
mod schema;
mod store;
mod value;

pub use query::{Lookup, RowFilter, ViewQuery};
pub use records::{Blog, BlogView, Country, User};
pub use schema::{Attribute, Cardinality, Entity, FieldRef, PathError, Relation};
pub use store::{Dataset, DatasetTables, RowRef};
pub use value::{FieldType, Value};
