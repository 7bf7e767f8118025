//! Dynamic filter engine (verb module)
//!
//! Filter JSON -> [`Predicate`] -> [`RowFilter`] attached to a [`ViewQuery`].
//!
//! ```ignore
//! use serde_json::json;
//! let tree = json!({"and": [
//!     {"field": "country.code", "op": "in", "value": ["US", "CA"]},
//!     {"not": {"field": "viewer", "op": "eq", "value": null}}
//! ]});
//! let query = apply_filters(dataset.views(), Some(&tree))?;
//! ```

mod error;
mod parse;
mod translate;

use serde_json::Value;
use tracing::debug;
use crate::dataset::ViewQuery;
use crate::predicate::Predicate;

pub use error::{FilterError, StructureError, TranslateError};
pub use parse::{parse_node, DynamicFilter};
pub use translate::translate;

/// Parse a filter tree into a predicate
pub fn parse_filter(tree: &Value) -> Result<Predicate, StructureError> {
    DynamicFilter::new(tree).parse()
}

/// Apply a parsed predicate to a view query.
///
/// Nothing is evaluated here; the translated filter is attached to the query
/// and runs when the query executes.
pub fn apply<'a>(query: ViewQuery<'a>, predicate: &Predicate) -> Result<ViewQuery<'a>, FilterError> {
    let filter = translate(predicate)?;
    debug!(conditions = predicate.conditions().len(), "attached filter predicate");
    Ok(query.filter(filter))
}

/// Parse and apply an optional filter tree.
///
/// `None` leaves the query untouched. Structural and translation failures
/// both come back as [`FilterError`].
pub fn apply_filters<'a>(query: ViewQuery<'a>, filters: Option<&Value>) -> Result<ViewQuery<'a>, FilterError> {
    let Some(tree) = filters else {
        return Ok(query);
    };
    let predicate = parse_filter(tree)?;
    apply(query, &predicate)
}

/// Check that a filter tree is well formed without applying it.
///
/// Field paths are not checked; see [`apply_filters`].
pub fn validate_filters(filters: Option<&Value>) -> Result<(), StructureError> {
    match filters {
        Some(tree) => parse_filter(tree).map(|_| ()),
        None => Ok(()),
    }
}
