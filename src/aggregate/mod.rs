//! Aggregation layer (verb module)
//!
//! Filtered [`ViewQuery`](crate::dataset::ViewQuery) -> ordered `(x, y, z)` rows.

mod error;
mod grouped;
mod growth;
mod period;
mod row;
mod series;
mod top;

pub use error::AggregateError;
pub use grouped::grouped_counts;
pub use growth::{calculate_growth_percentage, GrowthBaseline};
pub use period::{format_period, format_period_label, previous_period, truncate};
pub use row::{AggregationRow, Cell};
pub use series::performance_series;
pub use top::{top_n, TOP_LIMIT};
