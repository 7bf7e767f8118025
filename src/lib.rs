//! blogmetrics - Blog view analytics over a dynamic JSON filter language
//!
//! This library provides:
//! - Dataset types and YAML loading (countries, users, blogs, view events)
//! - A JSON filter language compiled into native query filters
//! - Grouped counts, top-N rankings and time-bucketed performance series
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `dataset/` - records, schema, and the lazy `ViewQuery`
//! - `predicate/` - the backend-independent filter algebra (Predicate, Condition)
//! - `query/` - request types and enumerated parameters
//! - `config` - runtime configuration
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML → Dataset
//! - `filter/` - JSON → Predicate → RowFilter on a ViewQuery
//! - `aggregate/` - ViewQuery → `(x, y, z)` rows
//! - `analytics` - request → rows
//!
//! # Example
//!
//! ```ignore
//! use blogmetrics::{parser, Analytics, AnalyticsConfig, TopRequest};
//!
//! let dataset = parser::parse_file("blog.yaml")?;
//! let analytics = Analytics::new(&dataset, AnalyticsConfig::default());
//! let rows = analytics.top(&TopRequest {
//!     top: Some("blog".into()),
//!     range: Some("month".into()),
//!     filters: Some(r#"{"field": "country.code", "op": "in", "value": ["US", "CA"]}"#.into()),
//! })?;
//! ```

pub mod dataset;
pub mod predicate;
pub mod query;
pub mod config;
pub mod parser;
pub mod filter;
pub mod aggregate;
pub mod analytics;
pub mod error;

// Re-export commonly used types
pub use dataset::{Dataset, ViewQuery, RowFilter, Lookup, Entity, FieldRef, FieldType, Value};
pub use predicate::{Predicate, Condition, Operator, LogicalOp};
pub use query::{BlogViewsRequest, TopRequest, PerformanceRequest, GroupDimension, TopDimension, Granularity, RangeWindow, load_filters};
pub use config::{AnalyticsConfig, LoggingConfig, LogFormat};
pub use filter::{apply_filters, validate_filters, DynamicFilter, FilterError, StructureError, TranslateError};
pub use aggregate::{AggregationRow, Cell, GrowthBaseline, AggregateError, calculate_growth_percentage, TOP_LIMIT};
pub use analytics::{Analytics, grouped_counts, top_n, performance_series};
pub use error::{ParseError, AnalyticsError, AnalyticsResult};
