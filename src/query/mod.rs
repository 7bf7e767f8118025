//! Request types and enumerated parameters

mod params;
mod request;

pub use params::{Granularity, GroupDimension, RangeWindow, TopDimension};
pub use request::{load_filters, BlogViewsRequest, PerformanceRequest, TopRequest};
