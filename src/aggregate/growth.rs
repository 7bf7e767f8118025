//! Period-over-period growth

use serde::{Deserialize, Serialize};

/// What each period's view count is compared against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthBaseline {
    /// The previous row of the sorted series, whatever its date
    #[default]
    Sequential,
    /// The calendar period immediately before; zero when it has no views
    Calendar,
}

/// Signed growth of `current` over `previous`, one decimal place.
///
/// A zero baseline yields `"0.0%"` when both are zero and a capped
/// `"+100.0%"` otherwise.
pub fn calculate_growth_percentage(current: u64, previous: u64) -> String {
    if previous == 0 {
        return if current == 0 {
            "0.0%".to_string()
        } else {
            "+100.0%".to_string()
        };
    }

    let percentage = (current as f64 - previous as f64) / previous as f64 * 100.0;
    if percentage >= 0.0 {
        format!("+{:.1}%", percentage)
    } else {
        format!("{:.1}%", percentage)
    }
}
