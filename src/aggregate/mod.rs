//! Pure reductions from a [`Dataset`](crate::normalize::Dataset) to the
//! derived views.
//!
//! Nothing here performs I/O or keeps state between calls; every function can
//! be called repeatedly on the same input and returns the same output.

pub mod continent;
pub mod country;
pub mod global;
pub mod timeseries;
pub mod trend;

pub use continent::{continent_snapshots, continent_time_series};
pub use country::country_snapshots;
pub use global::global_snapshot;
pub use timeseries::{country_time_series, date_axis, time_series};
pub use trend::{percent_change, top_countries, trend_direction, trend_indicators};

/// Round to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, rounded to two decimals; 0 when `whole` is 0.
pub fn rate(part: i64, whole: i64) -> f64 {
    if whole > 0 {
        round2(part as f64 / whole as f64 * 100.0)
    } else {
        0.0
    }
}

/// Saturating cast for counts summed from `u64` cells.
pub(crate) fn to_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
