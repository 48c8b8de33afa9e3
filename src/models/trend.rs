use serde::{Deserialize, Serialize};

/// Day-over-day and week-over-week movement at the end of a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendIndicators {
    /// Date of the latest point.
    pub date: String,
    pub new_confirmed: i64,
    pub new_deaths: i64,
    pub new_recovered: i64,
    /// Change against the point seven days earlier.
    pub confirmed_trend: i64,
    pub deaths_trend: i64,
    pub recovered_trend: i64,
    /// Mean daily increase over the last seven points.
    pub week_avg_confirmed: f64,
    pub week_avg_deaths: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Ranking / charting metric selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Confirmed,
    Deaths,
    Recovered,
    Active,
}
