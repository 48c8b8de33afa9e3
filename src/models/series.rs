use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::continents::Continent;

// ---------------------------------------------------------------------------
// TimeSeriesPoint: one day of summed counts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub date: String,
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: i64,
    /// `confirmed - deaths - recovered` with no floor; negative when the
    /// source revised one table but not the others.
    pub active: i64,
}

impl TimeSeriesPoint {
    pub fn from_totals(date: impl Into<String>, confirmed: i64, deaths: i64, recovered: i64) -> Self {
        Self {
            date: date.into(),
            confirmed,
            deaths,
            recovered,
            active: confirmed - deaths - recovered,
        }
    }
}

// ---------------------------------------------------------------------------
// ContinentTotals / ContinentTimeSeriesPoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinentTotals {
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: i64,
    /// Unfloored, as for [`TimeSeriesPoint::active`].
    pub active: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinentTimeSeriesPoint {
    pub date: String,
    /// Every continent, zero buckets included, in [`Continent::ALL`] order.
    pub continents: IndexMap<Continent, ContinentTotals>,
}

impl ContinentTimeSeriesPoint {
    pub fn get(&self, continent: Continent) -> ContinentTotals {
        self.continents.get(&continent).copied().unwrap_or_default()
    }
}
