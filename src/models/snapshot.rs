use serde::{Deserialize, Serialize, Serializer};

use crate::continents::Continent;

/// Whole-valued rates render as integers (`20`, not `20.0`).
pub(crate) fn rate<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const EXACT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() < EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

// ---------------------------------------------------------------------------
// CountrySnapshot: latest totals for one country (all provinces summed)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySnapshot {
    pub country: String,
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: i64,
    /// `confirmed - deaths - recovered`, floored at 0.
    pub active: i64,
    #[serde(serialize_with = "rate")]
    pub mortality_rate: f64,
    #[serde(serialize_with = "rate")]
    pub recovery_rate: f64,
    pub last_update: String,
}

// ---------------------------------------------------------------------------
// GlobalSnapshot: world totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSnapshot {
    pub total_confirmed: i64,
    pub total_deaths: i64,
    pub total_recovered: i64,
    pub total_active: i64,
    #[serde(serialize_with = "rate")]
    pub mortality_rate: f64,
    #[serde(serialize_with = "rate")]
    pub recovery_rate: f64,
    pub countries_affected: i64,
    pub last_update: String,
}

// ---------------------------------------------------------------------------
// ContinentSnapshot: country snapshots rolled up by continent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinentSnapshot {
    pub continent: Continent,
    /// Member countries in the order they were encountered.
    pub countries: Vec<String>,
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: i64,
    pub active: i64,
    #[serde(serialize_with = "rate")]
    pub mortality_rate: f64,
    #[serde(serialize_with = "rate")]
    pub recovery_rate: f64,
    pub last_update: String,
}

// ---------------------------------------------------------------------------
// RankedCountry: top-N ranking entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCountry {
    /// 1-based position.
    pub rank: usize,
    #[serde(flatten)]
    pub snapshot: CountrySnapshot,
}
