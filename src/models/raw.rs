use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PROVINCE_FIELD: &str = "Province/State";
pub const COUNTRY_FIELD: &str = "Country/Region";
pub const LAT_FIELD: &str = "Lat";
pub const LONG_FIELD: &str = "Long";

/// The four non-date columns every table carries.
pub const FIXED_FIELDS: [&str; 4] = [PROVINCE_FIELD, COUNTRY_FIELD, LAT_FIELD, LONG_FIELD];

// ---------------------------------------------------------------------------
// DatasetKind
// ---------------------------------------------------------------------------

/// Which of the three parallel tables a row or series belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Confirmed,
    Deaths,
    Recovered,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Confirmed,
        DatasetKind::Deaths,
        DatasetKind::Recovered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Confirmed => "confirmed",
            DatasetKind::Deaths => "deaths",
            DatasetKind::Recovered => "recovered",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RawRow: one CSV record, column name -> cell text, in header order
// ---------------------------------------------------------------------------

/// One region's record exactly as it appeared in a wide-format table.
///
/// Cells are kept as text in header order, so the date columns stay in the
/// source's chronological column order. A column absent from the source is
/// absent from the map, which is what the structural check looks for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: IndexMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell. Re-inserting an existing column keeps its position.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn province(&self) -> Option<&str> {
        self.get(PROVINCE_FIELD).filter(|s| !s.is_empty())
    }

    pub fn country(&self) -> &str {
        self.get(COUNTRY_FIELD).unwrap_or("")
    }

    pub fn lat(&self) -> &str {
        self.get(LAT_FIELD).unwrap_or("")
    }

    pub fn long(&self) -> &str {
        self.get(LONG_FIELD).unwrap_or("")
    }

    /// All column names, in header order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Every cell that is not one of the four fixed fields.
    pub fn date_cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .filter(|(k, _)| !FIXED_FIELDS.contains(&k.as_str()))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// NormalizedSeries: one region's parsed time series
// ---------------------------------------------------------------------------

/// A region's counts keyed by date label.
///
/// `data` preserves the source column order; "latest" means the last key in
/// that order, not the greatest date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSeries {
    pub province_state: String,
    pub country_region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub data: IndexMap<String, u64>,
}

impl NormalizedSeries {
    /// Value at the last date key in insertion order, 0 for an empty series.
    pub fn latest_value(&self) -> u64 {
        self.data.last().map(|(_, v)| *v).unwrap_or(0)
    }

    pub fn latest_date(&self) -> Option<&str> {
        self.data.last().map(|(k, _)| k.as_str())
    }

    /// Value on `date`, 0 when the series has no such column.
    pub fn value_on(&self, date: &str) -> u64 {
        self.data.get(date).copied().unwrap_or(0)
    }
}
