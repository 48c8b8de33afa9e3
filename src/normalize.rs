//! Row normalization: wide-format text rows into typed per-region series.
//!
//! Normalization never fails. Unparseable counts become 0 and unparseable
//! coordinates become 0.0; structural problems are the validator's job.

use indexmap::IndexMap;

use crate::error::Result;
use crate::models::{DatasetKind, NormalizedSeries, RawRow};

/// Parse a count cell the way the source publishes them.
///
/// Takes the leading run of ASCII digits after optional whitespace and a `+`
/// sign (`"12"`, `" 7"`, `"12.0"` -> 12). Empty, non-numeric, negative or
/// overflowing cells are 0.
pub fn parse_count(cell: &str) -> u64 {
    let s = cell.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().unwrap_or(0)
}

/// Parse a coordinate cell, 0.0 on failure or non-finite input.
pub fn parse_coordinate(cell: &str) -> f64 {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Convert one raw row. Every non-fixed column is treated as a date column
/// and kept in its original order.
pub fn normalize_row(row: &RawRow) -> NormalizedSeries {
    let data: IndexMap<String, u64> = row
        .date_cells()
        .map(|(date, value)| (date.to_string(), parse_count(value)))
        .collect();

    NormalizedSeries {
        province_state: row.province().unwrap_or("").to_string(),
        country_region: row.country().to_string(),
        latitude: parse_coordinate(row.lat()),
        longitude: parse_coordinate(row.long()),
        data,
    }
}

/// Normalize a whole table, one series per row.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<NormalizedSeries> {
    rows.iter().map(normalize_row).collect()
}

/// Decode wide-format CSV text into raw rows.
///
/// Blank lines are skipped. Short records leave their trailing columns
/// absent rather than empty.
pub fn parse_csv(text: &str) -> std::result::Result<Vec<RawRow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.trim().to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Dataset: the three normalized tables of one fetch
// ---------------------------------------------------------------------------

/// Immutable snapshot of the three tables, the input to every aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub confirmed: Vec<NormalizedSeries>,
    pub deaths: Vec<NormalizedSeries>,
    pub recovered: Vec<NormalizedSeries>,
}

impl Dataset {
    pub fn new(
        confirmed: Vec<NormalizedSeries>,
        deaths: Vec<NormalizedSeries>,
        recovered: Vec<NormalizedSeries>,
    ) -> Self {
        Self {
            confirmed,
            deaths,
            recovered,
        }
    }

    /// Normalize three already-decoded raw tables.
    pub fn from_raw(confirmed: &[RawRow], deaths: &[RawRow], recovered: &[RawRow]) -> Self {
        Self::new(
            normalize_rows(confirmed),
            normalize_rows(deaths),
            normalize_rows(recovered),
        )
    }

    /// Decode and normalize three CSV documents held in memory.
    pub fn from_csv_strs(confirmed: &str, deaths: &str, recovered: &str) -> Result<Self> {
        Ok(Self::from_raw(
            &parse_csv(confirmed)?,
            &parse_csv(deaths)?,
            &parse_csv(recovered)?,
        ))
    }

    pub fn table(&self, kind: DatasetKind) -> &[NormalizedSeries] {
        match kind {
            DatasetKind::Confirmed => &self.confirmed,
            DatasetKind::Deaths => &self.deaths,
            DatasetKind::Recovered => &self.recovered,
        }
    }

    /// `(kind, table)` pairs in confirmed, deaths, recovered order.
    pub fn tables(&self) -> impl Iterator<Item = (DatasetKind, &[NormalizedSeries])> {
        DatasetKind::ALL.into_iter().map(move |k| (k, self.table(k)))
    }

    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty() && self.deaths.is_empty() && self.recovered.is_empty()
    }
}
