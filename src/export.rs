//! Delimited-text and JSON serialization of the derived views.
//!
//! CSV output quotes a field only when it contains a comma, a double quote or
//! a line break, doubling embedded quotes. Whole-valued rates are written
//! without a fractional part in both formats. JSON output is pretty-printed with
//! two-space indentation and camelCase keys.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DATA_SOURCE_LABEL;
use crate::dates;
use crate::error::Result;
use crate::models::{ContinentSnapshot, CountrySnapshot, GlobalSnapshot, TimeSeriesPoint};

// ---------------------------------------------------------------------------
// Formats and file naming
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

/// `covid19-<stem>-<YYYY-MM-DD>.<ext>`
pub fn export_file_name(stem: &str, format: ExportFormat, on: NaiveDate) -> String {
    format!(
        "covid19-{stem}-{}.{}",
        dates::iso_date(on),
        format.extension()
    )
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Serialize `rows` to CSV with a header row taken from the field names.
///
/// An empty slice yields an empty string, header included.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    if rows.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

pub fn country_snapshots_csv(rows: &[CountrySnapshot]) -> Result<String> {
    to_csv(rows)
}

pub fn global_snapshot_csv(stats: &GlobalSnapshot) -> Result<String> {
    to_csv(std::slice::from_ref(stats))
}

pub fn time_series_csv(points: &[TimeSeriesPoint]) -> Result<String> {
    to_csv(points)
}

/// Flat row for continent CSV: members become a count and a `"; "`-joined list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContinentCsvRow<'a> {
    continent: &'a str,
    countries_count: usize,
    countries: String,
    confirmed: i64,
    deaths: i64,
    recovered: i64,
    active: i64,
    #[serde(serialize_with = "crate::models::snapshot::rate")]
    mortality_rate: f64,
    #[serde(serialize_with = "crate::models::snapshot::rate")]
    recovery_rate: f64,
    last_update: &'a str,
}

pub fn continent_snapshots_csv(rows: &[ContinentSnapshot]) -> Result<String> {
    let flat: Vec<ContinentCsvRow<'_>> = rows
        .iter()
        .map(|c| ContinentCsvRow {
            continent: c.continent.name(),
            countries_count: c.countries.len(),
            countries: c.countries.join("; "),
            confirmed: c.confirmed,
            deaths: c.deaths,
            recovered: c.recovered,
            active: c.active,
            mortality_rate: c.mortality_rate,
            recovery_rate: c.recovery_rate,
            last_update: &c.last_update,
        })
        .collect();
    to_csv(&flat)
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Everything at once, with export metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteExport<'a> {
    pub export_date: String,
    pub global_statistics: Option<&'a GlobalSnapshot>,
    pub countries: &'a [CountrySnapshot],
    pub time_series: &'a [TimeSeriesPoint],
    pub continents: &'a [ContinentSnapshot],
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub total_countries: usize,
    pub total_continents: usize,
    pub time_series_data_points: usize,
    pub data_source: String,
}

impl<'a> CompleteExport<'a> {
    pub fn new(
        global: Option<&'a GlobalSnapshot>,
        countries: &'a [CountrySnapshot],
        time_series: &'a [TimeSeriesPoint],
        continents: &'a [ContinentSnapshot],
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            global_statistics: global,
            countries,
            time_series,
            continents,
            metadata: ExportMetadata {
                total_countries: countries.len(),
                total_continents: continents.len(),
                time_series_data_points: time_series.len(),
                data_source: DATA_SOURCE_LABEL.to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Writing files
// ---------------------------------------------------------------------------

/// One exportable view.
#[derive(Debug, Clone, Copy)]
pub enum ExportPayload<'a> {
    Countries(&'a [CountrySnapshot]),
    Global(&'a GlobalSnapshot),
    TimeSeries(&'a [TimeSeriesPoint]),
    Continents(&'a [ContinentSnapshot]),
    Complete(&'a CompleteExport<'a>),
}

impl ExportPayload<'_> {
    /// File name stem for this payload.
    pub fn stem(&self) -> &'static str {
        match self {
            ExportPayload::Countries(_) => "country-data",
            ExportPayload::Global(_) => "global-stats",
            ExportPayload::TimeSeries(_) => "time-series",
            ExportPayload::Continents(_) => "continent-data",
            ExportPayload::Complete(_) => "complete-dataset",
        }
    }

    /// Render in `format`. The complete bundle is JSON-only and ignores
    /// `format`.
    pub fn render(&self, format: ExportFormat) -> Result<String> {
        match (self, format) {
            (ExportPayload::Countries(rows), ExportFormat::Csv) => country_snapshots_csv(rows),
            (ExportPayload::Countries(rows), ExportFormat::Json) => to_json(rows),
            (ExportPayload::Global(stats), ExportFormat::Csv) => global_snapshot_csv(stats),
            (ExportPayload::Global(stats), ExportFormat::Json) => to_json(stats),
            (ExportPayload::TimeSeries(points), ExportFormat::Csv) => time_series_csv(points),
            (ExportPayload::TimeSeries(points), ExportFormat::Json) => to_json(points),
            (ExportPayload::Continents(rows), ExportFormat::Csv) => continent_snapshots_csv(rows),
            (ExportPayload::Continents(rows), ExportFormat::Json) => to_json(rows),
            (ExportPayload::Complete(bundle), _) => to_json(bundle),
        }
    }

    fn effective_format(&self, format: ExportFormat) -> ExportFormat {
        match self {
            ExportPayload::Complete(_) => ExportFormat::Json,
            _ => format,
        }
    }
}

/// Render `payload` and write it into `dir` under its dated file name.
///
/// Returns the path written. `dir` is created if missing.
pub fn write_export(dir: &Path, payload: ExportPayload<'_>, format: ExportFormat) -> Result<PathBuf> {
    let format = payload.effective_format(format);
    let contents = payload.render(format)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(payload.stem(), format, dates::today()));
    fs::write(&path, contents)?;
    log::info!("Exported {} to {}", payload.stem(), path.display());
    Ok(path)
}
