//! Contract checks for raw tables and aggregation outputs.
//!
//! Each check returns `Err(ValidationError)` on a structural violation and
//! otherwise an [`ValidationReport`] listing the soft anomalies it saw. Every
//! anomaly is also logged at `warn` level. Anomalies never abort processing.

use serde::Serialize;
use std::fmt;

use crate::dates;
use crate::error::ValidationError;
use crate::models::{CountrySnapshot, GlobalSnapshot, RawRow, TimeSeriesPoint, FIXED_FIELDS};

/// Number of leading rows inspected for soft anomalies in a raw table.
pub const RAW_SAMPLE_ROWS: usize = 10;

/// Number of leading date columns checked for numeric cells per sampled row.
pub const RAW_SAMPLE_DATE_COLUMNS: usize = 3;

/// Plausible bounds for the number of affected countries.
pub const COUNTRIES_AFFECTED_RANGE: std::ops::RangeInclusive<i64> = 1..=300;

type CheckResult = std::result::Result<ValidationReport, ValidationError>;

// ---------------------------------------------------------------------------
// Anomaly / ValidationReport
// ---------------------------------------------------------------------------

/// A logical inconsistency that does not invalidate the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Anomaly {
    MissingCountry { row: usize },
    LatitudeOutOfRange { row: usize, value: String },
    LongitudeOutOfRange { row: usize, value: String },
    NonNumericCell { row: usize, date: String, value: String },
    /// `confirmed < deaths + recovered`. `subject` is a country name, a date,
    /// or `"global"`.
    ConfirmedBelowOutcomes { subject: String, confirmed: i64, outcomes: i64 },
    RateOutOfRange { subject: String, rate: &'static str, value: f64 },
    ImplausibleCountryCount { count: i64 },
    NotChronological { index: usize },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::MissingCountry { row } => write!(f, "Row {row}: missing country/region"),
            Anomaly::LatitudeOutOfRange { row, value } => {
                write!(f, "Row {row}: invalid latitude: {value}")
            }
            Anomaly::LongitudeOutOfRange { row, value } => {
                write!(f, "Row {row}: invalid longitude: {value}")
            }
            Anomaly::NonNumericCell { row, date, value } => {
                write!(f, "Row {row}, {date}: non-numeric value: {value}")
            }
            Anomaly::ConfirmedBelowOutcomes {
                subject,
                confirmed,
                outcomes,
            } => write!(
                f,
                "{subject}: confirmed cases ({confirmed}) less than deaths + recovered ({outcomes})"
            ),
            Anomaly::RateOutOfRange {
                subject,
                rate,
                value,
            } => write!(f, "{subject}: invalid {rate} rate: {value}%"),
            Anomaly::ImplausibleCountryCount { count } => {
                write!(f, "Global stats: suspicious countries affected count: {count}")
            }
            Anomaly::NotChronological { index } => write!(
                f,
                "Time series data is not in chronological order (first at point {index})"
            ),
        }
    }
}

/// Soft anomalies collected by one check.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub anomalies: Vec<Anomaly>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.anomalies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anomalies.is_empty()
    }

    fn warn(&mut self, anomaly: Anomaly) {
        log::warn!("{anomaly}");
        self.anomalies.push(anomaly);
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: ValidationReport) {
        self.anomalies.extend(other.anomalies);
    }
}

// ---------------------------------------------------------------------------
// Raw rows
// ---------------------------------------------------------------------------

/// Check a decoded table before normalization.
///
/// Fails on an empty table, a first row lacking any fixed column, or a first
/// row without a single `M/D/YY` column. The first [`RAW_SAMPLE_ROWS`] rows
/// are then inspected for a missing country, out-of-range coordinates, and
/// non-numeric counts in the first [`RAW_SAMPLE_DATE_COLUMNS`] date columns.
pub fn validate_raw_rows(rows: &[RawRow]) -> CheckResult {
    let first = rows
        .first()
        .ok_or_else(|| ValidationError::new("CSV data is empty or invalid"))?;

    for field in FIXED_FIELDS {
        if !first.contains(field) {
            return Err(ValidationError::new(format!(
                "Missing required field: {field}"
            )));
        }
    }

    let date_columns: Vec<&str> = first
        .columns()
        .filter(|c| !FIXED_FIELDS.contains(c) && dates::is_date_label(c))
        .collect();
    if date_columns.is_empty() {
        return Err(ValidationError::new(
            "No valid date columns found in CSV data",
        ));
    }

    let mut report = ValidationReport::default();
    for (index, row) in rows.iter().take(RAW_SAMPLE_ROWS).enumerate() {
        let row_no = index + 1;

        if row.country().trim().is_empty() {
            report.warn(Anomaly::MissingCountry { row: row_no });
        }

        if !coordinate_in_range(row.lat(), 90.0) {
            report.warn(Anomaly::LatitudeOutOfRange {
                row: row_no,
                value: row.lat().to_string(),
            });
        }
        if !coordinate_in_range(row.long(), 180.0) {
            report.warn(Anomaly::LongitudeOutOfRange {
                row: row_no,
                value: row.long().to_string(),
            });
        }

        for date in date_columns.iter().take(RAW_SAMPLE_DATE_COLUMNS) {
            let value = row.get(date).unwrap_or("");
            if !value.trim().is_empty() && !starts_numeric(value) {
                report.warn(Anomaly::NonNumericCell {
                    row: row_no,
                    date: date.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn coordinate_in_range(cell: &str, bound: f64) -> bool {
    match cell.trim().parse::<f64>() {
        Ok(v) => v.is_finite() && (-bound..=bound).contains(&v),
        Err(_) => false,
    }
}

/// Whether a cell begins with an (optionally signed) integer.
fn starts_numeric(cell: &str) -> bool {
    let s = cell.trim_start();
    let s = s
        .strip_prefix('-')
        .or_else(|| s.strip_prefix('+'))
        .unwrap_or(s);
    s.starts_with(|c: char| c.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Country snapshots
// ---------------------------------------------------------------------------

pub fn validate_country_snapshots(snapshots: &[CountrySnapshot]) -> CheckResult {
    if snapshots.is_empty() {
        return Err(ValidationError::new("Country data is empty or invalid"));
    }

    let mut report = ValidationReport::default();
    for (index, snapshot) in snapshots.iter().enumerate() {
        if snapshot.country.trim().is_empty() {
            return Err(ValidationError::new(format!(
                "Country {}: Invalid country name",
                index + 1
            )));
        }

        let counts = [
            ("confirmed", snapshot.confirmed),
            ("deaths", snapshot.deaths),
            ("recovered", snapshot.recovered),
            ("active", snapshot.active),
        ];
        for (field, value) in counts {
            if value < 0 {
                return Err(ValidationError::new(format!(
                    "Country {}: Invalid {field} value: {value}",
                    snapshot.country
                )));
            }
        }

        check_outcomes(
            &mut report,
            &snapshot.country,
            snapshot.confirmed,
            snapshot.deaths,
            snapshot.recovered,
        );
        check_rate(&mut report, &snapshot.country, "mortality", snapshot.mortality_rate);
        check_rate(&mut report, &snapshot.country, "recovery", snapshot.recovery_rate);
    }

    Ok(report)
}

fn check_outcomes(
    report: &mut ValidationReport,
    subject: &str,
    confirmed: i64,
    deaths: i64,
    recovered: i64,
) {
    let outcomes = deaths.saturating_add(recovered);
    if confirmed < outcomes {
        report.warn(Anomaly::ConfirmedBelowOutcomes {
            subject: subject.to_string(),
            confirmed,
            outcomes,
        });
    }
}

fn check_rate(report: &mut ValidationReport, subject: &str, rate: &'static str, value: f64) {
    if !(0.0..=100.0).contains(&value) {
        report.warn(Anomaly::RateOutOfRange {
            subject: subject.to_string(),
            rate,
            value,
        });
    }
}

// ---------------------------------------------------------------------------
// Global snapshot
// ---------------------------------------------------------------------------

pub fn validate_global_snapshot(stats: &GlobalSnapshot) -> CheckResult {
    if stats.last_update.trim().is_empty() {
        return Err(ValidationError::new(
            "Missing required field in global stats: lastUpdate",
        ));
    }

    let counts = [
        ("totalConfirmed", stats.total_confirmed),
        ("totalDeaths", stats.total_deaths),
        ("totalRecovered", stats.total_recovered),
        ("totalActive", stats.total_active),
        ("countriesAffected", stats.countries_affected),
    ];
    for (field, value) in counts {
        if value < 0 {
            return Err(ValidationError::new(format!(
                "Invalid {field} value in global stats: {value}"
            )));
        }
    }

    let rates = [
        ("mortalityRate", stats.mortality_rate),
        ("recoveryRate", stats.recovery_rate),
    ];
    for (field, value) in rates {
        if value.is_nan() || value < 0.0 {
            return Err(ValidationError::new(format!(
                "Invalid {field} value in global stats: {value}"
            )));
        }
    }

    let mut report = ValidationReport::default();
    check_outcomes(
        &mut report,
        "global",
        stats.total_confirmed,
        stats.total_deaths,
        stats.total_recovered,
    );
    if stats.mortality_rate > 100.0 {
        check_rate(&mut report, "global", "mortality", stats.mortality_rate);
    }
    if stats.recovery_rate > 100.0 {
        check_rate(&mut report, "global", "recovery", stats.recovery_rate);
    }
    if !COUNTRIES_AFFECTED_RANGE.contains(&stats.countries_affected) {
        report.warn(Anomaly::ImplausibleCountryCount {
            count: stats.countries_affected,
        });
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

/// Check a date-ordered sequence of points.
///
/// A negative `active` is a hard failure here even though the builder does
/// not floor it; a window containing a downward revision is rejected.
pub fn validate_time_series(points: &[TimeSeriesPoint]) -> CheckResult {
    if points.is_empty() {
        return Err(ValidationError::new("Time series data is empty or invalid"));
    }

    let mut report = ValidationReport::default();
    for (index, point) in points.iter().enumerate() {
        let point_no = index + 1;
        if point.date.is_empty() {
            return Err(ValidationError::new(format!(
                "Time series point {point_no}: Invalid date"
            )));
        }
        if !dates::is_date_label(&point.date) {
            return Err(ValidationError::new(format!(
                "Time series point {point_no}: Invalid date format: {}",
                point.date
            )));
        }

        let counts = [
            ("confirmed", point.confirmed),
            ("deaths", point.deaths),
            ("recovered", point.recovered),
            ("active", point.active),
        ];
        for (field, value) in counts {
            if value < 0 {
                return Err(ValidationError::new(format!(
                    "Time series point {point_no}: Invalid {field} value: {value}"
                )));
            }
        }

        check_outcomes(
            &mut report,
            &point.date,
            point.confirmed,
            point.deaths,
            point.recovered,
        );
    }

    let out_of_order = points.windows(2).position(|pair| {
        dates::compare_labels(&pair[1].date, &pair[0].date) == std::cmp::Ordering::Less
    });
    if let Some(position) = out_of_order {
        report.warn(Anomaly::NotChronological {
            index: position + 2,
        });
    }

    Ok(report)
}
