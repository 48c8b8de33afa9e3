//! Day-by-day totals over a trailing window of the shared date axis.

use indexmap::IndexMap;

use super::to_count;
use crate::dates;
use crate::error::ValidationError;
use crate::models::{NormalizedSeries, TimeSeriesPoint};
use crate::normalize::Dataset;

/// The canonical date axis: the first confirmed series' date keys, sorted
/// chronologically.
///
/// Fails when the confirmed table is empty, since there is no axis to project
/// onto.
pub fn date_axis(dataset: &Dataset) -> Result<Vec<String>, ValidationError> {
    let first = dataset
        .confirmed
        .first()
        .ok_or_else(|| ValidationError::new("No confirmed data available"))?;

    let mut axis: Vec<String> = first.data.keys().cloned().collect();
    axis.sort_by(|a, b| dates::compare_labels(a, b));
    Ok(axis)
}

/// The last `days` labels of the axis (all of them when fewer exist).
pub(crate) fn window(dataset: &Dataset, days: usize) -> Result<Vec<String>, ValidationError> {
    let axis = date_axis(dataset)?;
    let start = axis.len().saturating_sub(days);
    Ok(axis[start..].to_vec())
}

/// Sum of one table on one date over the series accepted by `filter`.
fn sum_on<F>(table: &[NormalizedSeries], date: &str, filter: F) -> i64
where
    F: Fn(&NormalizedSeries) -> bool,
{
    table
        .iter()
        .filter(|&s| filter(s))
        .fold(0i64, |acc, s| acc.saturating_add(to_count(s.value_on(date))))
}

fn points_for<F>(dataset: &Dataset, dates: &[String], filter: F) -> Vec<TimeSeriesPoint>
where
    F: Fn(&NormalizedSeries) -> bool,
{
    dates
        .iter()
        .map(|date| {
            TimeSeriesPoint::from_totals(
                date.as_str(),
                sum_on(&dataset.confirmed, date, &filter),
                sum_on(&dataset.deaths, date, &filter),
                sum_on(&dataset.recovered, date, &filter),
            )
        })
        .collect()
}

/// Global totals for each of the last `days` dates, ascending.
///
/// Each date is summed from scratch across every series, so a revised
/// historical value in one table is reflected as-is. `active` is not floored.
pub fn time_series(dataset: &Dataset, days: usize) -> Result<Vec<TimeSeriesPoint>, ValidationError> {
    let dates = window(dataset, days)?;
    Ok(points_for(dataset, &dates, |_| true))
}

/// One sequence per requested country, all on the same window.
///
/// Keys keep the order of `countries` (duplicates collapse). A country with
/// no series in the tables gets an all-zero sequence.
pub fn country_time_series<S: AsRef<str>>(
    dataset: &Dataset,
    countries: &[S],
    days: usize,
) -> Result<IndexMap<String, Vec<TimeSeriesPoint>>, ValidationError> {
    let dates = window(dataset, days)?;

    let mut result = IndexMap::new();
    for country in countries {
        let name = country.as_ref();
        if result.contains_key(name) {
            continue;
        }
        let points = points_for(dataset, &dates, |s| s.country_region == name);
        result.insert(name.to_string(), points);
    }
    Ok(result)
}
