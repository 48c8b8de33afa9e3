//! Continent rollups, both as current snapshots and as a time series.

use chrono::NaiveDate;
use indexmap::IndexMap;

use super::timeseries::window;
use super::{rate, to_count};
use crate::continents::{continent_of, Continent};
use crate::dates;
use crate::error::ValidationError;
use crate::models::{
    ContinentSnapshot, ContinentTimeSeriesPoint, ContinentTotals, CountrySnapshot, DatasetKind,
};
use crate::normalize::Dataset;

#[derive(Debug, Default)]
struct Bucket {
    countries: Vec<String>,
    confirmed: i64,
    deaths: i64,
    recovered: i64,
    active: i64,
}

/// Roll country snapshots up by continent.
///
/// Every country resolves to exactly one continent (unmapped names go to
/// [`Continent::Other`]). Continents with zero confirmed cases are dropped and
/// the rest are sorted by confirmed, descending. `active` is the sum of the
/// members' floored values.
pub fn continent_snapshots(
    countries: &[CountrySnapshot],
    as_of: NaiveDate,
) -> Vec<ContinentSnapshot> {
    let mut buckets: IndexMap<Continent, Bucket> = Continent::ALL
        .into_iter()
        .map(|c| (c, Bucket::default()))
        .collect();

    for snapshot in countries {
        let bucket = buckets.entry(continent_of(&snapshot.country)).or_default();
        bucket.countries.push(snapshot.country.clone());
        bucket.confirmed = bucket.confirmed.saturating_add(snapshot.confirmed);
        bucket.deaths = bucket.deaths.saturating_add(snapshot.deaths);
        bucket.recovered = bucket.recovered.saturating_add(snapshot.recovered);
        bucket.active = bucket.active.saturating_add(snapshot.active);
    }

    let last_update = dates::iso_date(as_of);
    let mut result: Vec<ContinentSnapshot> = buckets
        .into_iter()
        .filter(|(_, b)| b.confirmed > 0)
        .map(|(continent, b)| ContinentSnapshot {
            continent,
            mortality_rate: rate(b.deaths, b.confirmed),
            recovery_rate: rate(b.recovered, b.confirmed),
            countries: b.countries,
            confirmed: b.confirmed,
            deaths: b.deaths,
            recovered: b.recovered,
            active: b.active,
            last_update: last_update.clone(),
        })
        .collect();

    result.sort_by(|a, b| b.confirmed.cmp(&a.confirmed));
    result
}

/// Per-continent totals for each of the last `days` dates.
///
/// Every continent appears in every point, zero buckets included. `active`
/// is not floored.
pub fn continent_time_series(
    dataset: &Dataset,
    days: usize,
) -> Result<Vec<ContinentTimeSeriesPoint>, ValidationError> {
    let dates = window(dataset, days)?;

    let points = dates
        .into_iter()
        .map(|date| {
            let mut continents: IndexMap<Continent, ContinentTotals> = Continent::ALL
                .into_iter()
                .map(|c| (c, ContinentTotals::default()))
                .collect();

            for (kind, table) in dataset.tables() {
                for series in table {
                    let totals = continents
                        .entry(continent_of(&series.country_region))
                        .or_default();
                    let value = to_count(series.value_on(&date));
                    let slot = match kind {
                        DatasetKind::Confirmed => &mut totals.confirmed,
                        DatasetKind::Deaths => &mut totals.deaths,
                        DatasetKind::Recovered => &mut totals.recovered,
                    };
                    *slot = slot.saturating_add(value);
                }
            }

            for totals in continents.values_mut() {
                totals.active = totals.confirmed - totals.deaths - totals.recovered;
            }

            ContinentTimeSeriesPoint { date, continents }
        })
        .collect();

    Ok(points)
}
