//! Per-country snapshot at each series' latest column.

use chrono::NaiveDate;
use indexmap::IndexMap;

use super::{rate, to_count};
use crate::dates;
use crate::models::{CountrySnapshot, DatasetKind};
use crate::normalize::Dataset;

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    confirmed: i64,
    deaths: i64,
    recovered: i64,
}

impl Totals {
    fn add(&mut self, kind: DatasetKind, value: i64) {
        let slot = match kind {
            DatasetKind::Confirmed => &mut self.confirmed,
            DatasetKind::Deaths => &mut self.deaths,
            DatasetKind::Recovered => &mut self.recovered,
        };
        *slot = slot.saturating_add(value);
    }
}

/// Sum every province's latest value into one snapshot per country.
///
/// "Latest" is the last date key of each series in column order; keys are not
/// re-sorted. Countries appearing in any of the three tables get a snapshot.
/// `as_of` stamps `lastUpdate`. Output is sorted by confirmed, descending;
/// ties keep first-seen order.
pub fn country_snapshots(dataset: &Dataset, as_of: NaiveDate) -> Vec<CountrySnapshot> {
    let mut by_country: IndexMap<&str, Totals> = IndexMap::new();

    for (kind, table) in dataset.tables() {
        for series in table {
            by_country
                .entry(series.country_region.as_str())
                .or_default()
                .add(kind, to_count(series.latest_value()));
        }
    }

    let last_update = dates::iso_date(as_of);
    let mut snapshots: Vec<CountrySnapshot> = by_country
        .into_iter()
        .map(|(country, t)| CountrySnapshot {
            country: country.to_string(),
            confirmed: t.confirmed,
            deaths: t.deaths,
            recovered: t.recovered,
            active: (t.confirmed - t.deaths - t.recovered).max(0),
            mortality_rate: rate(t.deaths, t.confirmed),
            recovery_rate: rate(t.recovered, t.confirmed),
            last_update: last_update.clone(),
        })
        .collect();

    snapshots.sort_by(|a, b| b.confirmed.cmp(&a.confirmed));
    snapshots
}
