use chrono::NaiveDate;

use super::rate;
use crate::dates;
use crate::models::{CountrySnapshot, GlobalSnapshot};

/// Reduce country snapshots to world totals.
///
/// `totalActive` sums the already-floored per-country `active` values, so it
/// can exceed `confirmed - deaths - recovered` when some country is negative.
pub fn global_snapshot(countries: &[CountrySnapshot], as_of: NaiveDate) -> GlobalSnapshot {
    let (confirmed, deaths, recovered, active) = countries.iter().fold(
        (0i64, 0i64, 0i64, 0i64),
        |(c, d, r, a), s| {
            (
                c.saturating_add(s.confirmed),
                d.saturating_add(s.deaths),
                r.saturating_add(s.recovered),
                a.saturating_add(s.active),
            )
        },
    );

    GlobalSnapshot {
        total_confirmed: confirmed,
        total_deaths: deaths,
        total_recovered: recovered,
        total_active: active,
        mortality_rate: rate(deaths, confirmed),
        recovery_rate: rate(recovered, confirmed),
        countries_affected: i64::try_from(countries.len()).unwrap_or(i64::MAX),
        last_update: dates::iso_date(as_of),
    }
}
