//! Short-horizon indicators and rankings derived from already-built views.

use crate::models::{
    CountrySnapshot, Metric, RankedCountry, TimeSeriesPoint, TrendDirection, TrendIndicators,
};

/// Minimum window length for [`trend_indicators`]: today, yesterday, and the
/// point a week earlier.
pub const MIN_TREND_POINTS: usize = 8;

/// Relative band (in percent) inside which a value counts as flat.
pub const FLAT_BAND_PERCENT: f64 = 10.0;

/// Daily and weekly movement at the end of `points`.
///
/// Returns `None` for fewer than [`MIN_TREND_POINTS`] points. The weekly
/// averages are the mean of the six day-over-day deltas inside the last seven
/// points.
pub fn trend_indicators(points: &[TimeSeriesPoint]) -> Option<TrendIndicators> {
    if points.len() < MIN_TREND_POINTS {
        return None;
    }

    let n = points.len();
    let latest = &points[n - 1];
    let yesterday = &points[n - 2];
    let week_ago = &points[n - 8];
    let last7 = &points[n - 7..];

    let mean_delta = |value: fn(&TimeSeriesPoint) -> i64| -> f64 {
        let total: i64 = last7
            .windows(2)
            .map(|pair| value(&pair[1]) - value(&pair[0]))
            .sum();
        total as f64 / (last7.len() - 1) as f64
    };

    Some(TrendIndicators {
        date: latest.date.clone(),
        new_confirmed: latest.confirmed - yesterday.confirmed,
        new_deaths: latest.deaths - yesterday.deaths,
        new_recovered: latest.recovered - yesterday.recovered,
        confirmed_trend: latest.confirmed - week_ago.confirmed,
        deaths_trend: latest.deaths - week_ago.deaths,
        recovered_trend: latest.recovered - week_ago.recovered,
        week_avg_confirmed: mean_delta(|p| p.confirmed),
        week_avg_deaths: mean_delta(|p| p.deaths),
    })
}

/// Percentage change from `previous` to `current`; `None` when `previous`
/// is zero.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous * 100.0)
    }
}

/// Classify `current` against a reference average with a ±10 % flat band.
/// A zero reference is flat only when `current` is zero too.
pub fn trend_direction(current: f64, average: f64) -> TrendDirection {
    match percent_change(current, average) {
        Some(diff) if diff > FLAT_BAND_PERCENT => TrendDirection::Up,
        Some(diff) if diff < -FLAT_BAND_PERCENT => TrendDirection::Down,
        Some(_) => TrendDirection::Flat,
        None if current > 0.0 => TrendDirection::Up,
        None if current < 0.0 => TrendDirection::Down,
        None => TrendDirection::Flat,
    }
}

impl Metric {
    pub fn of(&self, snapshot: &CountrySnapshot) -> i64 {
        match self {
            Metric::Confirmed => snapshot.confirmed,
            Metric::Deaths => snapshot.deaths,
            Metric::Recovered => snapshot.recovered,
            Metric::Active => snapshot.active,
        }
    }
}

/// The `n` countries with the highest `metric`, ranked from 1.
pub fn top_countries(snapshots: &[CountrySnapshot], metric: Metric, n: usize) -> Vec<RankedCountry> {
    let mut sorted: Vec<&CountrySnapshot> = snapshots.iter().collect();
    sorted.sort_by(|a, b| metric.of(b).cmp(&metric.of(a)));
    sorted
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, snapshot)| RankedCountry {
            rank: i + 1,
            snapshot: snapshot.clone(),
        })
        .collect()
}
