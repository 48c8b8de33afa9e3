//! Trend indicators, direction classification and rankings.

mod common;

use common::{as_of, country, point};
use covid_trends_sdk::aggregate::{
    country_snapshots, percent_change, time_series, top_countries, trend_direction,
    trend_indicators,
};
use covid_trends_sdk::models::{Metric, TimeSeriesPoint, TrendDirection};

fn linear(days: usize, step: i64) -> Vec<TimeSeriesPoint> {
    (0..days)
        .map(|i| {
            let c = (i as i64 + 1) * step;
            point(&format!("3/{}/20", i + 1), c, c / 10, c / 2)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// trend_indicators
// ---------------------------------------------------------------------------

#[test]
fn indicators_on_sample_window() {
    let points = time_series(&common::sample_dataset(), 10).unwrap();
    let t = trend_indicators(&points).unwrap();

    assert_eq!(t.date, "1/31/20");
    assert_eq!(t.new_confirmed, 173);
    assert_eq!(t.new_deaths, 10);
    assert_eq!(t.new_recovered, 51);
    assert_eq!(t.confirmed_trend, 391);
    assert_eq!(t.deaths_trend, 20);
    assert_eq!(t.recovered_trend, 116);
    assert!((t.week_avg_confirmed - 388.0 / 6.0).abs() < 1e-9);
    assert!((t.week_avg_deaths - 20.0 / 6.0).abs() < 1e-9);
}

#[test]
fn indicators_need_eight_points() {
    assert!(trend_indicators(&linear(7, 10)).is_none());
    assert!(trend_indicators(&[]).is_none());
    assert!(trend_indicators(&linear(8, 10)).is_some());
}

#[test]
fn constant_growth_has_constant_average() {
    let t = trend_indicators(&linear(12, 100)).unwrap();
    assert_eq!(t.new_confirmed, 100);
    assert_eq!(t.confirmed_trend, 700);
    assert_eq!(t.week_avg_confirmed, 100.0);
}

#[test]
fn indicators_can_go_negative_after_revision() {
    let mut points = linear(8, 10);
    points[7] = point("3/8/20", 5, 0, 0);
    let t = trend_indicators(&points).unwrap();
    assert_eq!(t.new_confirmed, 5 - 70);
    assert!(t.week_avg_confirmed < 0.0);
}

// ---------------------------------------------------------------------------
// percent_change / trend_direction
// ---------------------------------------------------------------------------

#[test]
fn percent_change_handles_zero_base() {
    assert_eq!(percent_change(150.0, 100.0), Some(50.0));
    assert_eq!(percent_change(50.0, 100.0), Some(-50.0));
    assert_eq!(percent_change(5.0, 0.0), None);
}

#[test]
fn direction_uses_ten_percent_band() {
    assert_eq!(trend_direction(111.0, 100.0), TrendDirection::Up);
    assert_eq!(trend_direction(89.0, 100.0), TrendDirection::Down);
    assert_eq!(trend_direction(105.0, 100.0), TrendDirection::Flat);
    assert_eq!(trend_direction(95.0, 100.0), TrendDirection::Flat);
}

#[test]
fn direction_against_zero_reference() {
    assert_eq!(trend_direction(3.0, 0.0), TrendDirection::Up);
    assert_eq!(trend_direction(-3.0, 0.0), TrendDirection::Down);
    assert_eq!(trend_direction(0.0, 0.0), TrendDirection::Flat);
}

// ---------------------------------------------------------------------------
// top_countries
// ---------------------------------------------------------------------------

#[test]
fn top_by_confirmed_matches_snapshot_order() {
    let snapshots = country_snapshots(&common::sample_dataset(), as_of());
    let top = top_countries(&snapshots, Metric::Confirmed, 3);

    let names: Vec<&str> = top.iter().map(|r| r.snapshot.country.as_str()).collect();
    assert_eq!(names, vec!["US", "France", "Diamond Princess"]);
    let ranks: Vec<usize> = top.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
}

#[test]
fn top_by_other_metrics() {
    let snapshots = vec![
        country("A", 100, 1, 90),
        country("B", 50, 9, 10),
        country("C", 80, 2, 5),
    ];

    let by_deaths = top_countries(&snapshots, Metric::Deaths, 1);
    assert_eq!(by_deaths[0].snapshot.country, "B");

    let by_active = top_countries(&snapshots, Metric::Active, 3);
    let names: Vec<&str> = by_active.iter().map(|r| r.snapshot.country.as_str()).collect();
    assert_eq!(names, vec!["C", "B", "A"]);
}

#[test]
fn top_n_larger_than_input_returns_everything() {
    let snapshots = vec![country("A", 1, 0, 0)];
    assert_eq!(top_countries(&snapshots, Metric::Recovered, 10).len(), 1);
    assert!(top_countries(&snapshots, Metric::Recovered, 0).is_empty());
}

#[test]
fn ranked_country_flattens_when_serialized() {
    let top = top_countries(&[country("Peru", 10, 1, 2)], Metric::Confirmed, 1);
    let json = serde_json::to_value(&top[0]).unwrap();
    assert_eq!(json["rank"], 1);
    assert_eq!(json["country"], "Peru");
    assert_eq!(json["confirmed"], 10);
}
