//! Country-to-continent mapping and continent rollups.

mod common;

use common::{as_of, country};
use covid_trends_sdk::aggregate::{continent_snapshots, continent_time_series, country_snapshots};
use covid_trends_sdk::continents::{continent_of, countries_in, is_mapped, COUNTRY_CONTINENTS};
use covid_trends_sdk::{Continent, Dataset};

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

#[test]
fn maps_source_spellings() {
    assert_eq!(continent_of("US"), Continent::NorthAmerica);
    assert_eq!(continent_of("Korea, South"), Continent::Asia);
    assert_eq!(continent_of("Taiwan*"), Continent::Asia);
    assert_eq!(continent_of("Congo (Kinshasa)"), Continent::Africa);
    assert_eq!(continent_of("Brazil"), Continent::SouthAmerica);
    assert_eq!(continent_of("Australia"), Continent::Oceania);
    assert_eq!(continent_of("Germany"), Continent::Europe);
}

#[test]
fn ships_and_unknowns_fall_back_to_other() {
    assert_eq!(continent_of("Diamond Princess"), Continent::Other);
    assert_eq!(continent_of("Atlantis"), Continent::Other);
    assert_eq!(continent_of(""), Continent::Other);
    assert!(!is_mapped("Atlantis"));
    assert!(is_mapped("France"));
}

#[test]
fn mapping_is_case_sensitive() {
    assert_eq!(continent_of("france"), Continent::Other);
}

#[test]
fn countries_in_lists_members() {
    let europe: Vec<&str> = countries_in(Continent::Europe).collect();
    assert!(europe.contains(&"France"));
    assert!(!europe.contains(&"US"));

    let total: usize = Continent::ALL.iter().map(|&c| countries_in(c).count()).sum();
    assert_eq!(total, COUNTRY_CONTINENTS.len());
}

#[test]
fn continent_names_serialize_with_spaces() {
    assert_eq!(Continent::NorthAmerica.to_string(), "North America");
    assert_eq!(
        serde_json::to_string(&Continent::SouthAmerica).unwrap(),
        "\"South America\""
    );
}

// ---------------------------------------------------------------------------
// continent_snapshots
// ---------------------------------------------------------------------------

#[test]
fn rollup_on_sample_dataset() {
    let countries = country_snapshots(&common::sample_dataset(), as_of());
    let continents = continent_snapshots(&countries, as_of());

    let order: Vec<Continent> = continents.iter().map(|c| c.continent).collect();
    assert_eq!(
        order,
        vec![
            Continent::NorthAmerica,
            Continent::Europe,
            Continent::Other,
            Continent::SouthAmerica
        ]
    );

    let other = &continents[2];
    assert_eq!(other.confirmed, 40);
    assert_eq!(other.countries, vec!["Diamond Princess", "Atlantis"]);
    assert_eq!(other.last_update, "2020-02-01");
}

#[test]
fn rollup_partitions_countries() {
    let countries = country_snapshots(&common::sample_dataset(), as_of());
    let continents = continent_snapshots(&countries, as_of());

    let confirmed: i64 = continents.iter().map(|c| c.confirmed).sum();
    let world: i64 = countries.iter().map(|c| c.confirmed).sum();
    assert_eq!(confirmed, world);

    let mut members: Vec<&str> = continents
        .iter()
        .flat_map(|c| c.countries.iter().map(String::as_str))
        .collect();
    members.sort_unstable();
    let mut names: Vec<&str> = countries.iter().map(|c| c.country.as_str()).collect();
    names.sort_unstable();
    assert_eq!(members, names);
}

#[test]
fn rollup_drops_zero_confirmed_continents() {
    let countries = vec![country("Kenya", 0, 0, 0), country("Japan", 12, 1, 3)];
    let continents = continent_snapshots(&countries, as_of());

    assert_eq!(continents.len(), 1);
    assert_eq!(continents[0].continent, Continent::Asia);
    assert_eq!(continents[0].mortality_rate, 8.33);
    assert_eq!(continents[0].recovery_rate, 25.0);
    assert_eq!(continents[0].active, 8);
}

#[test]
fn rollup_of_nothing_is_empty() {
    assert!(continent_snapshots(&[], as_of()).is_empty());
}

// ---------------------------------------------------------------------------
// continent_time_series
// ---------------------------------------------------------------------------

#[test]
fn time_series_carries_every_continent() {
    let points = continent_time_series(&common::sample_dataset(), 2).unwrap();
    assert_eq!(points.len(), 2);

    let last = &points[1];
    assert_eq!(last.date, "1/31/20");
    assert_eq!(last.continents.len(), Continent::ALL.len());
    assert_eq!(last.get(Continent::Europe).confirmed, 160);
    assert_eq!(last.get(Continent::NorthAmerica).deaths, 10);
    assert_eq!(last.get(Continent::Other).recovered, 20);
    assert_eq!(last.get(Continent::Africa).confirmed, 0);
}

#[test]
fn time_series_active_is_not_floored() {
    let c = common::table(&["1/22/20"], &[("", "Japan", &[1])]);
    let d = common::table(&["1/22/20"], &[("", "Japan", &[2])]);
    let dataset = Dataset::from_csv_strs(&c, &d, &d).unwrap();

    let points = continent_time_series(&dataset, 1).unwrap();
    assert_eq!(points[0].get(Continent::Asia).active, -3);
}

#[test]
fn time_series_fails_without_confirmed_data() {
    assert!(continent_time_series(&Dataset::default(), 5).is_err());
}
