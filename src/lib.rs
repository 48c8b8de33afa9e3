//! COVID-19 time-series SDK for Rust.
//!
//! Fetches the Johns Hopkins CSSE wide-format tables (confirmed, deaths,
//! recovered), normalizes them, and derives per-country snapshots, global
//! totals, trailing-window time series and continent rollups. Every query
//! fetches fresh data; nothing is cached between calls.
//!
//! # Quick start
//!
//! ```no_run
//! use covid_trends_sdk::CovidSdk;
//!
//! let sdk = CovidSdk::builder().build().unwrap();
//!
//! let world = sdk.global_snapshot().unwrap();
//! println!("{} confirmed in {} countries", world.total_confirmed, world.countries_affected);
//!
//! let last_month = sdk.time_series(30).unwrap();
//! ```
//!
//! The aggregation functions in [`aggregate`] are pure and can be driven from
//! local fixtures through [`Dataset`] without any network access.

pub mod aggregate;
#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod continents;
pub mod dates;
pub mod error;
pub mod export;
pub mod fetcher;
pub mod models;
pub mod normalize;
pub mod validation;

#[cfg(feature = "async")]
pub use async_client::AsyncCovidSdk;
pub use config::SourceConfig;
pub use continents::Continent;
pub use error::{CovidError, FetchError, Result, ValidationError};
pub use normalize::Dataset;
pub use validation::{Anomaly, ValidationReport};

use chrono::NaiveDate;
use indexmap::IndexMap;
use reqwest::blocking::Client;
use std::fmt;
use std::time::Duration;

use crate::fetcher::RawTables;
use crate::models::{
    ContinentSnapshot, ContinentTimeSeriesPoint, CountrySnapshot, GlobalSnapshot, Metric,
    RankedCountry, TimeSeriesPoint, TrendIndicators,
};

// ---------------------------------------------------------------------------
// CovidSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CovidSdk`] instance.
///
/// Use [`CovidSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CovidSdkBuilder::build) to create the SDK.
#[derive(Debug, Default)]
pub struct CovidSdkBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    health_timeout: Option<Duration>,
}

impl CovidSdkBuilder {
    /// Set the base URL the three table file names are appended to.
    ///
    /// If not set, `COVID_DATA_BASE_URL` is used when present, otherwise the
    /// public JHU CSSE repository.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the per-table download timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the timeout used by [`CovidSdk::health_check`]. Defaults to 10 seconds.
    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = Some(timeout);
        self
    }

    /// Resolve the configuration without building a client.
    pub fn config(&self) -> SourceConfig {
        let mut config = SourceConfig::from_env();
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(timeout) = self.health_timeout {
            config.health_timeout = timeout;
        }
        config
    }

    /// Build the SDK. No request is made until the first query.
    pub fn build(self) -> Result<CovidSdk> {
        CovidSdk::with_config(self.config())
    }
}

// ---------------------------------------------------------------------------
// CovidSdk
// ---------------------------------------------------------------------------

/// The main entry point for the SDK.
///
/// Holds only its [`SourceConfig`] and an HTTP client. Each query method
/// fetches the three tables, validates them, aggregates, validates the result
/// and returns it. Failures surface as [`CovidError::Fetch`] or
/// [`CovidError::Validation`]; soft anomalies are logged and dropped.
pub struct CovidSdk {
    config: SourceConfig,
    client: Client,
}

impl CovidSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> CovidSdkBuilder {
        CovidSdkBuilder::default()
    }

    /// Construct directly from a resolved configuration.
    pub fn with_config(config: SourceConfig) -> Result<Self> {
        let client = fetcher::build_client(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    // -- Fetching ----------------------------------------------------------

    /// Fetch the three raw tables without normalizing them.
    pub fn fetch_raw(&self) -> Result<RawTables> {
        fetcher::fetch_raw_tables(&self.client, &self.config)
    }

    /// Fetch, structurally check and normalize the three tables.
    pub fn fetch_dataset(&self) -> Result<Dataset> {
        let raw = self.fetch_raw()?;
        dataset_from_raw(&raw)
    }

    /// Whether the source answers within the health timeout.
    pub fn health_check(&self) -> bool {
        fetcher::health_check(&self.client, &self.config)
    }

    // -- Queries -------------------------------------------------------------

    /// Latest totals per country, sorted by confirmed cases, descending.
    pub fn country_snapshots(&self) -> Result<Vec<CountrySnapshot>> {
        let dataset = self.fetch_dataset()?;
        checked_country_snapshots(&dataset, dates::today())
    }

    /// World totals across every country.
    pub fn global_snapshot(&self) -> Result<GlobalSnapshot> {
        let dataset = self.fetch_dataset()?;
        checked_global_snapshot(&dataset, dates::today())
    }

    /// Global totals for each of the last `days` dates, ascending.
    pub fn time_series(&self, days: usize) -> Result<Vec<TimeSeriesPoint>> {
        let dataset = self.fetch_dataset()?;
        checked_time_series(&dataset, days)
    }

    /// One time series per requested country, on a shared date window.
    pub fn country_time_series<S: AsRef<str>>(
        &self,
        countries: &[S],
        days: usize,
    ) -> Result<IndexMap<String, Vec<TimeSeriesPoint>>> {
        let dataset = self.fetch_dataset()?;
        Ok(aggregate::country_time_series(&dataset, countries, days)?)
    }

    /// Country snapshots rolled up by continent.
    pub fn continent_snapshots(&self) -> Result<Vec<ContinentSnapshot>> {
        let dataset = self.fetch_dataset()?;
        let countries = checked_country_snapshots(&dataset, dates::today())?;
        Ok(aggregate::continent_snapshots(&countries, dates::today()))
    }

    /// Per-continent totals for each of the last `days` dates.
    pub fn continent_time_series(&self, days: usize) -> Result<Vec<ContinentTimeSeriesPoint>> {
        let dataset = self.fetch_dataset()?;
        Ok(aggregate::continent_time_series(&dataset, days)?)
    }

    /// Daily and weekly movement at the end of a `days`-long global window.
    ///
    /// `None` when the window holds fewer than eight points.
    pub fn trend_indicators(&self, days: usize) -> Result<Option<TrendIndicators>> {
        let points = self.time_series(days)?;
        Ok(aggregate::trend_indicators(&points))
    }

    /// The `n` countries with the highest `metric`.
    pub fn top_countries(&self, metric: Metric, n: usize) -> Result<Vec<RankedCountry>> {
        let countries = self.country_snapshots()?;
        Ok(aggregate::top_countries(&countries, metric, n))
    }
}

impl fmt::Display for CovidSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CovidSdk(base_url={}, timeout={:?})",
            self.config.base_url, self.config.timeout
        )
    }
}

// ---------------------------------------------------------------------------
// Validated pipeline steps (shared with the async client)
// ---------------------------------------------------------------------------

/// Run the raw-row check on each table, then normalize.
pub fn dataset_from_raw(raw: &RawTables) -> Result<Dataset> {
    for kind in models::DatasetKind::ALL {
        validation::validate_raw_rows(raw.table(kind))?;
    }
    Ok(Dataset::from_raw(&raw.confirmed, &raw.deaths, &raw.recovered))
}

/// Country snapshots that passed the country-snapshot check.
pub fn checked_country_snapshots(dataset: &Dataset, as_of: NaiveDate) -> Result<Vec<CountrySnapshot>> {
    let countries = aggregate::country_snapshots(dataset, as_of);
    validation::validate_country_snapshots(&countries)?;
    Ok(countries)
}

/// Global snapshot that passed both the country and global checks.
pub fn checked_global_snapshot(dataset: &Dataset, as_of: NaiveDate) -> Result<GlobalSnapshot> {
    let countries = checked_country_snapshots(dataset, as_of)?;
    let global = aggregate::global_snapshot(&countries, as_of);
    validation::validate_global_snapshot(&global)?;
    Ok(global)
}

/// Global time series that passed the time-series check.
pub fn checked_time_series(dataset: &Dataset, days: usize) -> Result<Vec<TimeSeriesPoint>> {
    let points = aggregate::time_series(dataset, days)?;
    validation::validate_time_series(&points)?;
    Ok(points)
}
