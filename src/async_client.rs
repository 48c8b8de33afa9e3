//! Async wrapper around [`CovidSdk`] for use in async runtimes (Tokio, etc.).
//!
//! The three table downloads are dispatched to the blocking thread pool via
//! [`tokio::task::spawn_blocking`] and joined with [`tokio::try_join!`]; the
//! first failure is returned and the remaining results are dropped unread.
//! Aggregation runs on the calling task since it is pure and fast.
//!
//! # Example
//!
//! ```no_run
//! use covid_trends_sdk::AsyncCovidSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncCovidSdk::builder().build().await.unwrap();
//!     let world = sdk.global_snapshot().await.unwrap();
//!     let series = sdk.time_series(14).await.unwrap();
//! }
//! ```

use indexmap::IndexMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::SourceConfig;
use crate::error::{CovidError, Result};
use crate::fetcher::{self, RawTables};
use crate::models::{
    ContinentSnapshot, ContinentTimeSeriesPoint, CountrySnapshot, DatasetKind, GlobalSnapshot,
    Metric, RankedCountry, RawRow, TimeSeriesPoint, TrendIndicators,
};
use crate::normalize::Dataset;
use crate::{aggregate, dates, CovidSdk, CovidSdkBuilder};

// ---------------------------------------------------------------------------
// AsyncCovidSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncCovidSdk`] instance.
#[derive(Debug, Default)]
pub struct AsyncCovidSdkBuilder {
    inner: CovidSdkBuilder,
}

impl AsyncCovidSdkBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.base_url(url);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    pub fn health_timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.health_timeout(timeout);
        self
    }

    /// Build the async SDK.
    ///
    /// Checks that an HTTP client can be constructed for the configuration,
    /// on the blocking pool.
    pub async fn build(self) -> Result<AsyncCovidSdk> {
        let config = Arc::new(self.inner.config());
        let probe = config.clone();
        tokio::task::spawn_blocking(move || fetcher::build_client(&probe).map(drop))
            .await
            .map_err(join_error)??;
        Ok(AsyncCovidSdk { config })
    }
}

// ---------------------------------------------------------------------------
// AsyncCovidSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`CovidSdk`].
///
/// Holds only the configuration. Blocking HTTP clients are created and
/// dropped on the blocking pool, never on an async worker thread.
#[derive(Debug, Clone)]
pub struct AsyncCovidSdk {
    config: Arc<SourceConfig>,
}

impl AsyncCovidSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncCovidSdkBuilder {
        AsyncCovidSdkBuilder::default()
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// Escape hatch for anything not wrapped below.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&CovidSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let config = SourceConfig::clone(&self.config);
        tokio::task::spawn_blocking(move || -> Result<T> {
            let sdk = CovidSdk::with_config(config)?;
            f(&sdk)
        })
        .await
        .map_err(join_error)?
    }

    async fn fetch_table(&self, kind: DatasetKind) -> Result<Vec<RawRow>> {
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || -> Result<Vec<RawRow>> {
            let client = fetcher::build_client(&config)?;
            Ok(fetcher::fetch_table(&client, &config, kind)?)
        })
        .await
        .map_err(join_error)?
    }

    /// Fetch the three raw tables concurrently.
    pub async fn fetch_raw(&self) -> Result<RawTables> {
        let (confirmed, deaths, recovered) = tokio::try_join!(
            self.fetch_table(DatasetKind::Confirmed),
            self.fetch_table(DatasetKind::Deaths),
            self.fetch_table(DatasetKind::Recovered),
        )?;
        Ok(RawTables {
            confirmed,
            deaths,
            recovered,
        })
    }

    /// Fetch, structurally check and normalize the three tables.
    pub async fn fetch_dataset(&self) -> Result<Dataset> {
        let raw = self.fetch_raw().await?;
        crate::dataset_from_raw(&raw)
    }

    pub async fn health_check(&self) -> bool {
        self.run(|s| Ok(s.health_check())).await.unwrap_or(false)
    }

    pub async fn country_snapshots(&self) -> Result<Vec<CountrySnapshot>> {
        let dataset = self.fetch_dataset().await?;
        crate::checked_country_snapshots(&dataset, dates::today())
    }

    pub async fn global_snapshot(&self) -> Result<GlobalSnapshot> {
        let dataset = self.fetch_dataset().await?;
        crate::checked_global_snapshot(&dataset, dates::today())
    }

    pub async fn time_series(&self, days: usize) -> Result<Vec<TimeSeriesPoint>> {
        let dataset = self.fetch_dataset().await?;
        crate::checked_time_series(&dataset, days)
    }

    pub async fn country_time_series(
        &self,
        countries: &[String],
        days: usize,
    ) -> Result<IndexMap<String, Vec<TimeSeriesPoint>>> {
        let dataset = self.fetch_dataset().await?;
        Ok(aggregate::country_time_series(&dataset, countries, days)?)
    }

    pub async fn continent_snapshots(&self) -> Result<Vec<ContinentSnapshot>> {
        let dataset = self.fetch_dataset().await?;
        let countries = crate::checked_country_snapshots(&dataset, dates::today())?;
        Ok(aggregate::continent_snapshots(&countries, dates::today()))
    }

    pub async fn continent_time_series(&self, days: usize) -> Result<Vec<ContinentTimeSeriesPoint>> {
        let dataset = self.fetch_dataset().await?;
        Ok(aggregate::continent_time_series(&dataset, days)?)
    }

    pub async fn trend_indicators(&self, days: usize) -> Result<Option<TrendIndicators>> {
        let points = self.time_series(days).await?;
        Ok(aggregate::trend_indicators(&points))
    }

    pub async fn top_countries(&self, metric: Metric, n: usize) -> Result<Vec<RankedCountry>> {
        let countries = self.country_snapshots().await?;
        Ok(aggregate::top_countries(&countries, metric, n))
    }
}

fn join_error(e: tokio::task::JoinError) -> CovidError {
    CovidError::InvalidArgument(format!("Task join error: {e}"))
}

