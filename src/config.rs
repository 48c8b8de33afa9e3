use std::collections::HashMap;
use std::time::Duration;

use crate::models::DatasetKind;

pub const DEFAULT_BASE_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series";

/// Environment variable that overrides [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "COVID_DATA_BASE_URL";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Human-readable source label stamped into combined exports.
pub const DATA_SOURCE_LABEL: &str = "Johns Hopkins CSSE COVID-19 Dataset";

/// Remote file name for each table.
pub fn dataset_file(kind: DatasetKind) -> &'static str {
    match kind {
        DatasetKind::Confirmed => "time_series_covid19_confirmed_global.csv",
        DatasetKind::Deaths => "time_series_covid19_deaths_global.csv",
        DatasetKind::Recovered => "time_series_covid19_recovered_global.csv",
    }
}

pub fn dataset_files() -> HashMap<DatasetKind, &'static str> {
    DatasetKind::ALL
        .into_iter()
        .map(|kind| (kind, dataset_file(kind)))
        .collect()
}

/// Where and how the three remote tables are fetched.
///
/// Passed explicitly to every fetch function; there is no process-wide
/// client state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Base URL the per-kind file names are appended to.
    pub base_url: String,
    /// Timeout for each table download.
    pub timeout: Duration,
    /// Timeout for [`crate::fetcher::health_check`].
    pub health_timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }
}

impl SourceConfig {
    /// Defaults, with the base URL taken from `COVID_DATA_BASE_URL` when set
    /// and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = base_url_from_env() {
            config.base_url = url;
        }
        config
    }

    /// Full URL of the table for `kind`.
    pub fn url_for(&self, kind: DatasetKind) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            dataset_file(kind)
        )
    }
}

pub(crate) fn base_url_from_env() -> Option<String> {
    std::env::var(BASE_URL_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
