//! Remote retrieval of the three wide-format tables.
//!
//! Each table is downloaded as CSV over HTTP and decoded into [`RawRow`]s.
//! The three downloads run concurrently and are joined: if any one fails the
//! combined fetch fails and the other results are discarded. Nothing is
//! cached; every call goes to the network.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::thread;

use crate::config::SourceConfig;
use crate::error::{FetchError, Result};
use crate::models::{DatasetKind, RawRow};
use crate::normalize::parse_csv;

/// The three decoded tables of one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTables {
    pub confirmed: Vec<RawRow>,
    pub deaths: Vec<RawRow>,
    pub recovered: Vec<RawRow>,
}

impl RawTables {
    pub fn table(&self, kind: DatasetKind) -> &[RawRow] {
        match kind {
            DatasetKind::Confirmed => &self.confirmed,
            DatasetKind::Deaths => &self.deaths,
            DatasetKind::Recovered => &self.recovered,
        }
    }
}

/// Build a blocking HTTP client bounded by the configured fetch timeout.
pub fn build_client(config: &SourceConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|source| FetchError::Network {
            url: config.base_url.clone(),
            source,
        })?;
    Ok(client)
}

/// Map an error status to its fetch failure. `None` for success statuses.
pub fn classify_status(url: &str, status: StatusCode) -> Option<FetchError> {
    if status == StatusCode::NOT_FOUND {
        Some(FetchError::NotFound {
            url: url.to_string(),
        })
    } else if status.is_server_error() {
        Some(FetchError::Server {
            url: url.to_string(),
            status: status.as_u16(),
        })
    } else {
        None
    }
}

fn classify_transport(url: &str, source: reqwest::Error) -> FetchError {
    if source.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source,
        }
    }
}

/// Download `url` and return the body as text.
fn download_text(client: &Client, url: &str) -> std::result::Result<String, FetchError> {
    log::debug!("Downloading {url}");

    let resp = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/csv")
        .send()
        .map_err(|e| classify_transport(url, e))?;

    if let Some(err) = classify_status(url, resp.status()) {
        return Err(err);
    }
    let resp = resp
        .error_for_status()
        .map_err(|e| classify_transport(url, e))?;

    resp.text().map_err(|e| classify_transport(url, e))
}

/// Download and decode the table for one dataset kind.
pub fn fetch_table(
    client: &Client,
    config: &SourceConfig,
    kind: DatasetKind,
) -> std::result::Result<Vec<RawRow>, FetchError> {
    let url = config.url_for(kind);
    let body = download_text(client, &url)?;
    let rows = parse_csv(&body).map_err(|source| FetchError::Decode {
        url: url.clone(),
        source,
    })?;
    log::debug!("Fetched {} {} rows from {url}", rows.len(), kind);
    Ok(rows)
}

/// Fetch all three tables concurrently and join them.
///
/// Any single failure fails the whole fetch; when several fail, the first in
/// confirmed, deaths, recovered order is reported.
pub fn fetch_raw_tables(client: &Client, config: &SourceConfig) -> Result<RawTables> {
    let (confirmed, deaths, recovered) = thread::scope(|scope| {
        let confirmed = scope.spawn(|| fetch_table(client, config, DatasetKind::Confirmed));
        let deaths = scope.spawn(|| fetch_table(client, config, DatasetKind::Deaths));
        let recovered = scope.spawn(|| fetch_table(client, config, DatasetKind::Recovered));
        (join(confirmed), join(deaths), join(recovered))
    });

    let tables = RawTables {
        confirmed: confirmed?,
        deaths: deaths?,
        recovered: recovered?,
    };
    log::info!(
        "Fetched {} confirmed, {} deaths, {} recovered rows",
        tables.confirmed.len(),
        tables.deaths.len(),
        tables.recovered.len()
    );
    Ok(tables)
}

fn join(
    handle: thread::ScopedJoinHandle<'_, std::result::Result<Vec<RawRow>, FetchError>>,
) -> std::result::Result<Vec<RawRow>, FetchError> {
    match handle.join() {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Whether the confirmed table is reachable within the health timeout.
///
/// Never errors: any failure, including a non-success status, is `false`.
pub fn health_check(client: &Client, config: &SourceConfig) -> bool {
    let url = config.url_for(DatasetKind::Confirmed);
    match client.get(&url).timeout(config.health_timeout).send() {
        Ok(resp) => resp.status().is_success(),
        Err(e) => {
            log::debug!("Health check against {url} failed: {e}");
            false
        }
    }
}
