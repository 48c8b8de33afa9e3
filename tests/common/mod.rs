//! Shared test fixtures for the COVID SDK integration tests.
//!
//! Provides CSV table builders, a small sample dataset, and `serve()`, a
//! loopback HTTP responder with canned bodies and status codes.

#![allow(dead_code)]

use covid_trends_sdk::models::{CountrySnapshot, TimeSeriesPoint};
use covid_trends_sdk::Dataset;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

pub const HEADER: &str = "Province/State,Country/Region,Lat,Long";

/// Ten consecutive days from 1/22/20 to 1/31/20.
pub const DATES: [&str; 10] = [
    "1/22/20", "1/23/20", "1/24/20", "1/25/20", "1/26/20", "1/27/20", "1/28/20", "1/29/20",
    "1/30/20", "1/31/20",
];

/// Build a wide-format CSV document.
///
/// Each row is `(province, country, values)`; coordinates are fixed at
/// `10.0,20.0`. Provinces containing commas are quoted.
pub fn table(dates: &[&str], rows: &[(&str, &str, &[u64])]) -> String {
    let mut out = String::from(HEADER);
    for d in dates {
        out.push(',');
        out.push_str(d);
    }
    out.push('\n');
    for (province, country, values) in rows {
        out.push_str(&quote(province));
        out.push(',');
        out.push_str(&quote(country));
        out.push_str(",10.0,20.0");
        for v in values.iter() {
            out.push(',');
            out.push_str(&v.to_string());
        }
        out.push('\n');
    }
    out
}

fn quote(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

pub fn sample_confirmed() -> String {
    table(
        &DATES,
        &[
            ("", "France", &[0, 1, 2, 4, 8, 16, 32, 64, 100, 150]),
            ("Reunion", "France", &[0, 0, 0, 1, 1, 2, 3, 5, 8, 10]),
            ("", "US", &[1, 1, 2, 2, 5, 10, 20, 40, 80, 200]),
            ("", "Brazil", &[0, 0, 0, 0, 0, 1, 2, 3, 4, 5]),
            ("", "Diamond Princess", &[0, 0, 10, 10, 20, 20, 30, 30, 40, 40]),
            ("", "Atlantis", &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        ],
    )
}

pub fn sample_deaths() -> String {
    table(
        &DATES,
        &[
            ("", "France", &[0, 0, 0, 0, 1, 1, 2, 3, 5, 8]),
            ("Reunion", "France", &[0, 0, 0, 0, 0, 0, 0, 0, 0, 1]),
            ("", "US", &[0, 0, 0, 0, 0, 1, 1, 2, 4, 10]),
            ("", "Brazil", &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
            ("", "Diamond Princess", &[0, 0, 0, 0, 0, 0, 1, 1, 1, 1]),
            ("", "Atlantis", &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        ],
    )
}

pub fn sample_recovered() -> String {
    table(
        &DATES,
        &[
            ("", "France", &[0, 0, 0, 1, 2, 4, 8, 16, 30, 50]),
            ("Reunion", "France", &[0, 0, 0, 0, 0, 1, 1, 2, 3, 4]),
            ("", "US", &[0, 0, 0, 0, 1, 2, 4, 8, 16, 40]),
            ("", "Brazil", &[0, 0, 0, 0, 0, 0, 0, 1, 1, 2]),
            ("", "Diamond Princess", &[0, 0, 0, 5, 5, 10, 10, 15, 15, 20]),
            ("", "Atlantis", &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
        ],
    )
}

/// The three sample tables, normalized.
pub fn sample_dataset() -> Dataset {
    Dataset::from_csv_strs(&sample_confirmed(), &sample_deaths(), &sample_recovered()).unwrap()
}

/// A well-formed country snapshot for validator tests.
pub fn country(name: &str, confirmed: i64, deaths: i64, recovered: i64) -> CountrySnapshot {
    let rate = |part: i64| covid_trends_sdk::aggregate::rate(part, confirmed);
    CountrySnapshot {
        country: name.to_string(),
        confirmed,
        deaths,
        recovered,
        active: (confirmed - deaths - recovered).max(0),
        mortality_rate: rate(deaths),
        recovery_rate: rate(recovered),
        last_update: "2022-01-15".to_string(),
    }
}

pub fn point(date: &str, confirmed: i64, deaths: i64, recovered: i64) -> TimeSeriesPoint {
    TimeSeriesPoint::from_totals(date, confirmed, deaths, recovered)
}

pub fn as_of() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2020, 2, 1).unwrap()
}

// ---------------------------------------------------------------------------
// Loopback HTTP responder
// ---------------------------------------------------------------------------

/// A canned response for one path.
#[derive(Clone)]
pub struct Route {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Route {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Start a responder on an ephemeral port and return its base URL.
///
/// Paths are matched exactly against `routes` (e.g.
/// `/time_series_covid19_confirmed_global.csv`); anything else is a 404. The
/// listener thread is detached and lives until the test process exits.
pub fn serve(routes: HashMap<String, Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { continue };
            let routes = routes.clone();
            thread::spawn(move || respond(stream, &routes));
        }
    });

    format!("http://{addr}")
}

/// Serve the three sample tables.
pub fn serve_sample() -> String {
    serve(sample_routes())
}

pub fn sample_routes() -> HashMap<String, Route> {
    HashMap::from([
        (path("confirmed"), Route::ok(sample_confirmed())),
        (path("deaths"), Route::ok(sample_deaths())),
        (path("recovered"), Route::ok(sample_recovered())),
    ])
}

/// Request path for one of the three tables.
pub fn path(kind: &str) -> String {
    format!("/time_series_covid19_{kind}_global.csv")
}

fn respond(mut stream: TcpStream, routes: &HashMap<String, Route>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let request = String::from_utf8_lossy(&buf);
    let target = request.split_whitespace().nth(1).unwrap_or("/").to_string();
    let route = routes.get(&target).cloned().unwrap_or(Route::status(404));

    if !route.delay.is_zero() {
        thread::sleep(route.delay);
    }

    let reason = match route.status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        route.status,
        reason,
        route.body.len(),
        route.body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
