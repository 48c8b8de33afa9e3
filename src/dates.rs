//! `M/D/YY` date labels used as column headers by the source tables.
//!
//! Labels carry no leading zeros (`1/22/20`, `12/3/21`), so they do not sort
//! correctly as strings. Anything that orders dates goes through
//! [`parse_label`].

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}/\d{1,2}/\d{2}$").expect("date label pattern is valid")
});

/// Whether `label` has the shape of a date column header.
pub fn is_date_label(label: &str) -> bool {
    LABEL_RE.is_match(label)
}

/// Two-digit years below 50 are 20xx, the rest 19xx.
pub fn expand_year(yy: u32) -> i32 {
    if yy < 50 {
        2000 + yy as i32
    } else {
        1900 + yy as i32
    }
}

/// Parse a `M/D/YY` label. Returns `None` for anything that is not a real
/// calendar date in that shape.
pub fn parse_label(label: &str) -> Option<NaiveDate> {
    if !is_date_label(label) {
        return None;
    }
    let mut parts = label.split('/').map(|p| p.parse::<u32>().ok());
    let month = parts.next()??;
    let day = parts.next()??;
    let year = parts.next()??;
    NaiveDate::from_ymd_opt(expand_year(year), month, day)
}

/// Format a date back into the source's label shape.
pub fn format_label(date: NaiveDate) -> String {
    format!(
        "{}/{}/{:02}",
        date.month(),
        date.day(),
        date.year().rem_euclid(100)
    )
}

/// Chronological ordering for labels. Unparseable labels sort after every
/// parseable one and fall back to string order among themselves.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    match (parse_label(a), parse_label(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// ISO `YYYY-MM-DD` stamp used for `lastUpdate` fields.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
