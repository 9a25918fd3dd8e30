// Data cleaning: fill defaults and derive computed columns
// Author: Gabriel Demetrios Lafis

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::data::{columns, Dataset, RawRow, Title, YearAdded};

/// Value used for a missing country under the fill-unknown policy
pub const DEFAULT_COUNTRY: &str = "Unknown";
/// Value used for a missing cast list
pub const DEFAULT_CAST: &str = "No cast information";
/// Value used for a missing director
pub const DEFAULT_DIRECTOR: &str = "No director information";

/// How to treat a missing country value
///
/// Both behaviors exist in the wild: dashboards that count countries expect
/// the filled variant, while exports meant for further processing keep the
/// field absent. The choice is a configuration flag, not a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCountryPolicy {
    /// Fill missing countries with the literal "Unknown"
    #[default]
    FillUnknown,
    /// Leave missing countries absent
    LeaveMissing,
}

/// Clean accepted rows into a dataset
///
/// Pure and total: every accepted row becomes exactly one record, and no
/// input can make cleaning fail. Date-parse failures are data (missing),
/// not errors.
pub fn clean(headers: &[String], rows: &[RawRow], policy: MissingCountryPolicy) -> Dataset {
    let index = ColumnIndex::new(headers);
    let titles = rows
        .iter()
        .map(|row| clean_row(&index, row, policy))
        .collect();
    Dataset::new(titles)
}

/// Header-name to field-position lookup
///
/// The first occurrence wins when a source repeats a header name.
struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    fn new(headers: &[String]) -> Self {
        let mut positions = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            positions.entry(header.trim().to_string()).or_insert(i);
        }
        ColumnIndex { positions }
    }

    /// Get a row's value for a named column; blank fields count as missing
    fn value<'a>(&self, row: &'a RawRow, column: &str) -> Option<&'a str> {
        self.positions
            .get(column)
            .and_then(|&i| row.fields.get(i))
            .map(|f| f.as_str())
            .filter(|f| !f.trim().is_empty())
    }
}

fn clean_row(index: &ColumnIndex, row: &RawRow, policy: MissingCountryPolicy) -> Title {
    let release_year = index
        .value(row, columns::RELEASE_YEAR)
        .and_then(|v| v.trim().parse::<i32>().ok());

    let date_added = index
        .value(row, columns::DATE_ADDED)
        .map(|v| v.to_string());

    let year_added = match date_added.as_deref().and_then(parse_year) {
        Some(year) => YearAdded::Year(year),
        None => match release_year {
            Some(year) => YearAdded::Year(year),
            None => YearAdded::Missing,
        },
    };

    let country = match (index.value(row, columns::COUNTRY), policy) {
        (Some(country), _) => Some(country.to_string()),
        (None, MissingCountryPolicy::FillUnknown) => Some(DEFAULT_COUNTRY.to_string()),
        (None, MissingCountryPolicy::LeaveMissing) => None,
    };

    Title {
        show_id: index
            .value(row, columns::SHOW_ID)
            .unwrap_or_default()
            .to_string(),
        content_type: index
            .value(row, columns::TYPE)
            .unwrap_or_default()
            .to_string(),
        title: index
            .value(row, columns::TITLE)
            .unwrap_or_default()
            .to_string(),
        director: index
            .value(row, columns::DIRECTOR)
            .unwrap_or(DEFAULT_DIRECTOR)
            .to_string(),
        cast: index
            .value(row, columns::CAST)
            .unwrap_or(DEFAULT_CAST)
            .to_string(),
        country,
        date_added,
        release_year,
        rating: index.value(row, columns::RATING).map(|v| v.to_string()),
        duration: index
            .value(row, columns::DURATION)
            .unwrap_or_default()
            .to_string(),
        listed_in: index
            .value(row, columns::LISTED_IN)
            .unwrap_or_default()
            .to_string(),
        year_added,
    }
}

/// Extract the calendar year from a date-added value
///
/// Tolerates the formats seen in catalog exports; anything unrecognized is
/// treated as missing so the release-year fallback applies.
fn parse_year(text: &str) -> Option<i32> {
    let text = text.trim();
    const FORMATS: [&str; 4] = ["%B %d, %Y", "%Y-%m-%d", "%m/%d/%Y", "%d-%b-%y"];

    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date.year());
        }
    }

    None
}
