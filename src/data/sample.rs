// Built-in sample catalog used when every parse strategy fails
// Author: Gabriel Demetrios Lafis

use super::{columns, RawRow, RawTable};

const SAMPLE_COUNTRIES: [(&str, usize); 4] = [
    ("United States", 8),
    ("United Kingdom", 5),
    ("India", 4),
    ("Canada", 3),
];

const SAMPLE_YEARS: [i32; 8] = [2015, 2016, 2017, 2018, 2019, 2020, 2021, 2022];
const SAMPLE_RATINGS: [&str; 5] = ["TV-MA", "TV-14", "PG-13", "R", "PG"];
const SAMPLE_DURATIONS: [&str; 4] = ["120 min", "110 min", "95 min", "130 min"];
const SAMPLE_GENRES: [&str; 4] = ["Dramas", "Comedies", "Thrillers", "Action"];

/// Number of rows in the built-in sample catalog
pub const SAMPLE_ROW_COUNT: usize = 20;

/// Build the deterministic sample table
///
/// The schema matches the expected catalog schema exactly, so the sample
/// flows through reconciliation and cleaning like any real source. Director,
/// cast and date-added are left blank and pick up the cleaning defaults.
pub fn sample_table() -> RawTable {
    let headers: Vec<String> = vec![
        columns::SHOW_ID.to_string(),
        columns::TYPE.to_string(),
        columns::TITLE.to_string(),
        columns::DIRECTOR.to_string(),
        columns::CAST.to_string(),
        columns::COUNTRY.to_string(),
        columns::DATE_ADDED.to_string(),
        columns::RELEASE_YEAR.to_string(),
        columns::RATING.to_string(),
        columns::DURATION.to_string(),
        columns::LISTED_IN.to_string(),
    ];

    let countries: Vec<&str> = SAMPLE_COUNTRIES
        .iter()
        .flat_map(|(name, count)| std::iter::repeat(*name).take(*count))
        .collect();

    let mut table = RawTable::new(headers);

    for i in 0..SAMPLE_ROW_COUNT {
        let (content_type, title) = if i < 10 {
            ("Movie", format!("Movie {}", i + 1))
        } else {
            ("TV Show", format!("TV Show {}", i - 9))
        };

        let fields = vec![
            format!("s{}", i + 1),
            content_type.to_string(),
            title,
            String::new(),
            String::new(),
            countries[i].to_string(),
            String::new(),
            SAMPLE_YEARS[i % SAMPLE_YEARS.len()].to_string(),
            SAMPLE_RATINGS[i % SAMPLE_RATINGS.len()].to_string(),
            SAMPLE_DURATIONS[i % SAMPLE_DURATIONS.len()].to_string(),
            SAMPLE_GENRES[i % SAMPLE_GENRES.len()].to_string(),
        ];

        // Header counts as line 1, so the first sample row is line 2
        table.rows.push(RawRow::new(i + 2, fields));
    }

    table
}
