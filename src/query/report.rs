// Aggregation engine: metrics, distributions and rankings over a view
// Author: Gabriel Demetrios Lafis

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::View;

/// Content type value for movies
pub const TYPE_MOVIE: &str = "Movie";
/// Content type value for TV shows
pub const TYPE_TV_SHOW: &str = "TV Show";

/// Number of entries kept in top-N rankings
pub const TOP_N: usize = 10;

/// One value-count pair in a frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

/// A categorical frequency table
///
/// Ordered by descending count; ties keep first-seen order. Consumers must
/// not re-sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Count occurrences of each value
    pub fn tally<I>(values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for value in values {
            if !counts.contains_key(&value) {
                order.push(value.clone());
            }
            *counts.entry(value).or_insert(0) += 1;
        }

        let mut entries: Vec<FrequencyEntry> = order
            .into_iter()
            .map(|value| {
                let count = counts[&value];
                FrequencyEntry { value, count }
            })
            .collect();

        // Stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        FrequencyTable { entries }
    }

    /// Get the entries, most frequent first
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// Get the number of distinct values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the count for a value
    pub fn count_of(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.value == value)
            .map(|e| e.count)
    }

    /// Get a new table holding only the first `n` entries
    pub fn head(&self, n: usize) -> FrequencyTable {
        FrequencyTable {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }
}

/// One year-count pair in the additions time series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Computed metrics, distributions and rankings for one view
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Number of rows in the view
    pub total_count: usize,
    /// Rows whose content type is "Movie"
    pub movie_count: usize,
    /// Rows whose content type is "TV Show"
    pub tv_show_count: usize,
    /// Number of distinct countries
    pub country_count: usize,
    pub type_distribution: FrequencyTable,
    pub country_distribution: FrequencyTable,
    pub rating_distribution: FrequencyTable,
    /// Titles added per year, sorted ascending by year (not by frequency)
    pub additions_by_year: Vec<YearCount>,
    pub top_countries: FrequencyTable,
    pub top_genres: FrequencyTable,
}

/// Summarize a view into a report
///
/// Pure and total: an empty view yields zero counts and empty tables.
pub fn summarize(view: &View) -> Report {
    let total_count = view.len();

    let movie_count = view
        .titles()
        .filter(|t| t.content_type == TYPE_MOVIE)
        .count();
    let tv_show_count = view
        .titles()
        .filter(|t| t.content_type == TYPE_TV_SHOW)
        .count();

    let type_distribution = FrequencyTable::tally(
        view.titles()
            .filter(|t| !t.content_type.is_empty())
            .map(|t| t.content_type.clone()),
    );

    let country_distribution =
        FrequencyTable::tally(view.titles().filter_map(|t| t.country.clone()));

    let rating_distribution =
        FrequencyTable::tally(view.titles().filter_map(|t| t.rating.clone()));

    let mut additions: BTreeMap<i32, usize> = BTreeMap::new();
    for title in view.titles() {
        if let Some(year) = title.year_added.year() {
            *additions.entry(year).or_insert(0) += 1;
        }
    }
    let additions_by_year = additions
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect();

    // A row contributes one count to each of its genres, duplicates included
    let top_genres = FrequencyTable::tally(view.titles().flat_map(|t| {
        t.listed_in
            .split(',')
            .map(|genre| genre.trim().to_string())
            .filter(|genre| !genre.is_empty())
            .collect::<Vec<String>>()
    }))
    .head(TOP_N);

    Report {
        total_count,
        movie_count,
        tv_show_count,
        country_count: country_distribution.len(),
        type_distribution,
        top_countries: country_distribution.head(TOP_N),
        country_distribution,
        rating_distribution,
        additions_by_year,
        top_genres,
    }
}
