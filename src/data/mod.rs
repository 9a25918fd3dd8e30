// Data module for catalog records and datasets
// Author: Gabriel Demetrios Lafis

mod raw;
mod sample;

pub use raw::*;
pub use sample::*;

use serde::Serialize;

/// Column names of the expected catalog schema
pub mod columns {
    pub const SHOW_ID: &str = "show_id";
    pub const TYPE: &str = "type";
    pub const TITLE: &str = "title";
    pub const DIRECTOR: &str = "director";
    pub const CAST: &str = "cast";
    pub const COUNTRY: &str = "country";
    pub const DATE_ADDED: &str = "date_added";
    pub const RELEASE_YEAR: &str = "release_year";
    pub const RATING: &str = "rating";
    pub const DURATION: &str = "duration";
    pub const LISTED_IN: &str = "listed_in";
}

/// Year a title was added to the catalog, derived during cleaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum YearAdded {
    /// Year extracted from `date_added`, or taken from `release_year`
    Year(i32),
    /// Neither `date_added` nor `release_year` yielded a year
    Missing,
}

impl YearAdded {
    /// Get the year, if present
    pub fn year(&self) -> Option<i32> {
        match self {
            YearAdded::Year(y) => Some(*y),
            YearAdded::Missing => None,
        }
    }
}

/// A cleaned catalog record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub show_id: String,
    /// Content type, e.g. "Movie" or "TV Show"
    pub content_type: String,
    pub title: String,
    /// Director name, or the documented default when the source is blank
    pub director: String,
    /// Cast list, or the documented default when the source is blank
    pub cast: String,
    /// Production country; presence depends on the missing-country policy
    pub country: Option<String>,
    /// Raw date-added text as it appeared in the source
    pub date_added: Option<String>,
    pub release_year: Option<i32>,
    pub rating: Option<String>,
    pub duration: String,
    /// Comma-joined genre list as it appeared in the source
    pub listed_in: String,
    pub year_added: YearAdded,
}

/// A cleaned, rectangular catalog dataset
///
/// Produced once per ingestion and treated as immutable afterwards; the
/// filter and aggregation engines only borrow read-only access.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    titles: Vec<Title>,
}

impl Dataset {
    /// Create a dataset from cleaned records
    pub fn new(titles: Vec<Title>) -> Self {
        Dataset { titles }
    }

    /// Get the number of records in the dataset
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Check if the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Get a reference to a record by index
    pub fn get(&self, index: usize) -> Option<&Title> {
        self.titles.get(index)
    }

    /// Get all records in source order
    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    /// Distinct content types in first-seen order, for filter option lists
    pub fn content_types(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for title in &self.titles {
            if !seen.contains(&title.content_type) {
                seen.push(title.content_type.clone());
            }
        }
        seen
    }

    /// Sorted distinct countries, for filter option lists
    ///
    /// Records without a country are skipped.
    pub fn countries(&self) -> Vec<String> {
        let mut countries: Vec<String> = Vec::new();
        for title in &self.titles {
            if let Some(country) = &title.country {
                if !countries.contains(country) {
                    countries.push(country.clone());
                }
            }
        }
        countries.sort();
        countries
    }

    /// Minimum and maximum release year, for the year-range filter control
    pub fn release_year_bounds(&self) -> Option<(i32, i32)> {
        let mut bounds: Option<(i32, i32)> = None;
        for title in &self.titles {
            if let Some(year) = title.release_year {
                bounds = Some(match bounds {
                    Some((min, max)) => (min.min(year), max.max(year)),
                    None => (year, year),
                });
            }
        }
        bounds
    }
}
