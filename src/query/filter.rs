// Filter engine: declarative inclusion predicates over a dataset
// Author: Gabriel Demetrios Lafis

use std::collections::BTreeSet;

use crate::data::{Dataset, Title};

/// A declarative filter over a dataset
///
/// Empty selection sets mean "no restriction", not "exclude all"; the year
/// range is inclusive on both ends. Constructed fresh per query, no state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    types: BTreeSet<String>,
    countries: BTreeSet<String>,
    min_year: i32,
    max_year: i32,
}

impl Default for FilterQuery {
    fn default() -> Self {
        FilterQuery {
            types: BTreeSet::new(),
            countries: BTreeSet::new(),
            min_year: i32::MIN,
            max_year: i32::MAX,
        }
    }
}

impl FilterQuery {
    /// Create an unrestricted query
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given content types
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to the given countries
    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to an inclusive release-year range
    pub fn with_years(mut self, min_year: i32, max_year: i32) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    /// Check whether a record satisfies every predicate
    pub fn matches(&self, title: &Title) -> bool {
        if !self.types.is_empty() && !self.types.contains(&title.content_type) {
            return false;
        }

        if !self.countries.is_empty() {
            match &title.country {
                Some(country) if self.countries.contains(country) => {}
                _ => return false,
            }
        }

        // A record with no release year never falls inside a year range
        match title.release_year {
            Some(year) => year >= self.min_year && year <= self.max_year,
            None => false,
        }
    }
}

/// A filtered row-index subset of a dataset
///
/// Re-derivable deterministically from the dataset and query; row order
/// matches the dataset's row order.
#[derive(Debug, Clone)]
pub struct View<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> View<'a> {
    /// Get the number of rows in the view
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the view is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the row indices into the underlying dataset
    pub fn indices(&self) -> &[usize] {
        &self.rows
    }

    /// Get a record by position within the view
    pub fn get(&self, index: usize) -> Option<&'a Title> {
        self.rows.get(index).and_then(|&i| self.dataset.get(i))
    }

    /// Iterate over the records in the view, in dataset order
    pub fn titles(&self) -> impl Iterator<Item = &'a Title> + '_ {
        self.rows.iter().map(move |&i| &self.dataset.titles()[i])
    }

    /// Get up to the first `n` records, for tabular display
    pub fn head(&self, n: usize) -> Vec<&'a Title> {
        self.titles().take(n).collect()
    }
}

/// Apply a filter query to a dataset
///
/// The filter is stable: surviving rows keep their relative dataset order.
pub fn apply<'a>(dataset: &'a Dataset, query: &FilterQuery) -> View<'a> {
    let rows = dataset
        .titles()
        .iter()
        .enumerate()
        .filter(|(_, title)| query.matches(title))
        .map(|(i, _)| i)
        .collect();

    View { dataset, rows }
}
