// Process-wide memoization of the ingested dataset
// Author: Gabriel Demetrios Lafis

use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use crate::ingest::{IngestOutcome, Ingestor};

/// Memoization cache for ingestion outcomes, keyed by source locator
///
/// Re-parsing on every query would be wasted work, so the first successful
/// ingestion is kept for the life of the process. The entry is invalidated
/// only when the source locator changes or `invalidate` is called;
/// recomputation is avoided for performance, not correctness.
#[derive(Default)]
pub struct DatasetCache {
    entry: RwLock<Option<(String, Arc<IngestOutcome>)>>,
}

impl DatasetCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached outcome for a locator, ingesting on miss
    ///
    /// Total like the ingestor itself: always returns an outcome.
    pub fn load(&self, locator: &str, ingestor: &Ingestor) -> Arc<IngestOutcome> {
        {
            let entry = self
                .entry
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some((key, outcome)) = entry.as_ref() {
                if key == locator {
                    debug!("Dataset cache hit for '{}'", locator);
                    return Arc::clone(outcome);
                }
            }
        }

        debug!("Dataset cache miss for '{}'", locator);
        let outcome = Arc::new(ingestor.ingest(locator));

        let mut entry = self
            .entry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *entry = Some((locator.to_string(), Arc::clone(&outcome)));

        outcome
    }

    /// Drop the cached entry, forcing re-ingestion on the next load
    pub fn invalidate(&self) {
        let mut entry = self
            .entry
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *entry = None;
    }
}
