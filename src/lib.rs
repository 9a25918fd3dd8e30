// Catalog Analytics Engine
// Author: Gabriel Demetrios Lafis

//! # Catalog Analytics Engine
//!
//! A resilient ingestion and analytics engine for streaming catalog data.
//!
//! ## Features
//!
//! - Cascading parse strategies for malformed CSV sources, ending in a
//!   deterministic built-in sample catalog so ingestion never fails
//! - Schema reconciliation with per-line rejection diagnostics
//! - Cleaning and normalization into a typed, analysis-ready dataset
//! - Declarative filter queries (content type, country, year range)
//! - Aggregation into metrics, frequency tables and top-N rankings
//! - Process-wide dataset memoization keyed by source locator
//!
//! ## Example
//!
//! ```rust
//! use catalog_analytics_engine::{
//!     ingest::Ingestor,
//!     query::{apply, summarize, FilterQuery},
//! };
//!
//! // An unreadable source falls back to the built-in sample catalog
//! let outcome = Ingestor::default().ingest("does-not-exist.csv");
//! assert!(outcome.used_fallback);
//! assert_eq!(outcome.dataset.len(), 20);
//!
//! // Filter to movies released between 2015 and 2022
//! let query = FilterQuery::new()
//!     .with_types(["Movie"])
//!     .with_years(2015, 2022);
//! let view = apply(&outcome.dataset, &query);
//!
//! // Aggregate the view into a report
//! let report = summarize(&view);
//! assert_eq!(report.total_count, report.movie_count);
//! ```

pub mod cache;
pub mod data;
pub mod ingest;
pub mod query;
pub mod utils;

// Re-export main types
pub use cache::DatasetCache;
pub use data::{Dataset, Title, YearAdded};
pub use ingest::{IngestOutcome, Ingestor};
pub use query::{apply, summarize, FilterQuery, Report, View};
pub use utils::Config;
