// Ingestion module for the resilient parse cascade
// Author: Gabriel Demetrios Lafis

mod clean;
mod reconcile;
mod strategies;

pub use clean::*;
pub use reconcile::*;
pub use strategies::*;

use std::path::Path;

use log::{error, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::data::{sample_table, Dataset, RejectedRow};
use crate::utils::IngestConfig;

/// Severity of a diagnostic event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

/// A human-readable event emitted during ingestion
///
/// Diagnostics are collected in order and handed to the presentation layer
/// for user feedback; they carry no control information back into the
/// pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

impl Diagnostic {
    /// Create an informational diagnostic
    pub fn info(message: impl Into<String>) -> Self {
        Diagnostic {
            level: DiagnosticLevel::Info,
            message: message.into(),
        }
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            level: DiagnosticLevel::Warning,
            message: message.into(),
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            level: DiagnosticLevel::Error,
            message: message.into(),
        }
    }
}

/// Record a diagnostic and mirror it to the log facade
pub(crate) fn emit(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    match diagnostic.level {
        DiagnosticLevel::Info => info!("{}", diagnostic.message),
        DiagnosticLevel::Warning => warn!("{}", diagnostic.message),
        DiagnosticLevel::Error => error!("{}", diagnostic.message),
    }
    diagnostics.push(diagnostic);
}

/// Represents an error in one parse strategy
///
/// Parse errors never escape the ingestion pipeline; each one only advances
/// the cascade to the next strategy.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[from] std::io::Error),
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("encoding failure: source is not valid UTF-8")]
    Encoding,
    #[error("source is empty")]
    EmptySource,
}

/// Result of one complete ingestion run
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// The cleaned dataset; present even when the source was unusable
    pub dataset: Dataset,
    /// Rows the schema reconciler rejected, for diagnostics only
    pub rejected: Vec<RejectedRow>,
    /// Ordered diagnostics from the strategy cascade
    pub diagnostics: Vec<Diagnostic>,
    /// Name of the strategy that produced the dataset
    pub strategy: String,
    /// True when the built-in sample catalog was substituted
    pub used_fallback: bool,
}

/// Driver for the ordered parse-strategy cascade
///
/// Strategies are attempted in order of increasing permissiveness; a
/// strategy is only tried after the previous one failed or yielded zero
/// usable rows. The final fallback is the built-in sample catalog, so
/// `ingest` is total and the caller never sees an error.
pub struct Ingestor {
    strategies: Vec<Box<dyn ParseStrategy>>,
    policy: MissingCountryPolicy,
}

impl Ingestor {
    /// Create an ingestor from the ingest configuration
    ///
    /// # Panics
    ///
    /// Panics if the configured delimiter is not an ASCII character: the
    /// structured strategies split on a single byte, and a multi-byte
    /// delimiter would make them disagree with the line-repair split.
    pub fn new(config: &IngestConfig) -> Self {
        assert!(
            config.delimiter.is_ascii(),
            "delimiter '{}' is not ASCII",
            config.delimiter
        );
        let delimiter = config.delimiter as u8;
        Ingestor {
            strategies: vec![
                Box::new(StrictCsvStrategy::new(delimiter)),
                Box::new(LineRepairStrategy::new(config.delimiter)),
                Box::new(TokenStreamStrategy::new(delimiter)),
            ],
            policy: config.on_missing_country,
        }
    }

    /// Ingest a source into a cleaned dataset
    ///
    /// Runs the cascade, reconciles the winning raw table against its
    /// header, and cleans the accepted rows. Always returns an outcome.
    pub fn ingest<P: AsRef<Path>>(&self, source: P) -> IngestOutcome {
        let source = source.as_ref();
        let mut diagnostics = Vec::new();

        for strategy in &self.strategies {
            emit(
                &mut diagnostics,
                Diagnostic::info(format!(
                    "Attempting {} parse of '{}'",
                    strategy.name(),
                    source.display()
                )),
            );

            let table = match strategy.parse(source, &mut diagnostics) {
                Ok(table) => table,
                Err(err) => {
                    emit(
                        &mut diagnostics,
                        Diagnostic::warning(format!("{} parse failed: {}", strategy.name(), err)),
                    );
                    continue;
                }
            };

            let (accepted, rejected) = reconcile(&table);

            if accepted.is_empty() {
                emit(
                    &mut diagnostics,
                    Diagnostic::warning(format!(
                        "{} parse produced no usable rows",
                        strategy.name()
                    )),
                );
                continue;
            }

            if !rejected.is_empty() {
                let lines: Vec<usize> = rejected.iter().take(5).map(|r| r.line).collect();
                emit(
                    &mut diagnostics,
                    Diagnostic::warning(format!(
                        "Skipped {} malformed rows (first lines: {:?})",
                        rejected.len(),
                        lines
                    )),
                );
            }

            emit(
                &mut diagnostics,
                Diagnostic::info(format!(
                    "Loaded {} records via {} parse",
                    accepted.len(),
                    strategy.name()
                )),
            );

            let dataset = clean(&table.headers, &accepted, self.policy);

            return IngestOutcome {
                dataset,
                rejected,
                diagnostics,
                strategy: strategy.name().to_string(),
                used_fallback: false,
            };
        }

        emit(
            &mut diagnostics,
            Diagnostic::error(
                "All parse strategies exhausted; using the built-in sample catalog".to_string(),
            ),
        );

        let table = sample_table();
        let (accepted, rejected) = reconcile(&table);
        let dataset = clean(&table.headers, &accepted, self.policy);

        IngestOutcome {
            dataset,
            rejected,
            diagnostics,
            strategy: "built-in sample".to_string(),
            used_fallback: true,
        }
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new(&IngestConfig::default())
    }
}
