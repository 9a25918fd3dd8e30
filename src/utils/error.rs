// Error handling utilities
// Author: Gabriel Demetrios Lafis

use thiserror::Error;

use crate::ingest::ParseError;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("ingest error: {0}")]
    Ingest(#[from] ParseError),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

/// Result type alias for AppError
pub type AppResult<T> = Result<T, AppError>;
