// Configuration utilities
// Author: Gabriel Demetrios Lafis

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ingest::MissingCountryPolicy;
use crate::utils::{AppError, AppResult};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ingest: IngestConfig,
    pub logging: LoggingConfig,
}

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Default source locator, overridable on the command line
    pub source: Option<String>,
    pub delimiter: char,
    pub on_missing_country: MissingCountryPolicy,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig {
            source: None,
            delimiter: ',',
            on_missing_country: MissingCountryPolicy::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a JSON or YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let mut file = File::open(&path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = if path.as_ref().extension().map_or(false, |ext| ext == "json") {
            serde_json::from_str(&contents)
                .map_err(|e| AppError::Config(e.to_string()))?
        } else if path
            .as_ref()
            .extension()
            .map_or(false, |ext| ext == "yaml" || ext == "yml")
        {
            serde_yaml::from_str(&contents)
                .map_err(|e| AppError::Config(e.to_string()))?
        } else {
            return Err(AppError::Config(
                "unsupported config file format".to_string(),
            ));
        };

        Ok(config)
    }

    /// Get the log level filter
    pub fn log_level_filter(&self) -> log::LevelFilter {
        match self.logging.level.to_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}
