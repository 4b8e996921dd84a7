//! Error types for feature extraction and persistence

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning corpora or persisting records
#[derive(Error, Debug)]
pub enum FeatureError {
    /// I/O failure on a specific path
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A corpus directory does not exist
    #[error("Corpus directory not found: {0}")]
    MissingSource(PathBuf),

    /// The sink was handed nothing to write
    #[error("Refusing to write an empty record batch")]
    EmptyBatch,

    /// A record's columns differ from the first record's
    #[error("Record {index} has columns {found:?}, expected {expected:?}")]
    HeterogeneousRecords {
        index: usize,
        expected: Vec<&'static str>,
        found: Vec<&'static str>,
    },

    /// Malformed tabular input
    #[error("Invalid CSV at line {line}: {reason}")]
    Csv { line: usize, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl FeatureError {
    /// Wrap an `io::Error` together with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for feature extraction operations
pub type Result<T> = std::result::Result<T, FeatureError>;
