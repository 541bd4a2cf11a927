//! Error handling for the report generator.

pub mod util;

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use chrono::NaiveDate;
use parquet::errors::ParquetError;

/// Specialized error type for loading, filtering and rendering dashboard data
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Error opening or reading a file
    #[error("IO error{}: {message}", path_suffix(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<io::Error>,
    },

    /// Error decoding tabular data into Arrow arrays
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading a Parquet source
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// A required column is absent from a source
    #[error("Column '{column}' not found in {source_name}")]
    ColumnNotFound { column: String, source_name: String },

    /// The source file extension is not a supported tabular format
    #[error("Unsupported source format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Invalid configuration file or value
    #[error("Configuration error: {0}")]
    Config(String),

    /// The lower bound of a date range lies after the upper bound
    #[error("Invalid date range: from date {from} is after to date {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    /// The monitoring view was asked for a patient with no samples
    #[error("No monitoring samples for patient '{0}'")]
    UnknownPatient(String),

    /// A user supplied value could not be interpreted
    #[error("Invalid value for {field}: {value}")]
    InvalidArgument { field: String, value: String },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

impl DashboardError {
    /// Create an IO error with a message and no underlying source
    #[must_use]
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create an IO error that wraps an `io::Error`
    #[must_use]
    pub fn io_error_with_source(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: Some(source),
        }
    }

    /// Attach a path to an IO error. Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Io {
                message, source, ..
            } => Self::Io {
                message,
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        }
    }

    /// Create a missing-column error
    #[must_use]
    pub fn column_not_found(column: &str, source_name: &str) -> Self {
        Self::ColumnNotFound {
            column: column.to_string(),
            source_name: source_name.to_string(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid-argument error
    #[must_use]
    pub fn invalid_argument(field: &str, value: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

impl From<serde_yaml::Error> for DashboardError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Config(error.to_string())
    }
}

/// Result type for report generator operations
pub type Result<T> = std::result::Result<T, DashboardError>;
