//! Error types for the company loader
//!
//! Messages are shown to the operator as-is, so each one names the file or
//! stage involved.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;

#[derive(Error, Debug)]
pub enum LoaderError {
    /// A data file is missing from the data directory
    #[error("File not found: '{}'. Verify the data directory contains departments.csv, jobs.csv and hired_employees.csv.", .0.display())]
    FileNotFound(PathBuf),

    /// A data file could not be parsed as CSV
    #[error("Failed to read '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row does not have the column count its file requires
    #[error("Malformed row in '{}' at line {line}: expected {expected} fields, found {found}", path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A stage answered with an unexpected status
    #[error("Problem {action}: status response {status}, error: {body}")]
    Stage {
        action: &'static str,
        status: u16,
        body: String,
    },

    /// A stage could not reach the service
    #[error("Problem {action}: {source}. Ensure the company server is running and accessible.")]
    Network {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP client construction failed
    #[error("Network client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Common(#[from] company_common::CompanyError),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}
