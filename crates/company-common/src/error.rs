//! Error types shared across the workspace

use thiserror::Error;

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, CompanyError>;

/// Main error type for shared functionality
#[derive(Error, Debug)]
pub enum CompanyError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown entity kind: {0}. Expected one of: departments, jobs, employees")]
    UnknownEntityKind(String),
}
