//! Company Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the company data workspace.
//!
//! # Overview
//!
//! This crate is used by both the HTTP service and the bulk loader:
//!
//! - **Types**: entity kinds, the text-only row shapes produced from CSV
//!   files, and lenient field decoders used at the service boundary
//! - **Logging**: centralized `tracing` subscriber setup
//! - **Error Handling**: common error and result types
//!
//! # Example
//!
//! ```
//! use company_common::types::EntityKind;
//!
//! let kind: EntityKind = "jobs".parse().unwrap();
//! assert_eq!(kind.file_name(), "jobs.csv");
//! assert_eq!(kind.load_path(), "/load-jobs/");
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{CompanyError, Result};
pub use types::{EntityKind, LoadRequest, LoadSummary, SENTINEL_REFERENCE};
