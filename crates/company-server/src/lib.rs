//! Company Server Library
//!
//! HTTP service over the employees, departments and jobs tables.
//!
//! # Overview
//!
//! - **Entities**: create, fetch and delete single records by id
//! - **Bulk loads**: serialized record lists written in batches of ten, with
//!   earlier batches kept when a later one fails
//! - **Schema reset**: truncate every company table
//! - **KPI reports**: fixed, parameterized hiring reports
//!
//! ## Framework Stack
//!
//! - **Axum**: routing and extractors
//! - **SQLx**: PostgreSQL pool, transactions and migrations
//! - **Tower**: middleware (tracing, CORS)
//!
//! # Example
//!
//! ```no_run
//! use company_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod models;

// Re-export commonly used types
pub use error::{AppError, ServerError, ServerResult};
