//! KPI reports over hiring data
//!
//! Reports are a closed set of named, parameterized queries selected by
//! number. Nothing from the request is interpolated into SQL.

pub mod report;
pub mod routes;
pub mod run;

pub use report::{KpiReport, DEFAULT_YEAR};
pub use routes::kpi_routes;
pub use run::{KpiError, KpiResponse};
