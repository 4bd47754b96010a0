//! Bulk record loading
//!
//! A load request carries a serialized record list. The records are decoded
//! ([`payload`]), turned into entities and written in fixed-size batches
//! ([`batch`]). Batches already committed stay durable when a later batch
//! fails.

pub mod batch;
pub mod payload;
pub mod routes;

pub use batch::{load_records, BatchSink, LoadError, PgBatchSink, BATCH_SIZE};
pub use payload::{decode_records, LoadBody, PayloadError};
pub use routes::loads_routes;
