//! Batched entity writes with partial durability
//!
//! Records are turned into entities one batch at a time and each batch is
//! committed as a unit. A load of N records performs `ceil(N / BATCH_SIZE)`
//! commits. When construction or a commit fails, everything committed before
//! the failing batch stays in storage and the error reports how much that was.

use async_trait::async_trait;
use company_common::LoadSummary;
use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;

use crate::models::{self, Entity};

/// Number of records committed together
pub const BATCH_SIZE: usize = 10;

/// Destination for committed batches
#[async_trait]
pub trait BatchSink: Send {
    /// Stage every entity of `batch` and commit them together
    async fn commit<E: Entity>(&mut self, batch: &[E]) -> Result<(), sqlx::Error>;
}

/// Writes each batch in its own PostgreSQL transaction
pub struct PgBatchSink {
    pool: PgPool,
}

impl PgBatchSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BatchSink for PgBatchSink {
    async fn commit<E: Entity>(&mut self, batch: &[E]) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for entity in batch {
            models::insert(&mut *tx, entity).await?;
        }

        // Dropping `tx` on an early return rolls the batch back.
        tx.commit().await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Invalid record at position {position}: {message}")]
    InvalidRecord {
        position: usize,
        committed: usize,
        message: String,
    },

    #[error("Problem committing batch {batch} ({committed} records committed): {source}")]
    Storage {
        batch: usize,
        committed: usize,
        #[source]
        source: sqlx::Error,
    },
}

impl LoadError {
    /// Records durably committed before the failure
    pub fn committed(&self) -> usize {
        match self {
            LoadError::InvalidRecord { committed, .. } | LoadError::Storage { committed, .. } => {
                *committed
            },
        }
    }
}

fn build_batch<E: Entity>(
    chunk: &[Value],
    first_position: usize,
    committed: usize,
) -> Result<Vec<E>, LoadError> {
    chunk
        .iter()
        .enumerate()
        .map(|(offset, record)| {
            let invalid = |message: String| LoadError::InvalidRecord {
                position: first_position + offset,
                committed,
                message,
            };

            let entity = E::deserialize(record).map_err(|e| invalid(e.to_string()))?;
            entity.validate().map_err(|e| invalid(e.to_string()))?;
            Ok(entity)
        })
        .collect()
}

/// Load `records` as entities of type `E` through `sink`.
#[tracing::instrument(skip(sink, records), fields(kind = %E::KIND, records = records.len()))]
pub async fn load_records<E, S>(sink: &mut S, records: &[Value]) -> Result<LoadSummary, LoadError>
where
    E: Entity,
    S: BatchSink,
{
    let mut committed = 0;
    let mut batches = 0;

    for (index, chunk) in records.chunks(BATCH_SIZE).enumerate() {
        let batch = build_batch::<E>(chunk, index * BATCH_SIZE, committed)?;

        sink.commit(&batch)
            .await
            .map_err(|source| LoadError::Storage {
                batch: index,
                committed,
                source,
            })?;

        committed += batch.len();
        batches += 1;

        tracing::debug!(batch = index, committed, "Batch committed");
    }

    tracing::info!(loaded = committed, batches, "{} loaded", E::KIND);

    Ok(LoadSummary {
        kind: E::KIND,
        loaded: committed,
        batches,
    })
}
