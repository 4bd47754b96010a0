//! Execute a KPI report and convert its rows to JSON

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{postgres::PgRow, Column, PgPool, Row, TypeInfo, ValueRef};
use std::time::Duration;
use thiserror::Error;

use super::report::KpiReport;

const REPORT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiResponse {
    pub kpi: u32,
    pub name: String,
    pub year: i32,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug, Error)]
pub enum KpiError {
    #[error("KPI not found. Id: {0}")]
    NotFound(String),

    #[error("Problem running KPI report: {0}")]
    Database(#[from] sqlx::Error),

    #[error("KPI report timed out after {} seconds", REPORT_TIMEOUT.as_secs())]
    Timeout,
}

#[tracing::instrument(skip(pool), fields(report = %report))]
pub async fn handle(pool: PgPool, report: KpiReport, year: i32) -> Result<KpiResponse, KpiError> {
    let rows = tokio::time::timeout(
        REPORT_TIMEOUT,
        sqlx::query(report.sql()).bind(year).fetch_all(&pool),
    )
    .await
    .map_err(|_| KpiError::Timeout)??;

    let rows = rows
        .iter()
        .map(row_to_json)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(rows = rows.len(), "KPI report executed");

    Ok(KpiResponse {
        kpi: report.number(),
        name: report.name().to_string(),
        year,
        columns: report.columns().iter().map(|c| c.to_string()).collect(),
        rows,
    })
}

fn row_to_json(row: &PgRow) -> Result<Vec<Value>, sqlx::Error> {
    row.columns()
        .iter()
        .map(|column| value_to_json(row, column.ordinal(), column.type_info().name()))
        .collect()
}

fn value_to_json(row: &PgRow, idx: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(idx)?.is_null() {
        return Ok(Value::Null);
    }

    let value = match type_name {
        "INT2" | "INT4" => Value::from(row.try_get::<i32, _>(idx)?),
        "INT8" => Value::from(row.try_get::<i64, _>(idx)?),
        "FLOAT4" | "FLOAT8" => Value::from(row.try_get::<f64, _>(idx)?),
        _ => Value::String(row.try_get::<String, _>(idx)?),
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::kpi::DEFAULT_YEAR;

    async fn seed(pool: &PgPool) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO departments (id, department) VALUES (1, 'Eng'), (2, 'Ops'), (3, 'Sales')")
            .execute(pool)
            .await?;
        sqlx::query("INSERT INTO jobs (id, job) VALUES (1, 'Analyst'), (2, 'Clerk')")
            .execute(pool)
            .await?;
        sqlx::query(
            r#"INSERT INTO employees (id, name, datetime, department_id, job_id) VALUES
                (1, 'A', '2021-01-15T10:00:00Z', 1, 1),
                (2, 'B', '2021-02-15T10:00:00Z', 1, 1),
                (3, 'C', '2021-05-15T10:00:00Z', 1, 2),
                (4, 'D', '2021-08-15T10:00:00Z', 1, 2),
                (5, 'E', '2021-11-15T10:00:00Z', 2, 1),
                (6, 'F', '2021-11-16T10:00:00Z', 3, 2),
                (7, 'G', '2020-03-01T10:00:00Z', 2, 1),
                (8, 'H', '', -1, -1),
                (9, 'I', 'n/a', 1, 1),
                (10, 'J', '2021-02-30T10:00:00Z', 1, 1),
                (11, 'K', 'infinity', 2, 2)"#,
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_hires_by_quarter(pool: PgPool) -> sqlx::Result<()> {
        seed(&pool).await?;

        let response = handle(pool, KpiReport::HiresByQuarter, DEFAULT_YEAR)
            .await
            .unwrap();

        assert_eq!(response.columns, vec!["department", "job", "q1", "q2", "q3", "q4"]);
        assert_eq!(response.rows.len(), 4);
        assert_eq!(
            response.rows[0],
            vec![Value::from("Eng"), Value::from("Analyst"), 2.into(), 0.into(), 0.into(), 0.into()]
        );
        assert_eq!(
            response.rows[1],
            vec![Value::from("Eng"), Value::from("Clerk"), 0.into(), 1.into(), 1.into(), 0.into()]
        );
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_departments_above_mean(pool: PgPool) -> sqlx::Result<()> {
        seed(&pool).await?;

        let response = handle(pool, KpiReport::DepartmentsAboveMean, 2021)
            .await
            .unwrap();

        // 2021 hires: Eng 4, Ops 1, Sales 1; mean 2
        assert_eq!(response.rows, vec![vec![Value::from(1), Value::from("Eng"), Value::from(4)]]);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_unparseable_timestamps_are_skipped(pool: PgPool) -> sqlx::Result<()> {
        sqlx::query("INSERT INTO departments (id, department) VALUES (1, 'Eng')")
            .execute(&pool)
            .await?;
        sqlx::query("INSERT INTO jobs (id, job) VALUES (1, 'Analyst')")
            .execute(&pool)
            .await?;
        sqlx::query(
            r#"INSERT INTO employees (id, name, datetime, department_id, job_id) VALUES
                (1, 'A', 'unknown', 1, 1),
                (2, 'B', '2021-07-01T09:00:00Z', 1, 1)"#,
        )
        .execute(&pool)
        .await?;

        for report in KpiReport::ALL {
            let response = handle(pool.clone(), report, 2021).await;
            assert!(response.is_ok(), "{} failed: {:?}", report, response.err());
        }

        let response = handle(pool, KpiReport::HiresByQuarter, 2021).await.unwrap();
        assert_eq!(
            response.rows,
            vec![vec![Value::from("Eng"), Value::from("Analyst"), 0.into(), 0.into(), 1.into(), 0.into()]]
        );
        Ok(())
    }
}
