//! Common types used across the company data workspace

pub mod fields;

use serde::{Deserialize, Serialize};

use crate::error::{CompanyError, Result};

/// Reserved value for an absent department or job reference.
pub const SENTINEL_REFERENCE: i32 = -1;

/// The three kinds of records handled by the loader and the service.
///
/// The declaration order is the order in which a full load runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Departments,
    Jobs,
    Employees,
}

impl EntityKind {
    /// All kinds, in load order.
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Departments,
        EntityKind::Jobs,
        EntityKind::Employees,
    ];

    /// Plural name, also the table name.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Departments => "departments",
            EntityKind::Jobs => "jobs",
            EntityKind::Employees => "employees",
        }
    }

    /// CSV file holding this kind inside a data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            EntityKind::Departments => "departments.csv",
            EntityKind::Jobs => "jobs.csv",
            EntityKind::Employees => "hired_employees.csv",
        }
    }

    /// Bulk load endpoint path.
    pub fn load_path(self) -> &'static str {
        match self {
            EntityKind::Departments => "/load-departments/",
            EntityKind::Jobs => "/load-jobs/",
            EntityKind::Employees => "/load-employees/",
        }
    }

    /// Number of positional columns in a row of this kind.
    pub fn column_count(self) -> usize {
        match self {
            EntityKind::Departments | EntityKind::Jobs => 2,
            EntityKind::Employees => 5,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = CompanyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "departments" | "department" => Ok(EntityKind::Departments),
            "jobs" | "job" => Ok(EntityKind::Jobs),
            "employees" | "employee" | "hired_employees" => Ok(EntityKind::Employees),
            other => Err(CompanyError::UnknownEntityKind(other.to_string())),
        }
    }
}

// ============================================================================
// Text rows (as read from CSV, before any type coercion)
// ============================================================================

/// A department row with every field kept as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRow {
    pub id: String,
    pub department: String,
}

/// A job row with every field kept as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRow {
    pub id: String,
    pub job: String,
}

/// A hired-employee row with every field kept as text
///
/// `department_id` and `job_id` are never empty: the reader substitutes the
/// sentinel `"-1"` for missing references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRow {
    pub id: String,
    pub name: String,
    pub datetime: String,
    pub department_id: String,
    pub job_id: String,
}

// ============================================================================
// Bulk load wire format
// ============================================================================

/// Body of a bulk load request
///
/// The record list travels as one serialized JSON array inside a single
/// string field. Older producers name the field after the entity kind, so
/// those names are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRequest {
    #[serde(alias = "departments", alias = "jobs", alias = "employees")]
    pub records: String,
}

impl LoadRequest {
    /// Serialize a record list into a load request body.
    pub fn from_records<T: Serialize>(records: &[T]) -> Result<Self> {
        Ok(Self {
            records: serde_json::to_string(records)?,
        })
    }
}

/// Summary returned by a successful bulk load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub kind: EntityKind,
    pub loaded: usize,
    pub batches: usize,
}
