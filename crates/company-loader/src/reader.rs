//! Record Reader: the three company CSV files as text rows
//!
//! Files have no header row and a fixed column order. Fields are kept as
//! text; the only substitution is the `-1` sentinel for empty employee
//! references.

use company_common::{
    types::{DepartmentRow, EmployeeRow, JobRow},
    EntityKind,
};
use csv::{ReaderBuilder, StringRecord};
use std::path::{Path, PathBuf};

use crate::error::{LoaderError, Result};

/// Sentinel written for an empty department or job reference
const SENTINEL_FIELD: &str = "-1";

/// Everything read from one data directory, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyData {
    pub departments: Vec<DepartmentRow>,
    pub jobs: Vec<JobRow>,
    pub employees: Vec<EmployeeRow>,
}

impl CompanyData {
    /// Row count for one entity kind
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Departments => self.departments.len(),
            EntityKind::Jobs => self.jobs.len(),
            EntityKind::Employees => self.employees.len(),
        }
    }
}

/// Read `departments.csv`, `jobs.csv` and `hired_employees.csv` from `dir`.
///
/// Fails on the first missing file or malformed row; nothing is returned
/// for partially readable input.
#[tracing::instrument]
pub fn read_data_files(dir: &Path) -> Result<CompanyData> {
    let departments = read_records(dir, EntityKind::Departments)?
        .iter()
        .map(|r| DepartmentRow {
            id: field(r, 0),
            department: field(r, 1),
        })
        .collect();

    let jobs = read_records(dir, EntityKind::Jobs)?
        .iter()
        .map(|r| JobRow {
            id: field(r, 0),
            job: field(r, 1),
        })
        .collect();

    let employees = read_records(dir, EntityKind::Employees)?
        .iter()
        .map(|r| EmployeeRow {
            id: field(r, 0),
            name: field(r, 1),
            datetime: field(r, 2),
            department_id: reference(r, 3),
            job_id: reference(r, 4),
        })
        .collect();

    let data = CompanyData {
        departments,
        jobs,
        employees,
    };

    tracing::info!(
        departments = data.departments.len(),
        jobs = data.jobs.len(),
        employees = data.employees.len(),
        "Data files read"
    );

    Ok(data)
}

fn read_records(dir: &Path, kind: EntityKind) -> Result<Vec<StringRecord>> {
    let path = dir.join(kind.file_name());
    if !path.is_file() {
        return Err(LoaderError::FileNotFound(path));
    }

    let csv_error = |path: &PathBuf, source| LoaderError::Csv {
        path: path.clone(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(&path)
        .map_err(|e| csv_error(&path, e))?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(&path, e))?;

        if record.len() != kind.column_count() {
            return Err(LoaderError::MalformedRow {
                line: record.position().map(|p| p.line()).unwrap_or_default(),
                path,
                expected: kind.column_count(),
                found: record.len(),
            });
        }

        records.push(record);
    }

    Ok(records)
}

fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().to_string()
}

fn reference(record: &StringRecord, index: usize) -> String {
    match record.get(index) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => SENTINEL_FIELD.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_files(departments: &str, jobs: &str, employees: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("departments.csv"), departments).unwrap();
        fs::write(dir.path().join("jobs.csv"), jobs).unwrap();
        fs::write(dir.path().join("hired_employees.csv"), employees).unwrap();
        dir
    }

    #[test]
    fn test_reads_rows_in_file_order() {
        let dir = write_files(
            "1,Supply Chain\n2,Maintenance\n",
            "1,Marketing Assistant\n",
            "1,Harold Vogt,2021-11-07T02:48:42Z,2,96\n2,Ty Hofer,2021-05-30T05:43:46Z,8,\n",
        );

        let data = read_data_files(dir.path()).unwrap();

        assert_eq!(data.departments.len(), 2);
        assert_eq!(data.departments[1].department, "Maintenance");
        assert_eq!(data.jobs[0].job, "Marketing Assistant");
        assert_eq!(data.employees[0].name, "Harold Vogt");
        assert_eq!(data.employees[0].job_id, "96");
        assert_eq!(data.count(EntityKind::Employees), 2);
    }

    #[test]
    fn test_empty_references_become_sentinel() {
        let dir = write_files("1,Eng\n", "1,Clerk\n", "4,Ada,2021-01-01T00:00:00Z,,\n");

        let data = read_data_files(dir.path()).unwrap();

        assert_eq!(data.employees[0].department_id, "-1");
        assert_eq!(data.employees[0].job_id, "-1");
    }

    #[test]
    fn test_other_fields_stay_text() {
        let dir = write_files("007,Eng\n", "1,Clerk\n", "5,,,1,1\n");

        let data = read_data_files(dir.path()).unwrap();

        assert_eq!(data.departments[0].id, "007");
        assert_eq!(data.employees[0].name, "");
        assert_eq!(data.employees[0].datetime, "");
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let dir = write_files("1,\"Research, Development\"\n", "1,Clerk\n", "");

        let data = read_data_files(dir.path()).unwrap();

        assert_eq!(data.departments[0].department, "Research, Development");
        assert!(data.employees.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("departments.csv"), "1,Eng\n").unwrap();

        let err = read_data_files(dir.path()).unwrap_err();
        match err {
            LoaderError::FileNotFound(path) => assert!(path.ends_with("jobs.csv")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_column_count() {
        let dir = write_files("1,Eng\n2\n", "1,Clerk\n", "");

        let err = read_data_files(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::MalformedRow {
                line: 2,
                expected: 2,
                found: 1,
                ..
            }
        ));
    }
}
