use std::fmt;

/// Year used when a report request does not name one
pub const DEFAULT_YEAR: i32 = 2021;

/// The available KPI reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiReport {
    /// Employees hired per department and job in a year, by quarter
    HiresByQuarter,
    /// Departments that hired more employees than the mean in a year
    DepartmentsAboveMean,
}

// Hire timestamps go through `try_timestamptz`; rows it cannot parse yield
// NULL and never match a year.
const HIRES_BY_QUARTER_SQL: &str = r#"
    WITH parsed AS (
        SELECT department_id,
               job_id,
               try_timestamptz(datetime) AS hired_at
        FROM employees
    ),
    hires AS (
        SELECT department_id,
               job_id,
               EXTRACT(QUARTER FROM hired_at)::INT4 AS quarter
        FROM parsed
        WHERE EXTRACT(YEAR FROM hired_at)::INT4 = $1
    )
    SELECT d.department,
           j.job,
           COUNT(*) FILTER (WHERE h.quarter = 1) AS q1,
           COUNT(*) FILTER (WHERE h.quarter = 2) AS q2,
           COUNT(*) FILTER (WHERE h.quarter = 3) AS q3,
           COUNT(*) FILTER (WHERE h.quarter = 4) AS q4
    FROM hires h
    JOIN departments d ON d.id = h.department_id
    JOIN jobs j ON j.id = h.job_id
    GROUP BY d.department, j.job
    ORDER BY d.department, j.job
"#;

const DEPARTMENTS_ABOVE_MEAN_SQL: &str = r#"
    WITH hires AS (
        SELECT d.id,
               d.department,
               COUNT(e.id) AS hired
        FROM departments d
        JOIN employees e ON e.department_id = d.id
        WHERE EXTRACT(YEAR FROM try_timestamptz(e.datetime))::INT4 = $1
        GROUP BY d.id, d.department
    )
    SELECT id, department, hired
    FROM hires
    WHERE hired > (SELECT AVG(hired) FROM hires)
    ORDER BY hired DESC, id
"#;

impl KpiReport {
    pub const ALL: [KpiReport; 2] = [KpiReport::HiresByQuarter, KpiReport::DepartmentsAboveMean];

    /// Look a report up by its public number
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(KpiReport::HiresByQuarter),
            2 => Some(KpiReport::DepartmentsAboveMean),
            _ => None,
        }
    }

    pub fn number(self) -> u32 {
        match self {
            KpiReport::HiresByQuarter => 1,
            KpiReport::DepartmentsAboveMean => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            KpiReport::HiresByQuarter => "hires-by-quarter",
            KpiReport::DepartmentsAboveMean => "departments-above-mean",
        }
    }

    /// Output columns, in order
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            KpiReport::HiresByQuarter => &["department", "job", "q1", "q2", "q3", "q4"],
            KpiReport::DepartmentsAboveMean => &["id", "department", "hired"],
        }
    }

    /// SQL taking the year as `$1`
    pub fn sql(self) -> &'static str {
        match self {
            KpiReport::HiresByQuarter => HIRES_BY_QUARTER_SQL,
            KpiReport::DepartmentsAboveMean => DEPARTMENTS_ABOVE_MEAN_SQL,
        }
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kpi {} ({})", self.number(), self.name())
    }
}
