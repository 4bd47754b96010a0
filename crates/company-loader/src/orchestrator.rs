//! Load Orchestrator
//!
//! A run is four calls made in order: schema reset, then departments, jobs
//! and employees. Each stage must answer with the expected status before the
//! next one starts. The first failure ends the run; there is no retry and
//! no resume, a new run starts again from [`RunState::Idle`].

use company_common::{EntityKind, LoadRequest, LoadSummary};
use std::fmt;

use crate::client::{CompanyApi, StageResponse};
use crate::config::DEFAULT_EXPECTED_STATUS;
use crate::error::{LoaderError, Result};
use crate::reader::CompanyData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    SchemaReset,
    LoadDepartments,
    LoadJobs,
    LoadEmployees,
}

impl LoadStage {
    /// Every stage, in run order
    pub const ALL: [LoadStage; 4] = [
        LoadStage::SchemaReset,
        LoadStage::LoadDepartments,
        LoadStage::LoadJobs,
        LoadStage::LoadEmployees,
    ];

    /// Entity kind loaded by this stage, if any
    pub fn kind(self) -> Option<EntityKind> {
        match self {
            LoadStage::SchemaReset => None,
            LoadStage::LoadDepartments => Some(EntityKind::Departments),
            LoadStage::LoadJobs => Some(EntityKind::Jobs),
            LoadStage::LoadEmployees => Some(EntityKind::Employees),
        }
    }

    /// What the stage is doing, for operator messages ("loading jobs")
    pub fn action(self) -> &'static str {
        match self {
            LoadStage::SchemaReset => "restarting schema",
            LoadStage::LoadDepartments => "loading departments",
            LoadStage::LoadJobs => "loading jobs",
            LoadStage::LoadEmployees => "loading employees",
        }
    }
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadStage::SchemaReset => "SchemaReset",
            LoadStage::LoadDepartments => "LoadDepartments",
            LoadStage::LoadJobs => "LoadJobs",
            LoadStage::LoadEmployees => "LoadEmployees",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running(LoadStage),
    Done,
    Failed { stage: LoadStage, cause: String },
}

/// Outcome of one successful stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    pub stage: LoadStage,
    pub status: u16,
    /// Parsed from the response body of load stages when present
    pub summary: Option<LoadSummary>,
}

/// Sequences the stages of a load run against a [`CompanyApi`]
pub struct Orchestrator<A> {
    api: A,
    expected_status: u16,
    state: RunState,
    history: Vec<RunState>,
}

impl<A: CompanyApi> Orchestrator<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            expected_status: DEFAULT_EXPECTED_STATUS,
            state: RunState::Idle,
            history: vec![RunState::Idle],
        }
    }

    /// Status every stage must answer with
    pub fn with_expected_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Every state entered since the last run started, oldest first
    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    /// Run every stage in order
    pub async fn run(&mut self, data: &CompanyData) -> Result<Vec<StageOutcome>> {
        self.run_stages(&LoadStage::ALL, data).await
    }

    /// Run only the schema reset stage
    pub async fn reset(&mut self) -> Result<StageOutcome> {
        let mut outcomes = self
            .run_stages(&[LoadStage::SchemaReset], &CompanyData::default())
            .await?;
        outcomes
            .pop()
            .ok_or_else(|| LoaderError::Config("schema reset produced no outcome".to_string()))
    }

    #[tracing::instrument(skip(self, data))]
    async fn run_stages(
        &mut self,
        stages: &[LoadStage],
        data: &CompanyData,
    ) -> Result<Vec<StageOutcome>> {
        self.history.clear();
        self.transition(RunState::Idle);

        let mut outcomes = Vec::with_capacity(stages.len());

        for &stage in stages {
            self.transition(RunState::Running(stage));

            match self.execute(stage, data).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    self.transition(RunState::Failed {
                        stage,
                        cause: err.to_string(),
                    });
                    return Err(err);
                },
            }
        }

        self.transition(RunState::Done);

        Ok(outcomes)
    }

    async fn execute(&self, stage: LoadStage, data: &CompanyData) -> Result<StageOutcome> {
        let network_error = |source| LoaderError::Network {
            action: stage.action(),
            source,
        };

        let response = match stage.kind() {
            None => self.api.restart_schema().await.map_err(network_error)?,
            Some(kind) => {
                let request = match kind {
                    EntityKind::Departments => LoadRequest::from_records(&data.departments)?,
                    EntityKind::Jobs => LoadRequest::from_records(&data.jobs)?,
                    EntityKind::Employees => LoadRequest::from_records(&data.employees)?,
                };
                tracing::info!(records = data.count(kind), "Sending {}", kind);
                self.api.load(kind, &request).await.map_err(network_error)?
            },
        };

        self.check(stage, response)
    }

    fn check(&self, stage: LoadStage, response: StageResponse) -> Result<StageOutcome> {
        if response.status != self.expected_status {
            return Err(LoaderError::Stage {
                action: stage.action(),
                status: response.status,
                body: response.body,
            });
        }

        let summary = stage
            .kind()
            .and_then(|_| serde_json::from_str::<LoadSummary>(&response.body).ok());

        Ok(StageOutcome {
            stage,
            status: response.status,
            summary,
        })
    }

    fn transition(&mut self, next: RunState) {
        match &next {
            RunState::Failed { stage, cause } => {
                tracing::error!(%stage, %cause, "Load run failed")
            },
            other => tracing::debug!(state = ?other, "Load run state"),
        }
        self.state = next.clone();
        self.history.push(next);
    }
}
