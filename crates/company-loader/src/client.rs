//! HTTP client for the company server

use async_trait::async_trait;
use company_common::{EntityKind, LoadRequest};
use reqwest::Client;

use crate::config::LoaderConfig;
use crate::error::Result;

/// Status and body of one stage call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageResponse {
    pub status: u16,
    pub body: String,
}

/// The server calls a load run is made of
#[async_trait]
pub trait CompanyApi: Send + Sync {
    /// `DELETE /restart-schema/`
    async fn restart_schema(&self) -> reqwest::Result<StageResponse>;

    /// `POST /load-<kind>/`
    async fn load(&self, kind: EntityKind, request: &LoadRequest) -> reqwest::Result<StageResponse>;
}

/// API client for the company server
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &LoaderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn into_stage_response(response: reqwest::Response) -> reqwest::Result<StageResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(StageResponse { status, body })
    }
}

#[async_trait]
impl CompanyApi for ApiClient {
    async fn restart_schema(&self) -> reqwest::Result<StageResponse> {
        let response = self.client.delete(self.url("/restart-schema/")).send().await?;
        Self::into_stage_response(response).await
    }

    async fn load(&self, kind: EntityKind, request: &LoadRequest) -> reqwest::Result<StageResponse> {
        let response = self
            .client
            .post(self.url(kind.load_path()))
            .json(request)
            .send()
            .await?;
        Self::into_stage_response(response).await
    }
}
