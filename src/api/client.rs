//! HTTP client for the remote quote API
//!
//! Every endpoint lives under `{host}/api/`; bodies are JSON in both
//! directions.

use super::error::ApiError;
use super::traits::{FetchResponse, QuoteApi, SaveResponse, SubmitResponse};
use crate::state::Application;
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default API host
pub const DEFAULT_API_HOST: &str = "http://localhost:5000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the quote API
pub struct QuoteApiClient {
    http: Client,
    /// Base host, e.g. `http://localhost:5000`
    host: Url,
}

impl QuoteApiClient {
    /// Create a client for `host`
    pub fn new(host: &str) -> Result<Self, ApiError> {
        let host = Url::parse(host).map_err(|_| ApiError::InvalidUrl(host.to_string()))?;
        if host.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(host.to_string()));
        }
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { http, host })
    }

    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    /// Build `{host}/api/{segment}`, percent-encoding the segment
    fn endpoint(&self, segment: &str) -> Result<Url, ApiError> {
        let mut url = self.host.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.host.to_string()))?
            .pop_if_empty()
            .extend(["api", segment]);
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post<T: DeserializeOwned>(
        &self,
        segment: &str,
        application: &Application,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segment)?;
        tracing::debug!(%url, "POST application");
        let response = self.http.post(url).json(application).send().await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl QuoteApi for QuoteApiClient {
    async fn fetch_application(&self, resume: &str) -> Result<Application, ApiError> {
        let url = self.endpoint(resume)?;
        tracing::debug!(%url, "GET saved application");
        let response = self.http.get(url).send().await?;
        let body: FetchResponse = Self::decode(response).await?;
        Ok(body.application)
    }

    async fn save(&self, application: &Application) -> Result<SaveResponse, ApiError> {
        self.post("save", application).await
    }

    async fn submit(&self, application: &Application) -> Result<SubmitResponse, ApiError> {
        self.post("submit", application).await
    }
}
