//! HTTP client for the remote upload API.

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

use upload_common::constants::{DEFAULT_API_URL, DEFAULT_REQUEST_TIMEOUT_SECS, endpoints};

use crate::{FlowError, FormPayload};

/// Upload API client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without the `/api/...` path
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub use_env_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            use_env_proxy: true,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// One request per call; responses are returned as raw JSON
#[derive(Debug, Clone)]
pub struct UploadClient {
    http: Client,
    base_url: String,
}

impl UploadClient {
    pub fn new(config: &ClientConfig) -> Result<Self, FlowError> {
        let mut builder = Client::builder().timeout(config.timeout);
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /api/upload` with the payload as a multipart body
    pub async fn upload(&self, payload: FormPayload) -> Result<Value, FlowError> {
        let url = self.endpoint(endpoints::UPLOAD);
        debug!(url = %url, fields = payload.len(), "Posting upload");

        let form = payload.into_multipart()?;
        let response = self.http.post(&url).multipart(form).send().await?;
        read_json(response).await
    }

    /// `DELETE /api/cleanup`
    pub async fn cleanup(&self) -> Result<Value, FlowError> {
        let url = self.endpoint(endpoints::CLEANUP);
        debug!(url = %url, "Requesting cleanup");

        let response = self.http.delete(&url).send().await?;
        read_json(response).await
    }

    /// `GET /api`, the API's liveness route
    pub async fn health(&self) -> Result<Value, FlowError> {
        let response = self.http.get(self.endpoint(endpoints::HEALTH)).send().await?;
        read_json(response).await
    }
}

/// Any JSON body counts, whatever the status: rejections are rendered too
async fn read_json(response: Response) -> Result<Value, FlowError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    debug!(status = status.as_u16(), len = bytes.len(), "Upload API responded");

    serde_json::from_slice(&bytes).map_err(|source| FlowError::InvalidJson {
        status: status.as_u16(),
        source,
    })
}
